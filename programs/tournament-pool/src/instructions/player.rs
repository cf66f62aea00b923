//! Player instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use pool_ledger::Lifecycle;

use crate::error::PoolError;
use crate::events::PlayerJoined;
use crate::state::{Config, PlayerStats, Tournament, MAX_PLAYERS};

/// Join a started tournament, paying the entry fee into its vault
#[derive(Accounts)]
pub struct JoinTournament<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"tournament", tournament.id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.created @ PoolError::TournamentDoesNotExist
    )]
    pub tournament: Account<'info, Tournament>,

    #[account(
        mut,
        seeds = [b"vault", tournament.key().as_ref()],
        bump = tournament.vault_bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = player_token_account.owner == player.key() @ PoolError::TokenOwnerMismatch,
        constraint = player_token_account.mint == config.mint @ PoolError::MintMismatch
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn join_tournament(ctx: Context<JoinTournament>) -> Result<()> {
    let tournament = &mut ctx.accounts.tournament;
    let player = &ctx.accounts.player;

    tournament
        .check_join(&player.key())
        .map_err(PoolError::from)?;

    // Use snapshotted fee from tournament
    let fee = tournament.entry_fee;
    require!(
        ctx.accounts.player_token_account.amount >= fee,
        PoolError::NotEnoughFunds
    );
    let pool = tournament
        .prize_pool
        .checked_add(fee)
        .ok_or(PoolError::Overflow)?;

    // Collect the fee before recording anything
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.player_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: player.to_account_info(),
            },
        ),
        fee,
    )?;

    let clock = Clock::get()?;
    tournament.prize_pool = pool;
    tournament.players.push(player.key());
    tournament.stats.push(PlayerStats {
        score: 0,
        kills: 0,
        joined_at: clock.unix_timestamp,
    });

    emit!(PlayerJoined {
        id: tournament.id,
        player: player.key(),
        amount: fee,
    });
    msg!(
        "Player {} joined tournament {} ({}/{} players)",
        player.key(),
        tournament.id,
        tournament.players.len(),
        MAX_PLAYERS
    );

    Ok(())
}
