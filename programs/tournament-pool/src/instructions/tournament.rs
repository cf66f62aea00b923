//! Tournament lifecycle instructions

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use pool_ledger::{plan_distribution, Lifecycle, PayoutKind};

use crate::error::PoolError;
use crate::events::{
    PrizePoolDistributed, ResidualSwept, TournamentCreated, TournamentEnded, TournamentStarted,
};
use crate::state::{to_pubkey, Config, Tournament, MAX_PLAYERS};

/// Create a tournament under an admin-chosen id
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct CreateTournament<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ PoolError::Unauthorized,
        has_one = mint @ PoolError::MintMismatch
    )]
    pub config: Account<'info, Config>,

    /// init_if_needed so an existing id reports TournamentAlreadyExists
    #[account(
        init_if_needed,
        payer = admin,
        space = Tournament::SPACE,
        seeds = [b"tournament", id.to_le_bytes().as_ref()],
        bump
    )]
    pub tournament: Account<'info, Tournament>,

    /// Pooled custody for entry fees, owned by the tournament PDA
    #[account(
        init_if_needed,
        payer = admin,
        token::mint = mint,
        token::authority = tournament,
        seeds = [b"vault", tournament.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn create_tournament(ctx: Context<CreateTournament>, id: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let tournament = &mut ctx.accounts.tournament;

    require!(!tournament.created, PoolError::TournamentAlreadyExists);

    tournament.id = id;
    tournament.created = true;
    tournament.start_time = None;
    tournament.end_time = None;
    tournament.entry_fee = config.entry_fee;
    tournament.terms = config.payout_terms();
    tournament.prize_pool = 0;
    tournament.withdrawn = false;
    tournament.players = Vec::with_capacity(MAX_PLAYERS);
    tournament.stats = Vec::with_capacity(MAX_PLAYERS);
    tournament.bump = ctx.bumps.tournament;
    tournament.vault_bump = ctx.bumps.vault;

    emit!(TournamentCreated { id });
    msg!("Tournament {} created, entry fee {}", id, tournament.entry_fee);

    Ok(())
}

/// Shared accounts for admin-only transitions on an existing tournament
#[derive(Accounts)]
pub struct AdminTournament<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ PoolError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"tournament", tournament.id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.created @ PoolError::TournamentDoesNotExist
    )]
    pub tournament: Account<'info, Tournament>,

    pub admin: Signer<'info>,
}

pub fn start_tournament(ctx: Context<AdminTournament>) -> Result<()> {
    let tournament = &mut ctx.accounts.tournament;

    require!(!tournament.is_started(), PoolError::TournamentAlreadyStarted);

    let clock = Clock::get()?;
    tournament.start_time = Some(clock.unix_timestamp);

    emit!(TournamentStarted { id: tournament.id });
    msg!("Tournament {} started at {}", tournament.id, clock.unix_timestamp);

    Ok(())
}

/// End a tournament. A never-started tournament may be ended (it stays empty).
pub fn end_tournament(ctx: Context<AdminTournament>) -> Result<()> {
    let tournament = &mut ctx.accounts.tournament;

    require!(!tournament.is_ended(), PoolError::TournamentAlreadyEnded);

    let clock = Clock::get()?;
    tournament.end_time = Some(clock.unix_timestamp);

    emit!(TournamentEnded { id: tournament.id });
    msg!(
        "Tournament {} ended with {} players, pool {}",
        tournament.id,
        tournament.players.len(),
        tournament.prize_pool
    );

    Ok(())
}

/// Overwrite a joined player's score and kills while the tournament is open
pub fn update_player_stats(
    ctx: Context<AdminTournament>,
    player: Pubkey,
    score: u64,
    kills: u64,
) -> Result<()> {
    let tournament = &mut ctx.accounts.tournament;

    let index = tournament
        .check_stats_update(&player)
        .map_err(PoolError::from)?;

    let stats = &mut tournament.stats[index];
    stats.score = score;
    stats.kills = kills;

    msg!(
        "Tournament {}: {} score={} kills={}",
        tournament.id,
        player,
        score,
        kills
    );

    Ok(())
}

/// Withdraw and distribute the prize pool of an ended tournament
#[derive(Accounts)]
pub struct WithdrawPrizePool<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ PoolError::Unauthorized
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
        constraint = treasury_token_account.owner == tournament.terms.treasury @ PoolError::TokenOwnerMismatch,
        constraint = treasury_token_account.mint == config.mint @ PoolError::MintMismatch
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Player token accounts passed via remaining_accounts
}

pub fn withdraw_prize_pool<'info>(
    ctx: Context<'_, '_, '_, 'info, WithdrawPrizePool<'info>>,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let tournament_info = ctx.accounts.tournament.to_account_info();
    let tournament = &mut ctx.accounts.tournament;

    tournament.check_withdraw().map_err(PoolError::from)?;

    // Terms frozen at creation
    let strict = tournament.terms.strict_payouts;
    let plan = plan_distribution(
        tournament.prize_pool,
        &tournament.standings(),
        &tournament.pool_config(),
    )
    .map_err(PoolError::from)?;

    // Single-shot: flagged before the first transfer
    tournament.withdrawn = true;

    let id = tournament.id;
    let id_bytes = id.to_le_bytes();
    let bump = [tournament.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[b"tournament", id_bytes.as_ref(), &bump]];

    let mut residual_swept = 0u64;
    for transfer in &plan.transfers {
        let destination = match transfer.kind {
            PayoutKind::OwnerCut | PayoutKind::Residual => {
                Some(ctx.accounts.treasury_token_account.to_account_info())
            }
            _ => find_payout_account(
                ctx.remaining_accounts,
                &to_pubkey(&transfer.recipient),
                &config.mint,
            ),
        };

        let Some(destination) = destination else {
            require!(!strict, PoolError::InvalidPayoutAccount);
            msg!(
                "Skipping {:?} payout of {} to {}: no valid token account",
                transfer.kind,
                transfer.amount,
                to_pubkey(&transfer.recipient)
            );
            continue;
        };

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: destination,
                    authority: tournament_info.clone(),
                },
                signer_seeds,
            ),
            transfer.amount,
        )?;

        if transfer.kind == PayoutKind::Residual {
            residual_swept = transfer.amount;
        }
    }

    emit!(PrizePoolDistributed {
        id,
        owner_cut: plan.owner_cut,
        remaining_pool: plan.reported_remaining(),
    });
    if residual_swept > 0 {
        emit!(ResidualSwept {
            id,
            amount: residual_swept,
        });
    }

    msg!(
        "Tournament {} settled: owner cut {}, {} to {} players, residual {}",
        id,
        plan.owner_cut,
        plan.player_total(),
        plan.ranked.len(),
        plan.residual
    );

    Ok(())
}

/// Find a writable token account for `owner` in the configured mint
fn find_payout_account<'info>(
    remaining_accounts: &[AccountInfo<'info>],
    owner: &Pubkey,
    mint: &Pubkey,
) -> Option<AccountInfo<'info>> {
    for account in remaining_accounts {
        if !account.is_writable || account.owner != &token::ID {
            continue;
        }
        let Ok(data) = account.try_borrow_data() else {
            continue;
        };
        let Ok(token_account) = TokenAccount::try_deserialize(&mut &data[..]) else {
            continue;
        };
        if token_account.owner == *owner && token_account.mint == *mint {
            return Some(account.clone());
        }
    }
    None
}
