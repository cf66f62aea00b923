//! Tournament Pool - fee-funded tournaments with ranked payouts
//!
//! A Solana program that collects SPL-token entry fees into a per-tournament
//! vault, tracks admin-reported stats, and on withdrawal splits the pool
//! between the treasury and the top-ranked players.

use anchor_lang::prelude::*;

mod error;
mod events;
mod instructions;
mod state;

use instructions::*;
pub use error::PoolError;
pub use state::{Config, PlayerStats, Tournament, MAX_PLAYERS};

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Tournament Pool",
    project_url: "https://example.com/tournament-pool",
    contacts: "email:security@example.com",
    policy: "https://example.com/tournament-pool/security"
}

declare_id!("6pUQdhStRMZvC7W78JjhNnHUEihGPhsyDcNK5jo8VVVV");

#[program]
pub mod tournament_pool {
    use super::*;

    /// Initialize the global config (one-time setup)
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::admin::initialize_config(ctx, params)
    }

    /// Update config parameters (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        params: UpdateConfigParams,
    ) -> Result<()> {
        instructions::admin::update_config(ctx, params)
    }

    /// Create a tournament with the current entry fee (admin only)
    pub fn create_tournament(ctx: Context<CreateTournament>, id: u64) -> Result<()> {
        instructions::tournament::create_tournament(ctx, id)
    }

    /// Open joining (admin only)
    pub fn start_tournament(ctx: Context<AdminTournament>) -> Result<()> {
        instructions::tournament::start_tournament(ctx)
    }

    /// Freeze membership and stats (admin only)
    pub fn end_tournament(ctx: Context<AdminTournament>) -> Result<()> {
        instructions::tournament::end_tournament(ctx)
    }

    /// Join a started tournament, paying the entry fee
    pub fn join_tournament(ctx: Context<JoinTournament>) -> Result<()> {
        instructions::player::join_tournament(ctx)
    }

    /// Overwrite a player's score and kills (admin only)
    pub fn update_player_stats(
        ctx: Context<AdminTournament>,
        player: Pubkey,
        score: u64,
        kills: u64,
    ) -> Result<()> {
        instructions::tournament::update_player_stats(ctx, player, score, kills)
    }

    /// Distribute the prize pool of an ended tournament (admin only, once)
    pub fn withdraw_prize_pool<'info>(
        ctx: Context<'_, '_, '_, 'info, WithdrawPrizePool<'info>>,
    ) -> Result<()> {
        instructions::tournament::withdraw_prize_pool(ctx)
    }
}
