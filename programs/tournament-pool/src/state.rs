//! Account state definitions

use anchor_lang::prelude::*;
use pool_ledger::{Address, Lifecycle, PayoutPolicy, PoolConfig, ResidualPolicy, Standing};

/// Maximum players per tournament (fixed; tournament accounts are sized for it)
pub const MAX_PLAYERS: usize = pool_ledger::MAX_PLAYERS;

/// Global configuration account
#[account]
#[derive(Default)]
pub struct Config {
    /// Admin who creates/starts/ends tournaments, pushes stats and withdraws
    pub admin: Pubkey,
    /// Wallet receiving the owner cut (and residual, unless retained)
    pub treasury: Pubkey,
    /// SPL mint entry fees are paid in
    pub mint: Pubkey,
    /// Entry fee for new tournaments (snapshotted at creation)
    pub entry_fee: u64,
    /// Operator cut of every prize pool, percent
    pub owner_cut_percent: u8,
    /// Shares of the post-cut pool for ranks 1-3, percent
    pub rank_shares_percent: [u8; 3],
    /// Abort withdrawal when a payout account is missing instead of skipping it
    pub strict_payouts: bool,
    /// Leave unclaimed funds in the vault instead of sweeping to treasury
    pub retain_residual: bool,
    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 +  // admin
        32 +  // treasury
        32 +  // mint
        8 +   // entry_fee
        1 +   // owner_cut_percent
        3 +   // rank_shares_percent
        1 +   // strict_payouts
        1 +   // retain_residual
        1 +   // bump
        32;   // padding for future fields

    /// Ledger view of this config, used for validation.
    pub fn pool_config(&self) -> PoolConfig {
        self.payout_terms().pool_config(self.entry_fee)
    }

    /// Terms a tournament created now is paid out under.
    pub fn payout_terms(&self) -> PayoutTerms {
        PayoutTerms {
            treasury: self.treasury,
            owner_cut_percent: self.owner_cut_percent,
            rank_shares_percent: self.rank_shares_percent,
            strict_payouts: self.strict_payouts,
            retain_residual: self.retain_residual,
        }
    }
}

/// Payout terms copied from `Config` when a tournament is created
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PayoutTerms {
    pub treasury: Pubkey,
    pub owner_cut_percent: u8,
    pub rank_shares_percent: [u8; 3],
    pub strict_payouts: bool,
    pub retain_residual: bool,
}

impl PayoutTerms {
    pub const LEN: usize = 32 + // treasury
        1 +   // owner_cut_percent
        3 +   // rank_shares_percent
        1 +   // strict_payouts
        1;    // retain_residual

    pub fn pool_config(&self, entry_fee: u64) -> PoolConfig {
        PoolConfig {
            entry_fee,
            beneficiary: to_address(&self.treasury),
            owner_cut_percent: self.owner_cut_percent,
            rank_shares_percent: self.rank_shares_percent,
            payout_policy: if self.strict_payouts {
                PayoutPolicy::Strict
            } else {
                PayoutPolicy::BestEffort
            },
            residual_policy: if self.retain_residual {
                ResidualPolicy::RetainInCustody
            } else {
                ResidualPolicy::ReturnToBeneficiary
            },
        }
    }
}

/// Per-player stats, indexed like `Tournament::players`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub score: u64,
    pub kills: u64,
    pub joined_at: i64,
}

/// Tournament account
///
/// Allocated once for `MAX_PLAYERS`; never closed.
#[account]
#[derive(Default)]
pub struct Tournament {
    /// Tournament ID (PDA seed)
    pub id: u64,
    /// Presence flag; an all-zero account has never been created
    pub created: bool,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Entry fee (snapshotted from config)
    pub entry_fee: u64,
    /// Cut, shares, treasury and policies (snapshotted from config)
    pub terms: PayoutTerms,
    /// Collected entry fees held in the vault
    pub prize_pool: u64,
    pub withdrawn: bool,
    /// Players in join order
    pub players: Vec<Pubkey>,
    /// Stats indexed like `players`
    pub stats: Vec<PlayerStats>,
    /// PDA bump seed
    pub bump: u8,
    /// Vault token account bump seed
    pub vault_bump: u8,
}

/// Bytes per player (32-byte pubkey + 24-byte stats)
pub const BYTES_PER_PLAYER: usize = 56;

impl Tournament {
    pub const SPACE: usize = 8 + // discriminator
        8 +   // id
        1 +   // created
        9 +   // start_time
        9 +   // end_time
        8 +   // entry_fee
        PayoutTerms::LEN +
        8 +   // prize_pool
        1 +   // withdrawn
        4 +   // players vec len
        4 +   // stats vec len
        MAX_PLAYERS * BYTES_PER_PLAYER +
        1 +   // bump
        1 +   // vault_bump
        16;   // padding

    /// Players with stats, in join order, for ranking.
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .zip(&self.stats)
            .map(|(player, stats)| Standing {
                player: to_address(player),
                score: stats.score,
                kills: stats.kills,
                joined_at: stats.joined_at,
            })
            .collect()
    }

    /// Ledger view of the terms this tournament pays out under.
    pub fn pool_config(&self) -> PoolConfig {
        self.terms.pool_config(self.entry_fee)
    }
}

impl Lifecycle for Tournament {
    type Player = Pubkey;

    fn id(&self) -> u64 {
        self.id
    }

    fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    fn is_withdrawn(&self) -> bool {
        self.withdrawn
    }

    fn prize_pool(&self) -> u64 {
        self.prize_pool
    }

    fn roster(&self) -> &[Pubkey] {
        &self.players
    }

    fn address_of(player: &Pubkey) -> Address {
        to_address(player)
    }
}

pub fn to_address(key: &Pubkey) -> Address {
    Address::new(key.to_bytes())
}

pub fn to_pubkey(address: &Address) -> Pubkey {
    Pubkey::new_from_array(address.to_bytes())
}
