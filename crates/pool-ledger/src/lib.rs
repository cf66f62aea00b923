//! Pool Ledger for Tournament Pool
//!
//! Core logic for fee-funded tournaments: the lifecycle state machine, player
//! ranking and the prize distribution rule. This crate is compiled to:
//! - Native (for the on-chain program and off-chain simulations)
//! - WASM (for frontend payout previews)

mod address;
mod config;
mod distribution;
mod error;
mod events;
mod ranking;
mod registry;
mod tournament;
mod vault;

#[cfg(feature = "wasm")]
mod wasm;

pub use address::Address;
pub use config::{
    ConfigUpdate, PayoutPolicy, PoolConfig, ResidualPolicy, DEFAULT_OWNER_CUT_PERCENT,
    DEFAULT_RANK_SHARES_PERCENT,
};
pub use distribution::{percent_of, plan_distribution, DistributionPlan, PayoutKind, PlannedTransfer};
pub use error::{LedgerError, LedgerResult, TransferError};
pub use events::TournamentEvent;
pub use ranking::{compare, rank_players, Standing};
pub use registry::{Authorizer, FailedPayout, Registry, Settlement, SingleAdmin};
pub use tournament::{
    Lifecycle, PlayerStats, Timestamp, Tournament, TournamentId, TournamentStatus, MAX_PLAYERS,
};
pub use vault::{InMemoryVault, TokenVault};
