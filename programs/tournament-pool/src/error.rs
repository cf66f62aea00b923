//! Program error codes

use anchor_lang::prelude::*;
use pool_ledger::LedgerError;

#[error_code]
pub enum PoolError {
    #[msg("Tournament already exists")]
    TournamentAlreadyExists = 6000,

    #[msg("Tournament does not exist")]
    TournamentDoesNotExist = 6001,

    #[msg("Tournament has already started")]
    TournamentAlreadyStarted = 6002,

    #[msg("Tournament has already ended")]
    TournamentAlreadyEnded = 6003,

    #[msg("Tournament has not started (or player has not joined)")]
    TournamentNotStarted = 6004,

    #[msg("Tournament has not ended")]
    TournamentNotEnded = 6005,

    #[msg("Player has already joined this tournament")]
    PlayerAlreadyJoined = 6006,

    #[msg("Tournament has reached maximum players")]
    MaxPlayersReached = 6007,

    #[msg("Not enough funds to pay the entry fee")]
    NotEnoughFunds = 6008,

    #[msg("Prize pool already withdrawn")]
    AlreadyWithdrawn = 6009,

    #[msg("Prize pool is empty")]
    NothingToWithdraw = 6010,

    #[msg("Not authorized to perform this action")]
    Unauthorized = 6011,

    #[msg("Token account mint does not match the configured mint")]
    MintMismatch = 6012,

    #[msg("Token account is not owned by the expected wallet")]
    TokenOwnerMismatch = 6013,

    #[msg("Missing or invalid payout token account in remaining_accounts")]
    InvalidPayoutAccount = 6014,

    #[msg("Invalid configuration")]
    InvalidConfig = 6015,

    #[msg("Arithmetic overflow")]
    Overflow = 6016,
}

impl From<LedgerError> for PoolError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::TournamentAlreadyExists(_) => PoolError::TournamentAlreadyExists,
            LedgerError::TournamentDoesNotExist(_) => PoolError::TournamentDoesNotExist,
            LedgerError::TournamentAlreadyStarted(_) => PoolError::TournamentAlreadyStarted,
            LedgerError::TournamentAlreadyEnded(_) => PoolError::TournamentAlreadyEnded,
            LedgerError::TournamentNotStarted(_) => PoolError::TournamentNotStarted,
            LedgerError::TournamentNotEnded(_) => PoolError::TournamentNotEnded,
            LedgerError::PlayerAlreadyJoined { .. } => PoolError::PlayerAlreadyJoined,
            LedgerError::MaxPlayersReached(_) => PoolError::MaxPlayersReached,
            LedgerError::NotEnoughFunds(_) => PoolError::NotEnoughFunds,
            LedgerError::AlreadyWithdrawn(_) => PoolError::AlreadyWithdrawn,
            LedgerError::NothingToWithdraw(_) => PoolError::NothingToWithdraw,
            LedgerError::Unauthorized(_) => PoolError::Unauthorized,
            LedgerError::PayoutHalted { .. } => PoolError::InvalidPayoutAccount,
            LedgerError::InvalidConfig(_) => PoolError::InvalidConfig,
            LedgerError::Overflow => PoolError::Overflow,
        }
    }
}
