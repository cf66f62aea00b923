//! Ledger error types

use thiserror::Error;

use crate::address::Address;
use crate::tournament::TournamentId;

/// Failure reported by the external value-transfer capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("insufficient allowance: approved {approved}, required {required}")]
    InsufficientAllowance { approved: u64, required: u64 },

    #[error("recipient {0} cannot receive funds")]
    RecipientRejected(Address),

    #[error("custody holds {held}, cannot release {required}")]
    CustodyShortfall { held: u64, required: u64 },

    #[error("balance of {0} would overflow")]
    BalanceOverflow(Address),
}

/// Every named failure a ledger operation can surface.
///
/// Precondition failures leave the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("tournament {0} already exists")]
    TournamentAlreadyExists(TournamentId),

    #[error("tournament {0} does not exist")]
    TournamentDoesNotExist(TournamentId),

    #[error("tournament {0} has already started")]
    TournamentAlreadyStarted(TournamentId),

    #[error("tournament {0} has already ended")]
    TournamentAlreadyEnded(TournamentId),

    /// Also raised by stats updates for an identity that never joined.
    #[error("tournament {0} has not started")]
    TournamentNotStarted(TournamentId),

    #[error("tournament {0} has not ended")]
    TournamentNotEnded(TournamentId),

    #[error("player {player} already joined tournament {id}")]
    PlayerAlreadyJoined { id: TournamentId, player: Address },

    #[error("tournament {0} has reached maximum players")]
    MaxPlayersReached(TournamentId),

    #[error("entry fee could not be collected: {0}")]
    NotEnoughFunds(TransferError),

    #[error("prize pool of tournament {0} already withdrawn")]
    AlreadyWithdrawn(TournamentId),

    #[error("prize pool of tournament {0} is empty")]
    NothingToWithdraw(TournamentId),

    #[error("caller {0} is not authorized")]
    Unauthorized(Address),

    #[error("payout of {amount} to {recipient} failed: {source}")]
    PayoutHalted {
        recipient: Address,
        amount: u64,
        source: TransferError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
