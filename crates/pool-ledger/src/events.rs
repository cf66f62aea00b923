//! Notifications emitted by ledger operations

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::tournament::TournamentId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TournamentEvent {
    Created {
        id: TournamentId,
    },
    Started {
        id: TournamentId,
    },
    Ended {
        id: TournamentId,
    },
    Joined {
        id: TournamentId,
        player: Address,
        amount: u64,
    },
    /// `remaining_pool` is zero when nobody joined
    Distributed {
        id: TournamentId,
        owner_cut: u64,
        remaining_pool: u64,
    },
    ResidualSwept {
        id: TournamentId,
        amount: u64,
    },
}

impl TournamentEvent {
    pub fn tournament_id(&self) -> TournamentId {
        match self {
            Self::Created { id }
            | Self::Started { id }
            | Self::Ended { id }
            | Self::Joined { id, .. }
            | Self::Distributed { id, .. }
            | Self::ResidualSwept { id, .. } => *id,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
