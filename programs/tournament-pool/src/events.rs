//! Program events

use anchor_lang::prelude::*;

#[event]
pub struct TournamentCreated {
    pub id: u64,
}

#[event]
pub struct TournamentStarted {
    pub id: u64,
}

#[event]
pub struct TournamentEnded {
    pub id: u64,
}

#[event]
pub struct PlayerJoined {
    pub id: u64,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PrizePoolDistributed {
    pub id: u64,
    pub owner_cut: u64,
    pub remaining_pool: u64,
}

#[event]
pub struct ResidualSwept {
    pub id: u64,
    pub amount: u64,
}
