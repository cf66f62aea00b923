//! Tournament record and its lifecycle transitions
//!
//! A tournament moves Created → Started → Ended → Settled. Every transition
//! checks its preconditions before touching any field, so a failed call
//! leaves the record exactly as it was.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::PoolConfig;
use crate::distribution::{plan_distribution, DistributionPlan};
use crate::error::{LedgerError, LedgerResult};
use crate::ranking::Standing;

/// Administrator-chosen tournament identifier. Zero is a valid id.
pub type TournamentId = u64;

/// Unix timestamp in seconds
pub type Timestamp = i64;

/// Hard cap on players per tournament
pub const MAX_PLAYERS: usize = 15;

/// Per-player stats pushed in by the admin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub score: u64,
    pub kills: u64,
    /// Set once on join, never changes
    pub joined_at: Timestamp,
}

/// Coarse lifecycle position, derived from the timestamps and flag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    Created,
    Started,
    Ended,
    Settled,
}

/// Lifecycle preconditions shared by every tournament representation.
///
/// The ledger record and the on-chain account both implement this, so join,
/// stats and withdrawal checks run in one order everywhere.
pub trait Lifecycle {
    type Player: PartialEq;

    fn id(&self) -> TournamentId;
    fn is_started(&self) -> bool;
    fn is_ended(&self) -> bool;
    fn is_withdrawn(&self) -> bool;
    fn prize_pool(&self) -> u64;
    /// Joined players in join order
    fn roster(&self) -> &[Self::Player];
    fn address_of(player: &Self::Player) -> Address;

    fn position_of(&self, player: &Self::Player) -> Option<usize> {
        self.roster().iter().position(|p| p == player)
    }

    fn has_joined(&self, player: &Self::Player) -> bool {
        self.position_of(player).is_some()
    }

    /// Join preconditions, in the order they are reported.
    fn check_join(&self, player: &Self::Player) -> LedgerResult<()> {
        if !self.is_started() {
            return Err(LedgerError::TournamentNotStarted(self.id()));
        }
        if self.is_ended() {
            return Err(LedgerError::TournamentAlreadyEnded(self.id()));
        }
        if self.roster().len() >= MAX_PLAYERS {
            return Err(LedgerError::MaxPlayersReached(self.id()));
        }
        if self.has_joined(player) {
            return Err(LedgerError::PlayerAlreadyJoined {
                id: self.id(),
                player: Self::address_of(player),
            });
        }
        Ok(())
    }

    /// Index of the stats slot to overwrite. A never-joined identity is
    /// reported as not started.
    fn check_stats_update(&self, player: &Self::Player) -> LedgerResult<usize> {
        let index = self
            .position_of(player)
            .ok_or(LedgerError::TournamentNotStarted(self.id()))?;
        if self.is_ended() {
            return Err(LedgerError::TournamentAlreadyEnded(self.id()));
        }
        Ok(index)
    }

    fn check_withdraw(&self) -> LedgerResult<()> {
        if !self.is_ended() {
            return Err(LedgerError::TournamentNotEnded(self.id()));
        }
        if self.is_withdrawn() {
            return Err(LedgerError::AlreadyWithdrawn(self.id()));
        }
        if self.prize_pool() == 0 {
            return Err(LedgerError::NothingToWithdraw(self.id()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    /// Fee, cut, shares, beneficiary and policies, frozen at creation
    pub terms: PoolConfig,
    pub prize_pool: u64,
    pub withdrawn: bool,
    /// Join order; index i owns `stats[i]`
    players: Vec<Address>,
    stats: Vec<PlayerStats>,
}

impl Tournament {
    pub fn new(id: TournamentId, terms: PoolConfig) -> Self {
        Self {
            id,
            start_time: None,
            end_time: None,
            terms,
            prize_pool: 0,
            withdrawn: false,
            players: Vec::with_capacity(MAX_PLAYERS),
            stats: Vec::with_capacity(MAX_PLAYERS),
        }
    }

    pub fn entry_fee(&self) -> u64 {
        self.terms.entry_fee
    }

    pub fn status(&self) -> TournamentStatus {
        if self.withdrawn {
            TournamentStatus::Settled
        } else if self.end_time.is_some() {
            TournamentStatus::Ended
        } else if self.start_time.is_some() {
            TournamentStatus::Started
        } else {
            TournamentStatus::Created
        }
    }

    pub fn players(&self) -> &[Address] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn stats_of(&self, player: &Address) -> Option<PlayerStats> {
        self.position_of(player).map(|i| self.stats[i])
    }

    /// Players with their stats, in join order.
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .zip(&self.stats)
            .map(|(player, stats)| Standing::new(*player, stats))
            .collect()
    }

    /// Payout for the current standings under this tournament's own terms.
    pub fn plan(&self) -> LedgerResult<DistributionPlan> {
        plan_distribution(self.prize_pool, &self.standings(), &self.terms)
    }

    pub fn start(&mut self, now: Timestamp) -> LedgerResult<()> {
        if self.is_started() {
            return Err(LedgerError::TournamentAlreadyStarted(self.id));
        }
        self.start_time = Some(now);
        Ok(())
    }

    /// Ending does not require a start; a never-started tournament ends empty.
    pub fn end(&mut self, now: Timestamp) -> LedgerResult<()> {
        if self.is_ended() {
            return Err(LedgerError::TournamentAlreadyEnded(self.id));
        }
        self.end_time = Some(now);
        Ok(())
    }

    /// Record a join whose fee has already been collected.
    pub fn record_join(&mut self, player: Address, now: Timestamp) -> LedgerResult<()> {
        self.check_join(&player)?;
        let pool = self
            .prize_pool
            .checked_add(self.entry_fee())
            .ok_or(LedgerError::Overflow)?;

        self.prize_pool = pool;
        self.players.push(player);
        self.stats.push(PlayerStats {
            score: 0,
            kills: 0,
            joined_at: now,
        });
        Ok(())
    }

    /// Overwrite a player's score and kills. Latest write wins.
    pub fn update_stats(&mut self, player: &Address, score: u64, kills: u64) -> LedgerResult<()> {
        let index = self.check_stats_update(player)?;
        let stats = &mut self.stats[index];
        stats.score = score;
        stats.kills = kills;
        Ok(())
    }

    /// Flip the one-shot flag. Must happen before any payout transfer.
    pub fn mark_withdrawn(&mut self) -> LedgerResult<()> {
        self.check_withdraw()?;
        self.withdrawn = true;
        Ok(())
    }
}

impl Lifecycle for Tournament {
    type Player = Address;

    fn id(&self) -> TournamentId {
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

    fn roster(&self) -> &[Address] {
        &self.players
    }

    fn address_of(player: &Address) -> Address {
        *player
    }
}
