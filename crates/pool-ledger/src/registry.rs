//! Tournament registry
//!
//! Owns every tournament record, gates admin operations through an
//! [`Authorizer`], collects fees and pays prizes through a [`TokenVault`], and
//! records a [`TournamentEvent`] for each successful state change.
//!
//! Operations take `&mut self`, so they run one at a time and never observe a
//! half-applied change.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::address::Address;
use crate::config::{ConfigUpdate, PayoutPolicy, PoolConfig};
use crate::distribution::{DistributionPlan, PayoutKind, PlannedTransfer};
use crate::error::{LedgerError, LedgerResult, TransferError};
use crate::events::TournamentEvent;
use crate::ranking::{rank_players, Standing};
use crate::tournament::{Lifecycle, PlayerStats, Timestamp, Tournament, TournamentId};
use crate::vault::TokenVault;

/// Capability check applied before any admin operation.
pub trait Authorizer {
    fn is_authorized(&self, caller: &Address) -> bool;
}

/// One admin identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleAdmin(pub Address);

impl Authorizer for SingleAdmin {
    fn is_authorized(&self, caller: &Address) -> bool {
        *caller == self.0
    }
}

impl<F> Authorizer for F
where
    F: Fn(&Address) -> bool,
{
    fn is_authorized(&self, caller: &Address) -> bool {
        self(caller)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedPayout {
    pub transfer: PlannedTransfer,
    pub error: TransferError,
}

/// Outcome of a withdrawal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub id: TournamentId,
    pub plan: DistributionPlan,
    /// Transfers the vault refused (best-effort policy only)
    pub failed: Vec<FailedPayout>,
}

impl Settlement {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Registry<V, A> {
    config: PoolConfig,
    vault: V,
    authorizer: A,
    tournaments: BTreeMap<TournamentId, Tournament>,
    events: Vec<TournamentEvent>,
}

impl<V: TokenVault, A: Authorizer> Registry<V, A> {
    pub fn new(config: PoolConfig, vault: V, authorizer: A) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vault,
            authorizer,
            tournaments: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    fn authorize(&self, caller: &Address) -> LedgerResult<()> {
        if self.authorizer.is_authorized(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(*caller))
        }
    }

    /// Update config. Existing tournaments keep the terms they were created with.
    pub fn update_config(&mut self, caller: &Address, update: ConfigUpdate) -> LedgerResult<()> {
        self.authorize(caller)?;
        self.config.apply(update)?;
        info!("Config updated by {}", caller);
        Ok(())
    }

    pub fn create_tournament(&mut self, caller: &Address, id: TournamentId) -> LedgerResult<()> {
        self.authorize(caller)?;
        if self.tournaments.contains_key(&id) {
            return Err(LedgerError::TournamentAlreadyExists(id));
        }

        let tournament = Tournament::new(id, self.config.clone());
        info!("Tournament {} created, entry fee {}", id, tournament.entry_fee());
        self.tournaments.insert(id, tournament);
        self.events.push(TournamentEvent::Created { id });
        Ok(())
    }

    pub fn start_tournament(
        &mut self,
        caller: &Address,
        id: TournamentId,
        now: Timestamp,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))?;
        tournament.start(now)?;

        info!("Tournament {} started at {}", id, now);
        self.events.push(TournamentEvent::Started { id });
        Ok(())
    }

    pub fn end_tournament(
        &mut self,
        caller: &Address,
        id: TournamentId,
        now: Timestamp,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))?;
        tournament.end(now)?;

        info!(
            "Tournament {} ended at {} with {} players, pool {}",
            id,
            now,
            tournament.player_count(),
            tournament.prize_pool
        );
        self.events.push(TournamentEvent::Ended { id });
        Ok(())
    }

    /// Join as `player`. The fee is collected before anything is recorded.
    pub fn join_tournament(
        &mut self,
        player: &Address,
        id: TournamentId,
        now: Timestamp,
    ) -> LedgerResult<()> {
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))?;
        tournament.check_join(player)?;
        // Reject before the fee is collected
        tournament
            .prize_pool
            .checked_add(tournament.entry_fee())
            .ok_or(LedgerError::Overflow)?;

        let amount = tournament.entry_fee();
        self.vault
            .transfer_in(player, amount)
            .map_err(LedgerError::NotEnoughFunds)?;
        tournament.record_join(*player, now)?;

        info!(
            "Player {} joined tournament {} ({}/{} players)",
            player,
            id,
            tournament.player_count(),
            crate::MAX_PLAYERS
        );
        self.events.push(TournamentEvent::Joined {
            id,
            player: *player,
            amount,
        });
        Ok(())
    }

    pub fn update_player_stats(
        &mut self,
        caller: &Address,
        id: TournamentId,
        player: &Address,
        score: u64,
        kills: u64,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))?;
        tournament.update_stats(player, score, kills)?;
        debug!("Tournament {}: {} score={} kills={}", id, player, score, kills);
        Ok(())
    }

    /// Pay out a closed tournament's pool. Runs at most once per tournament.
    ///
    /// The withdrawn flag is set before the first transfer and stays set
    /// whatever the transfers do.
    pub fn withdraw_prize_pool(
        &mut self,
        caller: &Address,
        id: TournamentId,
    ) -> LedgerResult<Settlement> {
        self.authorize(caller)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))?;
        tournament.check_withdraw()?;

        let plan = tournament.plan()?;
        let strict = tournament.terms.payout_policy == PayoutPolicy::Strict;
        tournament.mark_withdrawn()?;

        let mut failed = Vec::new();
        let mut residual_swept = 0u64;
        for transfer in &plan.transfers {
            match self.vault.transfer_out(&transfer.recipient, transfer.amount) {
                Ok(()) => {
                    if transfer.kind == PayoutKind::Residual {
                        residual_swept = transfer.amount;
                    }
                }
                Err(error) => {
                    warn!(
                        "Tournament {}: payout {:?} of {} to {} failed: {}",
                        id, transfer.kind, transfer.amount, transfer.recipient, error
                    );
                    if strict {
                        return Err(LedgerError::PayoutHalted {
                            recipient: transfer.recipient,
                            amount: transfer.amount,
                            source: error,
                        });
                    }
                    failed.push(FailedPayout {
                        transfer: *transfer,
                        error,
                    });
                }
            }
        }

        self.events.push(TournamentEvent::Distributed {
            id,
            owner_cut: plan.owner_cut,
            remaining_pool: plan.reported_remaining(),
        });
        if residual_swept > 0 {
            self.events.push(TournamentEvent::ResidualSwept {
                id,
                amount: residual_swept,
            });
        }

        info!(
            "Tournament {} settled: owner cut {}, {} to {} players, residual {} ({} failed transfers)",
            id,
            plan.owner_cut,
            plan.player_total(),
            plan.ranked.len(),
            plan.residual,
            failed.len()
        );

        Ok(Settlement { id, plan, failed })
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }

    fn existing(&self, id: TournamentId) -> LedgerResult<&Tournament> {
        self.tournaments
            .get(&id)
            .ok_or(LedgerError::TournamentDoesNotExist(id))
    }

    pub fn player_stats(
        &self,
        id: TournamentId,
        player: &Address,
    ) -> LedgerResult<Option<PlayerStats>> {
        Ok(self.existing(id)?.stats_of(player))
    }

    /// Current ranking, first place at index 0.
    pub fn leaderboard(&self, id: TournamentId) -> LedgerResult<Vec<Standing>> {
        Ok(rank_players(&self.existing(id)?.standings()))
    }

    /// What a withdrawal would pay right now. No side effects.
    pub fn preview_distribution(&self, id: TournamentId) -> LedgerResult<DistributionPlan> {
        self.existing(id)?.plan()
    }

    pub fn events(&self) -> &[TournamentEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<TournamentEvent> {
        std::mem::take(&mut self.events)
    }
}
