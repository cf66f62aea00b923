//! Prize distribution planning
//!
//! Turns a prize pool and a set of standings into an ordered list of
//! transfers. Planning is pure; executing the plan is the registry's (or the
//! on-chain program's) job.
//!
//! Order: operator cut, rank 1, rank 2, rank 3, each rank 4+, dust to rank 1,
//! then residual to the beneficiary when the residual policy says so.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{PoolConfig, ResidualPolicy};
use crate::error::{LedgerError, LedgerResult};
use crate::ranking::{rank_players, Standing};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutKind {
    OwnerCut,
    /// Percentage share for ranks 1–3 (1-based)
    Ranked(u8),
    /// Equal share of the rank-4+ bucket (1-based rank)
    Shared(u8),
    /// Floor-division remainder of the rank-4+ bucket, paid to rank 1
    Dust,
    /// Funds no player is entitled to
    Residual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTransfer {
    pub recipient: Address,
    pub amount: u64,
    pub kind: PayoutKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPlan {
    pub prize_pool: u64,
    pub owner_cut: u64,
    pub remaining_pool: u64,
    /// Final ranking, first place at index 0
    pub ranked: Vec<Standing>,
    /// Zero-amount transfers are omitted
    pub transfers: Vec<PlannedTransfer>,
    /// Post-cut funds not owed to any player
    pub residual: u64,
}

impl DistributionPlan {
    /// Remaining pool as reported in the distribution event: zero when no
    /// player was paid.
    pub fn reported_remaining(&self) -> u64 {
        if self.ranked.is_empty() {
            0
        } else {
            self.remaining_pool
        }
    }

    /// Total that goes to players, dust included.
    pub fn player_total(&self) -> u64 {
        self.transfers
            .iter()
            .filter(|t| !matches!(t.kind, PayoutKind::OwnerCut | PayoutKind::Residual))
            .map(|t| t.amount)
            .sum()
    }

    /// Amount this recipient receives across all of its transfers.
    pub fn amount_for(&self, recipient: &Address) -> u64 {
        self.transfers
            .iter()
            .filter(|t| &t.recipient == recipient)
            .map(|t| t.amount)
            .sum()
    }
}

/// `floor(amount * percent / 100)` without intermediate overflow.
pub fn percent_of(amount: u64, percent: u8) -> LedgerResult<u64> {
    let scaled = (amount as u128) * (percent as u128) / 100;
    u64::try_from(scaled).map_err(|_| LedgerError::Overflow)
}

/// Plan the full payout of `prize_pool` across `standings` (given in join order).
pub fn plan_distribution(
    prize_pool: u64,
    standings: &[Standing],
    config: &PoolConfig,
) -> LedgerResult<DistributionPlan> {
    let owner_cut = percent_of(prize_pool, config.owner_cut_percent)?;
    let remaining_pool = prize_pool.checked_sub(owner_cut).ok_or(LedgerError::Overflow)?;
    let ranked = rank_players(standings);

    let mut transfers = Vec::with_capacity(ranked.len() + 3);
    push_transfer(&mut transfers, config.beneficiary, owner_cut, PayoutKind::OwnerCut);

    let mut paid_top = 0u64;
    for (rank, (standing, &share)) in ranked.iter().zip(&config.rank_shares_percent).enumerate() {
        let amount = percent_of(remaining_pool, share)?;
        paid_top = paid_top.checked_add(amount).ok_or(LedgerError::Overflow)?;
        push_transfer(&mut transfers, standing.player, amount, PayoutKind::Ranked(rank as u8 + 1));
    }

    let mut players_paid = paid_top;
    let top_count = config.rank_shares_percent.len();
    if ranked.len() > top_count {
        let others = &ranked[top_count..];
        let others_total = remaining_pool.checked_sub(paid_top).ok_or(LedgerError::Overflow)?;
        let count = others.len() as u64;
        let each = others_total / count;
        let dust = others_total % count;

        for (offset, standing) in others.iter().enumerate() {
            let rank = (top_count + offset + 1) as u8;
            push_transfer(&mut transfers, standing.player, each, PayoutKind::Shared(rank));
        }
        push_transfer(&mut transfers, ranked[0].player, dust, PayoutKind::Dust);
        players_paid = remaining_pool;
    }

    let residual = remaining_pool - players_paid;
    if config.residual_policy == ResidualPolicy::ReturnToBeneficiary {
        push_transfer(&mut transfers, config.beneficiary, residual, PayoutKind::Residual);
    }

    log::debug!(
        "planned distribution: pool {} cut {} remaining {} players {} residual {}",
        prize_pool,
        owner_cut,
        remaining_pool,
        ranked.len(),
        residual
    );

    Ok(DistributionPlan {
        prize_pool,
        owner_cut,
        remaining_pool,
        ranked,
        transfers,
        residual,
    })
}

fn push_transfer(
    transfers: &mut Vec<PlannedTransfer>,
    recipient: Address,
    amount: u64,
    kind: PayoutKind,
) {
    if amount > 0 {
        transfers.push(PlannedTransfer { recipient, amount, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beneficiary() -> Address {
        Address::from_seed(1_000)
    }

    fn config() -> PoolConfig {
        PoolConfig::new(25, beneficiary())
    }

    /// Players with descending scores, so join order == rank order.
    fn ordered_standings(n: usize) -> Vec<Standing> {
        (0..n)
            .map(|i| Standing {
                player: Address::from_seed(i as u64),
                score: (100 - i) as u64,
                kills: 0,
                joined_at: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_four_players_of_hundred() {
        let players = ordered_standings(4);
        let plan = plan_distribution(100, &players, &config()).unwrap();

        assert_eq!(plan.owner_cut, 10);
        assert_eq!(plan.remaining_pool, 90);
        assert_eq!(plan.amount_for(&players[0].player), 27);
        assert_eq!(plan.amount_for(&players[1].player), 18);
        assert_eq!(plan.amount_for(&players[2].player), 9);
        assert_eq!(plan.amount_for(&players[3].player), 36);
        assert_eq!(plan.residual, 0);
        assert_eq!(plan.reported_remaining(), 90);
    }

    #[test]
    fn test_transfer_order() {
        let players = ordered_standings(6);
        let plan = plan_distribution(1_000, &players, &config()).unwrap();
        let kinds: Vec<_> = plan.transfers.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PayoutKind::OwnerCut,
                PayoutKind::Ranked(1),
                PayoutKind::Ranked(2),
                PayoutKind::Ranked(3),
                PayoutKind::Shared(4),
                PayoutKind::Shared(5),
                PayoutKind::Shared(6),
            ]
        );
    }

    #[test]
    fn test_five_players_dust_to_first() {
        // pool 101: cut 10, remaining 91 -> 27, 18, 9, others 37 split 2 ways = 18 + 18, dust 1
        let players = ordered_standings(5);
        let plan = plan_distribution(101, &players, &config()).unwrap();

        assert_eq!(plan.owner_cut, 10);
        assert_eq!(plan.remaining_pool, 91);
        assert_eq!(plan.amount_for(&players[0].player), 27 + 1);
        assert_eq!(plan.amount_for(&players[3].player), 18);
        assert_eq!(plan.amount_for(&players[4].player), 18);
        let last = plan.transfers.last().unwrap();
        assert_eq!(last.kind, PayoutKind::Dust);
        assert_eq!(last.recipient, players[0].player);
        assert_eq!(plan.player_total(), 91);
    }

    #[test]
    fn test_two_players_leave_residual() {
        let players = ordered_standings(2);
        let plan = plan_distribution(100, &players, &config()).unwrap();

        assert_eq!(plan.amount_for(&players[0].player), 27);
        assert_eq!(plan.amount_for(&players[1].player), 18);
        assert_eq!(plan.residual, 45);
        assert_eq!(plan.amount_for(&beneficiary()), 10 + 45);
    }

    #[test]
    fn test_residual_retained_in_custody() {
        let players = ordered_standings(3);
        let cfg = config().with_residual_policy(ResidualPolicy::RetainInCustody);
        let plan = plan_distribution(100, &players, &cfg).unwrap();

        assert_eq!(plan.residual, 36);
        assert_eq!(plan.amount_for(&beneficiary()), 10);
        assert!(plan.transfers.iter().all(|t| t.kind != PayoutKind::Residual));
    }

    #[test]
    fn test_no_players() {
        let plan = plan_distribution(50, &[], &config()).unwrap();
        assert_eq!(plan.owner_cut, 5);
        assert_eq!(plan.remaining_pool, 45);
        assert_eq!(plan.reported_remaining(), 0);
        assert_eq!(plan.residual, 45);
        assert_eq!(plan.player_total(), 0);
    }

    #[test]
    fn test_zero_amounts_skipped() {
        // pool 3: cut 0, remaining 3 -> rank shares all floor to 0
        let players = ordered_standings(1);
        let cfg = config().with_residual_policy(ResidualPolicy::RetainInCustody);
        let plan = plan_distribution(3, &players, &cfg).unwrap();
        assert!(plan.transfers.is_empty());
        assert_eq!(plan.residual, 3);
    }

    #[test]
    fn test_percent_of_large_values() {
        assert_eq!(percent_of(u64::MAX, 100).unwrap(), u64::MAX);
        assert_eq!(percent_of(u64::MAX, 10).unwrap(), u64::MAX / 10);
        assert_eq!(percent_of(99, 10).unwrap(), 9);
    }
}
