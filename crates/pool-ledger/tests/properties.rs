//! Property tests for the ledger's solvency and membership invariants.

use pool_ledger::{
    plan_distribution, Address, InMemoryVault, LedgerError, Lifecycle, PayoutKind, PoolConfig,
    Registry, ResidualPolicy, SingleAdmin, Standing, TournamentId, MAX_PLAYERS,
};
use proptest::prelude::*;

const FEE: u64 = 7;

fn admin() -> Address {
    Address::from_seed(u64::MAX)
}

fn treasury() -> Address {
    Address::from_seed(u64::MAX - 1)
}

#[derive(Clone, Debug)]
enum Op {
    Create(TournamentId),
    Start(TournamentId),
    End(TournamentId),
    Join(TournamentId, u64),
    Stats(TournamentId, u64, u64, u64),
    Withdraw(TournamentId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 0u64..3;
    let who = 0u64..24;
    prop_oneof![
        id.clone().prop_map(Op::Create),
        id.clone().prop_map(Op::Start),
        id.clone().prop_map(Op::End),
        (id.clone(), who.clone()).prop_map(|(i, p)| Op::Join(i, p)),
        (id.clone(), who, 0u64..50, 0u64..50).prop_map(|(i, p, s, k)| Op::Stats(i, p, s, k)),
        id.prop_map(Op::Withdraw),
    ]
}

fn funded_registry() -> Registry<InMemoryVault, SingleAdmin> {
    let mut vault = InMemoryVault::new();
    for n in 0..24 {
        // every third player can only afford one entry
        let funds = if n % 3 == 0 { FEE } else { FEE * 100 };
        vault.mint(Address::from_seed(n), funds);
        vault.approve(Address::from_seed(n), u64::MAX);
    }
    Registry::new(PoolConfig::new(FEE, treasury()), vault, SingleAdmin(admin())).unwrap()
}

fn standings(scores: &[(u64, u64)]) -> Vec<Standing> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &(score, kills))| Standing {
            player: Address::from_seed(i as u64),
            score,
            kills,
            joined_at: i as i64,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_membership_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let mut reg = funded_registry();
        let mut now = 0i64;

        for op in ops {
            now += 1;
            let _ = match op {
                Op::Create(id) => reg.create_tournament(&admin(), id),
                Op::Start(id) => reg.start_tournament(&admin(), id, now),
                Op::End(id) => reg.end_tournament(&admin(), id, now),
                Op::Join(id, p) => reg.join_tournament(&Address::from_seed(p), id, now),
                Op::Stats(id, p, s, k) => {
                    reg.update_player_stats(&admin(), id, &Address::from_seed(p), s, k)
                }
                Op::Withdraw(id) => reg.withdraw_prize_pool(&admin(), id).map(|_| ()),
            };

            for t in reg.tournaments() {
                prop_assert!(t.player_count() <= MAX_PLAYERS);
                prop_assert_eq!(t.prize_pool, t.entry_fee() * t.player_count() as u64);
                if !t.is_started() {
                    prop_assert_eq!(t.player_count(), 0);
                }
                for p in t.players() {
                    prop_assert_eq!(t.players().iter().filter(|q| *q == p).count(), 1);
                    prop_assert!(t.stats_of(p).is_some());
                }
            }
        }
    }

    #[test]
    fn prop_distribution_conserves_pool(
        pool in 0u64..10_000_000,
        scores in prop::collection::vec((0u64..20, 0u64..5), 0..=MAX_PLAYERS),
        retain in any::<bool>(),
    ) {
        let policy = if retain { ResidualPolicy::RetainInCustody } else { ResidualPolicy::ReturnToBeneficiary };
        let config = PoolConfig::new(FEE, treasury()).with_residual_policy(policy);
        let plan = plan_distribution(pool, &standings(&scores), &config).unwrap();

        let transferred: u64 = plan.transfers.iter().map(|t| t.amount).sum();
        if retain {
            prop_assert_eq!(transferred + plan.residual, pool);
        } else {
            prop_assert_eq!(transferred, pool);
        }
        prop_assert_eq!(plan.owner_cut, pool / 10);
        prop_assert_eq!(plan.owner_cut + plan.player_total() + plan.residual, pool);
        if scores.len() > 3 {
            prop_assert_eq!(plan.residual, 0);
        }
    }

    #[test]
    fn prop_dust_goes_to_first_and_is_small(
        pool in 1u64..1_000_000,
        scores in prop::collection::vec((0u64..20, 0u64..5), 4..=MAX_PLAYERS),
    ) {
        let plan = plan_distribution(pool, &standings(&scores), &PoolConfig::new(FEE, treasury())).unwrap();
        let bucket = (scores.len() - 3) as u64;
        for t in plan.transfers.iter().filter(|t| t.kind == PayoutKind::Dust) {
            prop_assert_eq!(t.recipient, plan.ranked[0].player);
            prop_assert!(t.amount < bucket);
        }
    }

    #[test]
    fn prop_second_withdrawal_always_fails(
        joiners in 1u64..=15,
        rejected in prop::collection::vec(0u64..15, 0..5),
    ) {
        let mut reg = funded_registry();
        reg.create_tournament(&admin(), 1).unwrap();
        reg.start_tournament(&admin(), 1, 1).unwrap();
        for p in 0..joiners {
            reg.join_tournament(&Address::from_seed(p), 1, 2 + p as i64).unwrap();
        }
        reg.end_tournament(&admin(), 1, 100).unwrap();
        for p in rejected {
            reg.vault_mut().reject_payments_to(Address::from_seed(p));
        }

        let first = reg.withdraw_prize_pool(&admin(), 1);
        prop_assert!(first.is_ok());
        prop_assert!(matches!(
            reg.withdraw_prize_pool(&admin(), 1),
            Err(LedgerError::AlreadyWithdrawn(1))
        ));
    }
}
