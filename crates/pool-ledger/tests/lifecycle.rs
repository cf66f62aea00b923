//! End-to-end tournament lifecycle through the registry.

use pool_ledger::{
    Address, ConfigUpdate, InMemoryVault, LedgerError, PoolConfig, Registry, SingleAdmin,
    TournamentEvent, TournamentStatus, MAX_PLAYERS,
};

const FEE: u64 = 25;

fn admin() -> Address {
    Address::from_seed(500)
}

fn treasury() -> Address {
    Address::from_seed(501)
}

fn setup() -> Registry<InMemoryVault, SingleAdmin> {
    let mut vault = InMemoryVault::new();
    for n in 0..20 {
        vault.mint(Address::from_seed(n), 10_000);
        vault.approve(Address::from_seed(n), 10_000);
    }
    Registry::new(PoolConfig::new(FEE, treasury()), vault, SingleAdmin(admin())).unwrap()
}

#[test]
fn test_ranking_example() {
    let mut reg = setup();
    let (a, b, c) = (Address::from_seed(1), Address::from_seed(2), Address::from_seed(3));
    reg.create_tournament(&admin(), 1).unwrap();
    reg.start_tournament(&admin(), 1, 10).unwrap();
    reg.join_tournament(&a, 1, 11).unwrap();
    reg.join_tournament(&b, 1, 12).unwrap();
    reg.join_tournament(&c, 1, 13).unwrap();
    reg.update_player_stats(&admin(), 1, &a, 10, 2).unwrap();
    reg.update_player_stats(&admin(), 1, &b, 10, 3).unwrap();
    reg.update_player_stats(&admin(), 1, &c, 5, 1).unwrap();

    let order: Vec<_> = reg.leaderboard(1).unwrap().iter().map(|s| s.player).collect();
    assert_eq!(order, vec![b, a, c]);
}

#[test]
fn test_capacity_and_double_join() {
    let mut reg = setup();
    reg.create_tournament(&admin(), 2).unwrap();
    reg.start_tournament(&admin(), 2, 10).unwrap();

    let first = Address::from_seed(0);
    reg.join_tournament(&first, 2, 11).unwrap();
    assert_eq!(
        reg.join_tournament(&first, 2, 12),
        Err(LedgerError::PlayerAlreadyJoined { id: 2, player: first })
    );

    for n in 1..MAX_PLAYERS as u64 {
        reg.join_tournament(&Address::from_seed(n), 2, 20 + n as i64).unwrap();
    }
    let late = Address::from_seed(19);
    assert_eq!(
        reg.join_tournament(&late, 2, 99),
        Err(LedgerError::MaxPlayersReached(2))
    );

    let t = reg.tournament(2).unwrap();
    assert_eq!(t.player_count(), MAX_PLAYERS);
    assert_eq!(t.prize_pool, FEE * MAX_PLAYERS as u64);
    assert_eq!(reg.vault().balance_of(&late), 10_000);
}

#[test]
fn test_join_before_start_and_after_end() {
    let mut reg = setup();
    let p = Address::from_seed(1);
    reg.create_tournament(&admin(), 3).unwrap();
    assert_eq!(reg.join_tournament(&p, 3, 1), Err(LedgerError::TournamentNotStarted(3)));
    reg.start_tournament(&admin(), 3, 2).unwrap();
    assert_eq!(
        reg.start_tournament(&admin(), 3, 3),
        Err(LedgerError::TournamentAlreadyStarted(3))
    );
    reg.end_tournament(&admin(), 3, 4).unwrap();
    assert_eq!(reg.join_tournament(&p, 3, 5), Err(LedgerError::TournamentAlreadyEnded(3)));
    assert_eq!(
        reg.end_tournament(&admin(), 3, 6),
        Err(LedgerError::TournamentAlreadyEnded(3))
    );
}

#[test]
fn test_stats_frozen_after_end() {
    let mut reg = setup();
    let p = Address::from_seed(1);
    reg.create_tournament(&admin(), 4).unwrap();
    reg.start_tournament(&admin(), 4, 1).unwrap();
    reg.join_tournament(&p, 4, 2).unwrap();
    reg.update_player_stats(&admin(), 4, &p, 12, 3).unwrap();
    reg.end_tournament(&admin(), 4, 3).unwrap();

    assert_eq!(
        reg.update_player_stats(&admin(), 4, &p, 1, 1),
        Err(LedgerError::TournamentAlreadyEnded(4))
    );
    let stats = reg.player_stats(4, &p).unwrap().unwrap();
    assert_eq!((stats.score, stats.kills), (12, 3));
}

#[test]
fn test_full_cycle_five_players() {
    let mut reg = setup();
    reg.create_tournament(&admin(), 5).unwrap();
    reg.start_tournament(&admin(), 5, 100).unwrap();
    for n in 1..=5u64 {
        reg.join_tournament(&Address::from_seed(n), 5, 100 + n as i64).unwrap();
        reg.update_player_stats(&admin(), 5, &Address::from_seed(n), n, 0).unwrap();
    }
    reg.end_tournament(&admin(), 5, 200).unwrap();
    assert_eq!(reg.tournament(5).unwrap().status(), TournamentStatus::Ended);

    // pool 125: cut 12, remaining 113 -> 33, 22, 11, others 47 -> 23 + 23, dust 1
    let settlement = reg.withdraw_prize_pool(&admin(), 5).unwrap();
    assert!(settlement.is_complete());
    let plan = &settlement.plan;
    assert_eq!((plan.owner_cut, plan.remaining_pool), (12, 113));

    let top = Address::from_seed(5);
    assert_eq!(reg.vault().balance_of(&top), 10_000 - FEE + 33 + 1);
    assert_eq!(reg.vault().balance_of(&Address::from_seed(4)), 10_000 - FEE + 22);
    assert_eq!(reg.vault().balance_of(&Address::from_seed(3)), 10_000 - FEE + 11);
    assert_eq!(reg.vault().balance_of(&Address::from_seed(2)), 10_000 - FEE + 23);
    assert_eq!(reg.vault().balance_of(&Address::from_seed(1)), 10_000 - FEE + 23);
    assert_eq!(reg.vault().balance_of(&treasury()), 12);
    assert_eq!(reg.vault().custody(), 0);
    assert_eq!(reg.tournament(5).unwrap().status(), TournamentStatus::Settled);

    let last = reg.events().last().cloned();
    assert_eq!(
        last,
        Some(TournamentEvent::Distributed { id: 5, owner_cut: 12, remaining_pool: 113 })
    );
}

#[test]
fn test_never_joined_tournament_has_nothing_to_withdraw() {
    let mut reg = setup();
    reg.create_tournament(&admin(), 6).unwrap();
    reg.end_tournament(&admin(), 6, 1).unwrap();
    assert_eq!(
        reg.withdraw_prize_pool(&admin(), 6).unwrap_err(),
        LedgerError::NothingToWithdraw(6)
    );
    assert!(!reg.tournament(6).unwrap().withdrawn);
}

#[test]
fn test_config_change_after_end_keeps_payout_terms() {
    let mut reg = setup();
    let new_treasury = Address::from_seed(502);
    reg.create_tournament(&admin(), 6).unwrap();
    reg.start_tournament(&admin(), 6, 10).unwrap();
    for n in 1..=4 {
        reg.join_tournament(&Address::from_seed(n), 6, 10 + n as i64).unwrap();
    }
    reg.end_tournament(&admin(), 6, 50).unwrap();

    reg.update_config(
        &admin(),
        ConfigUpdate {
            owner_cut_percent: Some(50),
            beneficiary: Some(new_treasury),
            ..Default::default()
        },
    )
    .unwrap();

    let settlement = reg.withdraw_prize_pool(&admin(), 6).unwrap();
    assert_eq!(settlement.plan.owner_cut, 10);
    assert_eq!(settlement.plan.remaining_pool, 90);
    assert_eq!(reg.vault().balance_of(&treasury()), 10);
    assert_eq!(reg.vault().balance_of(&new_treasury), 0);
}
