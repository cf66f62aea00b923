//! Player ranking
//!
//! Higher score first, then more kills, then earlier join. The sort is stable,
//! so players that tie on all three keep their join order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::tournament::{PlayerStats, Timestamp};

/// One player's position-relevant data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: Address,
    pub score: u64,
    pub kills: u64,
    pub joined_at: Timestamp,
}

impl Standing {
    pub fn new(player: Address, stats: &PlayerStats) -> Self {
        Self {
            player,
            score: stats.score,
            kills: stats.kills,
            joined_at: stats.joined_at,
        }
    }
}

/// `Less` means `a` ranks ahead of `b`.
pub fn compare(a: &Standing, b: &Standing) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.kills.cmp(&a.kills))
        .then_with(|| a.joined_at.cmp(&b.joined_at))
}

/// Rank standings given in join order. Index 0 is first place.
pub fn rank_players(standings: &[Standing]) -> Vec<Standing> {
    let mut ranked = standings.to_vec();
    // sort_by is stable
    ranked.sort_by(compare);
    ranked
}
