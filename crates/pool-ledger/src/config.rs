//! Pool configuration
//!
//! Entry fee, operator cut, rank shares and the two payout policies. The
//! whole config is snapshotted into each tournament at creation, so updating
//! it never touches tournaments that already exist.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{LedgerError, LedgerResult};

/// Operator cut taken off the top of every prize pool (percent)
pub const DEFAULT_OWNER_CUT_PERCENT: u8 = 10;

/// Shares of the post-cut pool for ranks 1, 2 and 3 (percent)
pub const DEFAULT_RANK_SHARES_PERCENT: [u8; 3] = [30, 20, 10];

/// What happens when an outbound payout transfer fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutPolicy {
    /// Keep going; failed transfers are logged and reported.
    #[default]
    BestEffort,
    /// Stop at the first failed transfer and surface it.
    Strict,
}

/// What happens to pool funds no player is entitled to.
///
/// That covers the whole post-cut pool when nobody joined, and the unclaimed
/// top-three shares plus rounding when three or fewer players joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualPolicy {
    #[default]
    ReturnToBeneficiary,
    RetainInCustody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Fixed amount each player pays to join
    pub entry_fee: u64,
    /// Receives the operator cut (and residual, if configured)
    pub beneficiary: Address,
    #[serde(default = "default_owner_cut")]
    pub owner_cut_percent: u8,
    #[serde(default = "default_rank_shares")]
    pub rank_shares_percent: [u8; 3],
    #[serde(default)]
    pub payout_policy: PayoutPolicy,
    #[serde(default)]
    pub residual_policy: ResidualPolicy,
}

fn default_owner_cut() -> u8 {
    DEFAULT_OWNER_CUT_PERCENT
}

fn default_rank_shares() -> [u8; 3] {
    DEFAULT_RANK_SHARES_PERCENT
}

impl PoolConfig {
    /// Config with the standard 10% cut and 30/20/10 split.
    pub fn new(entry_fee: u64, beneficiary: Address) -> Self {
        Self {
            entry_fee,
            beneficiary,
            owner_cut_percent: DEFAULT_OWNER_CUT_PERCENT,
            rank_shares_percent: DEFAULT_RANK_SHARES_PERCENT,
            payout_policy: PayoutPolicy::default(),
            residual_policy: ResidualPolicy::default(),
        }
    }

    pub fn with_payout_policy(mut self, policy: PayoutPolicy) -> Self {
        self.payout_policy = policy;
        self
    }

    pub fn with_residual_policy(mut self, policy: ResidualPolicy) -> Self {
        self.residual_policy = policy;
        self
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.entry_fee == 0 {
            return Err(LedgerError::InvalidConfig("entry_fee must be > 0".into()));
        }
        if self.owner_cut_percent > 100 {
            return Err(LedgerError::InvalidConfig(format!(
                "owner_cut_percent {} exceeds 100",
                self.owner_cut_percent
            )));
        }
        let shares: u32 = self.rank_shares_percent.iter().map(|&s| s as u32).sum();
        if shares > 100 {
            return Err(LedgerError::InvalidConfig(format!(
                "rank shares sum to {}%, must be <= 100",
                shares
            )));
        }
        Ok(())
    }

    /// Apply a partial update, rejecting it wholesale if the result is invalid.
    pub fn apply(&mut self, update: ConfigUpdate) -> LedgerResult<()> {
        let ConfigUpdate {
            entry_fee,
            beneficiary,
            owner_cut_percent,
            rank_shares_percent,
            payout_policy,
            residual_policy,
        } = update;

        let mut next = self.clone();
        if let Some(fee) = entry_fee {
            next.entry_fee = fee;
        }
        if let Some(addr) = beneficiary {
            next.beneficiary = addr;
        }
        if let Some(cut) = owner_cut_percent {
            next.owner_cut_percent = cut;
        }
        if let Some(shares) = rank_shares_percent {
            next.rank_shares_percent = shares;
        }
        if let Some(policy) = payout_policy {
            next.payout_policy = policy;
        }
        if let Some(policy) = residual_policy {
            next.residual_policy = policy;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Partial config update; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub entry_fee: Option<u64>,
    pub beneficiary: Option<Address>,
    pub owner_cut_percent: Option<u8>,
    pub rank_shares_percent: Option<[u8; 3]>,
    pub payout_policy: Option<PayoutPolicy>,
    pub residual_policy: Option<ResidualPolicy>,
}
