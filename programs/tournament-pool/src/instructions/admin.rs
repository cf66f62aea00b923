//! Admin instructions

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use pool_ledger::ConfigUpdate;

use crate::error::PoolError;
use crate::state::{to_address, Config};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub treasury: Pubkey,
    pub entry_fee: u64,
    pub owner_cut_percent: u8,
    pub rank_shares_percent: [u8; 3],
    pub strict_payouts: bool,
    pub retain_residual: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateConfigParams {
    pub treasury: Option<Pubkey>,
    pub entry_fee: Option<u64>,
    pub owner_cut_percent: Option<u8>,
    pub rank_shares_percent: Option<[u8; 3]>,
    pub strict_payouts: Option<bool>,
    pub retain_residual: Option<bool>,
}

/// Initialize global config
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Entry fee mint, fixed for the life of the program
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    let InitializeConfigParams {
        treasury,
        entry_fee,
        owner_cut_percent,
        rank_shares_percent,
        strict_payouts,
        retain_residual,
    } = params;

    let config = &mut ctx.accounts.config;

    config.admin = ctx.accounts.admin.key();
    config.treasury = treasury;
    config.mint = ctx.accounts.mint.key();
    config.entry_fee = entry_fee;
    config.owner_cut_percent = owner_cut_percent;
    config.rank_shares_percent = rank_shares_percent;
    config.strict_payouts = strict_payouts;
    config.retain_residual = retain_residual;
    config.bump = ctx.bumps.config;

    config
        .pool_config()
        .validate()
        .map_err(|_| PoolError::InvalidConfig)?;

    msg!("Config initialized by {}, mint = {}", config.admin, config.mint);
    msg!(
        "Entry fee {}, owner cut {}%, rank shares {:?}",
        config.entry_fee,
        config.owner_cut_percent,
        config.rank_shares_percent
    );

    Ok(())
}

/// Update config parameters
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ PoolError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

pub fn update_config(
    ctx: Context<UpdateConfig>,
    params: UpdateConfigParams,
) -> Result<()> {
    let UpdateConfigParams {
        treasury,
        entry_fee,
        owner_cut_percent,
        rank_shares_percent,
        strict_payouts,
        retain_residual,
    } = params;

    let config = &mut ctx.accounts.config;

    // Validate the whole result through the ledger before writing anything
    let mut next = config.pool_config();
    next.apply(ConfigUpdate {
        entry_fee,
        beneficiary: treasury.as_ref().map(to_address),
        owner_cut_percent,
        rank_shares_percent,
        payout_policy: None,
        residual_policy: None,
    })
    .map_err(|_| PoolError::InvalidConfig)?;

    if let Some(t) = treasury {
        config.treasury = t;
    }
    config.entry_fee = next.entry_fee;
    config.owner_cut_percent = next.owner_cut_percent;
    config.rank_shares_percent = next.rank_shares_percent;

    if let Some(strict) = strict_payouts {
        config.strict_payouts = strict;
    }

    if let Some(retain) = retain_residual {
        config.retain_residual = retain;
    }

    msg!("Config updated");
    Ok(())
}
