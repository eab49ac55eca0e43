use anchor_lang::prelude::*;

use crate::accounting;
use crate::constants::{STAKER_SEED, STAKING_POOL_SEED};
use crate::state::{Staker, StakingPool};

// =============================================================================
// Read-only views
// =============================================================================
// Values are returned to the caller through Anchor return data.
// A participant that never interacted has no Staker account yet and reads
// as an all-zero position.

#[derive(Accounts)]
pub struct ReadPool<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

#[derive(Accounts)]
pub struct ReadPosition<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: Any wallet; only its key is used to derive the staker PDA
    pub participant: UncheckedAccount<'info>,

    /// CHECK: May not exist yet; read as a zero position in that case
    #[account(
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub staker: UncheckedAccount<'info>,
}

impl ReadPosition<'_> {
    fn position(&self) -> Result<Staker> {
        decode_position(&self.staker)
    }
}

/// Decode a staker PDA that may not have been created yet.
/// No data means the participant never interacted: an all-zero position.
pub fn decode_position(info: &AccountInfo) -> Result<Staker> {
    if info.data_is_empty() {
        return Ok(Staker::default());
    }
    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );

    let data = info.try_borrow_data()?;
    let staker = Staker::try_deserialize(&mut &data[..])?;
    Ok(staker)
}

pub fn staked_balance_of(ctx: Context<ReadPosition>) -> Result<u64> {
    Ok(ctx.accounts.position()?.staked_amount)
}

pub fn calculate_rewards_earned(ctx: Context<ReadPosition>) -> Result<u64> {
    let staker = ctx.accounts.position()?;
    accounting::calculate_rewards_earned(&ctx.accounts.staking_pool, &staker)
}

pub fn total_staked(ctx: Context<ReadPool>) -> Result<u64> {
    Ok(ctx.accounts.staking_pool.total_staked)
}

pub fn current_reward_index(ctx: Context<ReadPool>) -> Result<u128> {
    Ok(ctx.accounts.staking_pool.reward_index)
}

pub fn staking_mint(ctx: Context<ReadPool>) -> Result<Pubkey> {
    Ok(ctx.accounts.staking_pool.staking_mint)
}

pub fn reward_mint(ctx: Context<ReadPool>) -> Result<Pubkey> {
    Ok(ctx.accounts.staking_pool.reward_mint)
}
