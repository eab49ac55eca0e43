use anchor_lang::prelude::*;

use crate::accounting;
use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::state::StakingPool;

// =============================================================================
// Set Reward Updater
// =============================================================================

#[derive(Accounts)]
pub struct SetRewardUpdater<'info> {
    #[account(
        constraint = staking_pool.is_reward_updater(&authority.key()) @ StakingError::NotAuthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: New updater address, validated to not be default or current
    pub new_updater: UncheckedAccount<'info>,
}

pub fn set_reward_updater(ctx: Context<SetRewardUpdater>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let new_updater = ctx.accounts.new_updater.key();

    accounting::set_reward_updater(&mut ctx.accounts.staking_pool, &authority, new_updater)?;

    msg!(
        "Reward updater transferred from {} to {}",
        authority,
        new_updater
    );

    Ok(())
}
