use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Accounts
/// * `admin` - Becomes the reward updater (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `staking_mint` - The principal token mint
/// * `reward_mint` - The reward token mint
/// * `stake_vault` - Pool-owned vault for staked principal
/// * `reward_vault` - Pool-owned vault for injected rewards
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will inject rewards into this pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = admin,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Principal token mint
    pub staking_mint: Account<'info, Mint>,

    /// Reward token mint
    pub reward_mint: Account<'info, Mint>,

    /// Vault to hold staked principal
    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold rewards until claimed
    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.reward_updater = ctx.accounts.admin.key();
    staking_pool.staking_mint = ctx.accounts.staking_mint.key();
    staking_pool.reward_mint = ctx.accounts.reward_mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    staking_pool.total_staked = 0;
    staking_pool.total_rewards_distributed = 0;
    staking_pool.total_rewards_claimed = 0;
    staking_pool.reward_index = 0;
    staking_pool.last_index_update_time = Clock::get()?.unix_timestamp;
    staking_pool.staker_count = 0;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: staking_mint={}, reward_mint={}, updater={}",
        staking_pool.staking_mint,
        staking_pool.reward_mint,
        staking_pool.reward_updater
    );

    Ok(())
}
