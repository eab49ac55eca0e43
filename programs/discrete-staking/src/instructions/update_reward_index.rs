use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting;
use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::gateway::SplTokenGateway;
use crate::state::StakingPool;

/// Inject a lump of reward tokens for current stakers
///
/// Called by the reward updater whenever there is something to hand out.
/// Every staker's share is fixed at this moment, in proportion to stake.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of reward tokens to inject
///
/// # Flow
/// 1. Check caller, stakers present, amount
/// 2. Grow reward_index by amount * PRECISION / total_staked
/// 3. Transfer reward tokens from source to reward vault
///
#[derive(Accounts)]
pub struct UpdateRewardIndex<'info> {
    /// Reward updater
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = staking_pool.is_reward_updater(&authority.key()) @ StakingError::NotAuthorized
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Source of rewards, owned by the updater
    #[account(
        mut,
        token::mint = reward_mint,
        constraint = reward_source.owner == authority.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub reward_source: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        constraint = reward_vault.key() == staking_pool.reward_vault @ StakingError::InvalidPDA,
        token::mint = reward_mint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_update_reward_index(ctx: Context<UpdateRewardIndex>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let authority = ctx.accounts.authority.key();

    let mut reward = SplTokenGateway::new(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_source,
        &ctx.accounts.authority,
        &ctx.accounts.reward_vault,
        ctx.accounts.staking_pool.to_account_info(),
        &[],
    );

    let staking_pool = &mut ctx.accounts.staking_pool;

    let event =
        accounting::update_reward_index(staking_pool, &authority, &mut reward, amount, now)?;
    let new_index = event.new_index;
    emit!(event);

    msg!(
        "Injected {} reward tokens. Total distributed: {}, Stakers: {}, reward_index: {}",
        amount,
        staking_pool.total_rewards_distributed,
        staking_pool.staker_count,
        new_index
    );

    Ok(())
}
