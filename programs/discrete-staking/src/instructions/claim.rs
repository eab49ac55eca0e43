use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting;
use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Claim accumulated rewards
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Flow
/// 1. Settle pending accrual into the banked reward
/// 2. Zero the banked reward
/// 3. Transfer rewards from reward vault to user
///
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// User claiming their rewards
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's staker account (created empty if first time)
    #[account(
        init_if_needed,
        payer = user,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub staker: Account<'info, Staker>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_claim(ctx: Context<ClaimRewards>) -> Result<()> {
    let user = ctx.accounts.user.key();
    let pool_key = ctx.accounts.staking_pool.key();

    // Pool PDA signs the payout from the reward vault
    let staking_mint_key = ctx.accounts.staking_pool.staking_mint;
    let bump = [ctx.accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, staking_mint_key.as_ref(), &bump];
    let signer_seeds = &[seeds];

    let mut reward = SplTokenGateway::new(
        &ctx.accounts.token_program,
        &ctx.accounts.user_reward_account,
        &ctx.accounts.user,
        &ctx.accounts.reward_vault,
        ctx.accounts.staking_pool.to_account_info(),
        signer_seeds,
    );

    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    if staker.is_unbound() {
        staker.bind(pool_key, user, ctx.bumps.staker, staking_pool.reward_index);
    }

    let event = accounting::claim(staking_pool, staker, &mut reward)?;
    let amount = event.amount;
    emit!(event);

    msg!(
        "Claimed {} rewards. Total claimed: {}",
        amount,
        staker.rewards_claimed
    );

    Ok(())
}
