use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting;
use crate::constants::{STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Unstake principal tokens (no cooldown)
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to unstake
///
/// # Flow
/// 1. Validate amount and user has enough staked
/// 2. Settle rewards accrued on the old balance
/// 3. Debit staker position and pool total
/// 4. Transfer principal from stake vault back to user
///
#[derive(Accounts)]
pub struct UnstakeTokens<'info> {
    /// User unstaking their tokens
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

    /// Principal token mint
    #[account(
        constraint = staking_mint.key() == staking_pool.staking_mint @ StakingError::InvalidStakingMint
    )]
    pub staking_mint: Account<'info, Mint>,

    /// User's principal token account
    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user
    )]
    pub user_stake_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = staking_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_unstake(ctx: Context<UnstakeTokens>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let pool_key = ctx.accounts.staking_pool.key();

    // Pool PDA signs the payout from the stake vault
    let staking_mint_key = ctx.accounts.staking_pool.staking_mint;
    let bump = [ctx.accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, staking_mint_key.as_ref(), &bump];
    let signer_seeds = &[seeds];

    let mut principal = SplTokenGateway::new(
        &ctx.accounts.token_program,
        &ctx.accounts.user_stake_account,
        &ctx.accounts.user,
        &ctx.accounts.stake_vault,
        ctx.accounts.staking_pool.to_account_info(),
        signer_seeds,
    );

    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    if staker.is_unbound() {
        staker.bind(pool_key, user, ctx.bumps.staker, staking_pool.reward_index);
    }

    let event = accounting::unstake(staking_pool, staker, &mut principal, amount, now)?;
    emit!(event);

    msg!(
        "Unstaked {}. User remaining: {}, Pool total: {}, unclaimed: {}",
        amount,
        staker.staked_amount,
        staking_pool.total_staked,
        staker.unclaimed_reward
    );

    Ok(())
}
