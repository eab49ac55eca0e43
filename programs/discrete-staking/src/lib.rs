use anchor_lang::prelude::*;

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("GWfGK3PwwKG8hukxf8uMAXiJ7dUG4euhAFjxKQJ7AMi8");

#[program]
pub mod discrete_staking {
    use super::*;

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    /// # Accounts
    /// * `admin` - Becomes the reward updater (signer, payer)
    /// * `staking_pool` - Staking pool PDA to create
    /// * `staking_mint` - Principal token mint
    /// * `reward_mint` - Reward token mint
    /// * `stake_vault` - Vault to hold staked principal
    /// * `reward_vault` - Vault to hold rewards until claimed
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Stake principal tokens
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to stake
    ///
    pub fn stake(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Unstake principal tokens (no cooldown)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to unstake
    ///
    pub fn unstake(ctx: Context<UnstakeTokens>, amount: u64) -> Result<()> {
        instructions::unstake::handler_unstake(ctx, amount)
    }

    /// Inject reward tokens for current stakers (reward updater only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of reward tokens to inject
    ///
    pub fn update_reward_index(ctx: Context<UpdateRewardIndex>, amount: u64) -> Result<()> {
        instructions::update_reward_index::handler_update_reward_index(ctx, amount)
    }

    /// Claim accumulated rewards
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn claim(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim::handler_claim(ctx)
    }

    /// Hand the reward updater role to a new address (reward updater only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn set_reward_updater(ctx: Context<SetRewardUpdater>) -> Result<()> {
        instructions::admin::set_reward_updater(ctx)
    }

    /// Principal currently staked by `participant`
    pub fn staked_balance_of(ctx: Context<ReadPosition>) -> Result<u64> {
        instructions::views::staked_balance_of(ctx)
    }

    /// Banked plus pending rewards of `participant`
    pub fn calculate_rewards_earned(ctx: Context<ReadPosition>) -> Result<u64> {
        instructions::views::calculate_rewards_earned(ctx)
    }

    /// Total principal staked in the pool
    pub fn total_staked(ctx: Context<ReadPool>) -> Result<u64> {
        instructions::views::total_staked(ctx)
    }

    /// Current reward index (scaled by REWARD_PRECISION)
    pub fn current_reward_index(ctx: Context<ReadPool>) -> Result<u128> {
        instructions::views::current_reward_index(ctx)
    }

    /// Principal token mint of the pool
    pub fn staking_mint(ctx: Context<ReadPool>) -> Result<Pubkey> {
        instructions::views::staking_mint(ctx)
    }

    /// Reward token mint of the pool
    pub fn reward_mint(ctx: Context<ReadPool>) -> Result<Pubkey> {
        instructions::views::reward_mint(ctx)
    }
}
