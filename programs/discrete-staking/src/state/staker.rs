use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Per-participant staking position
/// PDA: ["staker", staking_pool, owner]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct Staker {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position
    pub owner: Pubkey,

    /// Amount of principal staked
    pub staked_amount: u64,

    /// Pool reward index at the last settlement
    /// Accrual since then: staked * (pool.reward_index - reward_snapshot) / PRECISION
    pub reward_snapshot: u128,

    /// Rewards crystallized by settlement and not yet claimed
    pub unclaimed_reward: u64,

    /// Total rewards claimed (lifetime)
    pub rewards_claimed: u64,

    /// Timestamp at which the balance last went from zero to non-zero
    pub first_stake_time: i64,

    /// Timestamp of last stake or unstake
    pub last_stake_time: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // staked_amount
        16 + // reward_snapshot (u128)
        8 +  // unclaimed_reward
        8 +  // rewards_claimed
        8 +  // first_stake_time
        8 +  // last_stake_time
        1 +  // bump
        32;  // padding for future fields

    /// Whether this account was just allocated and never bound to an owner.
    pub fn is_unbound(&self) -> bool {
        self.owner == Pubkey::default()
    }

    /// Bind a freshly allocated position to its pool and owner.
    /// The snapshot starts at the current index so no past rewards leak in.
    pub fn bind(&mut self, pool: Pubkey, owner: Pubkey, bump: u8, reward_index: u128) {
        self.pool = pool;
        self.owner = owner;
        self.bump = bump;
        self.reward_snapshot = reward_index;
    }

    /// Rewards accrued since the last settlement, not yet banked.
    /// Formula: staked_amount * (reward_index - reward_snapshot) / PRECISION
    pub fn pending_accrual(&self, reward_index: u128) -> Result<u64> {
        let index_diff = reward_index
            .checked_sub(self.reward_snapshot)
            .ok_or(StakingError::MathUnderflow)?;

        if self.staked_amount == 0 || index_diff == 0 {
            return Ok(0);
        }

        let pending = (self.staked_amount as u128)
            .checked_mul(index_diff)
            .ok_or(StakingError::MathOverflow)?
            / REWARD_PRECISION;

        u64::try_from(pending).map_err(|_| error!(StakingError::MathOverflow))
    }

    /// Banked plus pending rewards at the given index.
    pub fn rewards_earned(&self, reward_index: u128) -> Result<u64> {
        self.unclaimed_reward
            .checked_add(self.pending_accrual(reward_index)?)
            .ok_or_else(|| error!(StakingError::MathOverflow))
    }

    /// Crystallize pending accrual into `unclaimed_reward` and move the
    /// snapshot to `reward_index`. Must run before any balance change.
    /// Returns the amount banked by this call.
    pub fn settle(&mut self, reward_index: u128) -> Result<u64> {
        let accrued = self.pending_accrual(reward_index)?;

        self.unclaimed_reward = self
            .unclaimed_reward
            .checked_add(accrued)
            .ok_or(StakingError::MathOverflow)?;
        self.reward_snapshot = reward_index;

        Ok(accrued)
    }

    /// Credit principal. The position must already be settled.
    pub fn record_stake(&mut self, amount: u64, now: i64) -> Result<()> {
        if self.staked_amount == 0 {
            self.first_stake_time = now;
        }

        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.last_stake_time = now;

        Ok(())
    }

    /// Debit principal. The position must already be settled.
    pub fn record_unstake(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(
            self.staked_amount >= amount,
            StakingError::InsufficientStake
        );

        self.staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        self.last_stake_time = now;

        Ok(())
    }

    /// Take the banked reward for payout, leaving nothing behind.
    pub fn take_unclaimed(&mut self) -> Result<u64> {
        let amount = self.unclaimed_reward;
        require!(amount > 0, StakingError::ZeroRewards);

        self.unclaimed_reward = 0;
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(amount)
    }
}
