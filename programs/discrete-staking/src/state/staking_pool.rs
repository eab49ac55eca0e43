use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", staking_mint]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakingPool {
    /// The single key allowed to inject rewards and hand the role over
    pub reward_updater: Pubkey,

    /// Principal token mint
    pub staking_mint: Pubkey,

    /// Reward token mint
    pub reward_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Vault holding injected rewards until they are claimed
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Total principal staked across all participants
    pub total_staked: u64,

    /// Total reward tokens deposited through index updates (lifetime)
    /// Capped at u64::MAX: once reached, every further index update fails
    /// with MathOverflow, which also bounds how far the index can grow
    pub total_rewards_distributed: u64,

    /// Total reward tokens paid out through claims (lifetime)
    pub total_rewards_claimed: u64,

    /// Accumulated rewards per staked token (scaled by REWARD_PRECISION)
    /// Never decreases
    pub reward_index: u128,

    /// Last time the reward index moved
    pub last_index_update_time: i64,

    /// Number of participants with a non-zero stake
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // reward_updater
        32 + // staking_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_staked
        8 +  // total_rewards_distributed
        8 +  // total_rewards_claimed
        16 + // reward_index (u128)
        8 +  // last_index_update_time
        8 +  // staker_count
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    pub fn is_reward_updater(&self, key: &Pubkey) -> bool {
        self.reward_updater == *key
    }

    /// Index growth produced by injecting `amount` into the current stake.
    /// Formula: amount * PRECISION / total_staked, truncated toward zero.
    /// The truncated remainder stays in the reward vault unassigned.
    pub fn index_increase(&self, amount: u64) -> Result<u128> {
        require!(self.total_staked > 0, StakingError::NoStakeTokens);

        let increase = (amount as u128)
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(StakingError::NoStakeTokens)?;

        Ok(increase)
    }

    /// Fold a reward injection into the index and lifetime counters.
    /// Returns the new index.
    pub fn accrue_rewards(&mut self, amount: u64, now: i64) -> Result<u128> {
        let increase = self.index_increase(amount)?;

        let reward_index = self
            .reward_index
            .checked_add(increase)
            .ok_or(StakingError::MathOverflow)?;

        let total_rewards_distributed = self
            .total_rewards_distributed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.reward_index = reward_index;
        self.total_rewards_distributed = total_rewards_distributed;
        self.last_index_update_time = now;

        Ok(self.reward_index)
    }

    pub fn add_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;
        Ok(())
    }

    /// Track active stakers as balances cross zero in either direction.
    pub fn track_staker(&mut self, balance_before: u64, balance_after: u64) -> Result<()> {
        if balance_before == 0 && balance_after > 0 {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(StakingError::MathOverflow)?;
        } else if balance_before > 0 && balance_after == 0 {
            self.staker_count = self
                .staker_count
                .checked_sub(1)
                .ok_or(StakingError::MathUnderflow)?;
        }
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_stake(total_staked: u64) -> StakingPool {
        StakingPool {
            total_staked,
            ..Default::default()
        }
    }

    #[test]
    fn accrue_scales_by_total_stake() {
        let mut pool = pool_with_stake(100);
        let index = pool.accrue_rewards(1_000, 42).unwrap();

        // 1000 * 10^18 / 100 = 10 * 10^18
        assert_eq!(index, 10 * REWARD_PRECISION);
        assert_eq!(pool.total_rewards_distributed, 1_000);
        assert_eq!(pool.last_index_update_time, 42);
    }

    #[test]
    fn accrue_without_stakers_is_rejected() {
        let mut pool = pool_with_stake(0);
        let err = pool.accrue_rewards(1_000, 1).unwrap_err();

        assert_eq!(err, StakingError::NoStakeTokens.into());
        assert_eq!(pool, pool_with_stake(0));
    }

    #[test]
    fn accrue_truncates_toward_zero() {
        // 10^18 / 3 leaves a remainder of 1 at index scale
        let mut pool = pool_with_stake(3);
        pool.accrue_rewards(1, 0).unwrap();

        assert_eq!(pool.reward_index, 333_333_333_333_333_333);
        assert!(pool.reward_index * 3 < REWARD_PRECISION);
    }

    #[test]
    fn repeated_injections_accumulate() {
        let mut pool = pool_with_stake(400);
        let first = pool.accrue_rewards(100, 1).unwrap();
        let second = pool.accrue_rewards(300, 2).unwrap();

        assert!(second > first);
        assert_eq!(second, REWARD_PRECISION);
        assert_eq!(pool.total_rewards_distributed, 400);
    }

    #[test]
    fn largest_single_injection_does_not_overflow() {
        let mut pool = pool_with_stake(1);
        let index = pool.accrue_rewards(u64::MAX, 0).unwrap();
        assert_eq!(index, u64::MAX as u128 * REWARD_PRECISION);
    }

    #[test]
    fn lifetime_reward_counter_caps_injections() {
        let mut pool = StakingPool {
            total_rewards_distributed: u64::MAX,
            ..pool_with_stake(10)
        };
        let before = StakingPool {
            total_rewards_distributed: u64::MAX,
            ..pool_with_stake(10)
        };

        let err = pool.accrue_rewards(1, 5).unwrap_err();
        assert_eq!(err, StakingError::MathOverflow.into());
        assert_eq!(pool, before);
    }

    #[test]
    fn staker_count_follows_zero_crossings() {
        let mut pool = StakingPool::default();
        pool.track_staker(0, 10).unwrap();
        pool.track_staker(10, 20).unwrap();
        assert_eq!(pool.staker_count, 1);

        pool.track_staker(20, 0).unwrap();
        assert_eq!(pool.staker_count, 0);
    }

    #[test]
    fn remove_more_than_total_underflows() {
        let mut pool = pool_with_stake(5);
        let err = pool.remove_stake(6).unwrap_err();
        assert_eq!(err, StakingError::MathUnderflow.into());
    }
}
