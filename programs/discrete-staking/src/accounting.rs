// =============================================================================
// Reward Accounting Engine
// =============================================================================
// Every operation follows the same shape:
// 1. checks (fail before touching state)
// 2. settle the participant against the pre-mutation index and balance
// 3. apply internal effects
// 4. call the token gateway
// If any step after the checks fails, pool and participant are restored to
// the values they had on entry.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::events;
use crate::gateway::TokenGateway;
use crate::state::{Staker, StakingPool};

fn atomically<T>(
    pool: &mut StakingPool,
    staker: &mut Staker,
    op: impl FnOnce(&mut StakingPool, &mut Staker) -> Result<T>,
) -> Result<T> {
    let saved_pool = pool.clone();
    let saved_staker = staker.clone();

    match op(pool, staker) {
        Ok(value) => Ok(value),
        Err(err) => {
            *pool = saved_pool;
            *staker = saved_staker;
            Err(err)
        }
    }
}

fn atomically_pool<T>(
    pool: &mut StakingPool,
    op: impl FnOnce(&mut StakingPool) -> Result<T>,
) -> Result<T> {
    let saved_pool = pool.clone();

    op(pool).map_err(|err| {
        *pool = saved_pool;
        err
    })
}

/// Deposit `amount` principal for `staker`.
pub fn stake<G: TokenGateway>(
    pool: &mut StakingPool,
    staker: &mut Staker,
    principal: &mut G,
    amount: u64,
    now: i64,
) -> Result<events::Stake> {
    require!(amount > 0, StakingError::InvalidAmount);

    atomically(pool, staker, |pool, staker| {
        staker.settle(pool.reward_index)?;

        let balance_before = staker.staked_amount;
        staker.record_stake(amount, now)?;
        pool.add_stake(amount)?;
        pool.track_staker(balance_before, staker.staked_amount)?;

        principal.transfer_in(amount)
    })?;

    Ok(events::Stake {
        participant: staker.owner,
        amount,
    })
}

/// Withdraw `amount` principal back to `staker`.
pub fn unstake<G: TokenGateway>(
    pool: &mut StakingPool,
    staker: &mut Staker,
    principal: &mut G,
    amount: u64,
    now: i64,
) -> Result<events::UnStake> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        staker.staked_amount >= amount,
        StakingError::InsufficientStake
    );

    atomically(pool, staker, |pool, staker| {
        staker.settle(pool.reward_index)?;

        let balance_before = staker.staked_amount;
        staker.record_unstake(amount, now)?;
        pool.remove_stake(amount)?;
        pool.track_staker(balance_before, staker.staked_amount)?;

        principal.transfer_out(amount)
    })?;

    Ok(events::UnStake {
        participant: staker.owner,
        amount,
    })
}

/// Inject `amount` reward tokens and spread them over the current stake.
///
/// Check order is authorization, then stake presence, then amount, so an
/// empty pool reports `NoStakeTokens` even for a zero amount.
pub fn update_reward_index<G: TokenGateway>(
    pool: &mut StakingPool,
    caller: &Pubkey,
    reward: &mut G,
    amount: u64,
    now: i64,
) -> Result<events::RewardIndexUpdated> {
    require!(pool.is_reward_updater(caller), StakingError::NotAuthorized);
    require!(pool.total_staked > 0, StakingError::NoStakeTokens);
    require!(amount > 0, StakingError::InvalidAmount);

    let new_index = atomically_pool(pool, |pool| {
        let new_index = pool.accrue_rewards(amount, now)?;
        reward.transfer_in(amount)?;
        Ok(new_index)
    })?;

    Ok(events::RewardIndexUpdated { amount, new_index })
}

/// Pay out everything `staker` has earned so far.
///
/// The banked reward is zeroed before the gateway is called, so nothing is
/// left to claim should the transfer re-enter.
pub fn claim<G: TokenGateway>(
    pool: &mut StakingPool,
    staker: &mut Staker,
    reward: &mut G,
) -> Result<events::RewardsClaimed> {
    let amount = atomically(pool, staker, |pool, staker| {
        staker.settle(pool.reward_index)?;

        let amount = staker.take_unclaimed()?;
        pool.record_claim(amount)?;

        reward.transfer_out(amount)?;
        Ok(amount)
    })?;

    Ok(events::RewardsClaimed {
        participant: staker.owner,
        amount,
    })
}

pub fn calculate_rewards_earned(pool: &StakingPool, staker: &Staker) -> Result<u64> {
    staker.rewards_earned(pool.reward_index)
}

/// Hand the reward updater role to `new_updater`.
pub fn set_reward_updater(
    pool: &mut StakingPool,
    caller: &Pubkey,
    new_updater: Pubkey,
) -> Result<()> {
    require!(pool.is_reward_updater(caller), StakingError::NotAuthorized);
    require!(
        new_updater != Pubkey::default() && new_updater != pool.reward_updater,
        StakingError::InvalidAuthority
    );

    pool.reward_updater = new_updater;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REWARD_PRECISION;

    /// One wallet and one vault. `reject` makes every transfer fail.
    #[derive(Default)]
    struct MockGateway {
        wallet: u64,
        vault: u64,
        reject: bool,
    }

    impl MockGateway {
        fn funded(wallet: u64) -> Self {
            Self {
                wallet,
                ..Default::default()
            }
        }
    }

    impl TokenGateway for MockGateway {
        fn transfer_in(&mut self, amount: u64) -> Result<()> {
            require!(
                !self.reject && self.wallet >= amount,
                StakingError::TransferFailed
            );
            self.wallet -= amount;
            self.vault += amount;
            Ok(())
        }

        fn transfer_out(&mut self, amount: u64) -> Result<()> {
            require!(
                !self.reject && self.vault >= amount,
                StakingError::TransferFailed
            );
            self.vault -= amount;
            self.wallet += amount;
            Ok(())
        }
    }

    fn pool_for(updater: Pubkey) -> StakingPool {
        StakingPool {
            reward_updater: updater,
            ..Default::default()
        }
    }

    #[test]
    fn stake_credits_balance_and_total() {
        let mut pool = StakingPool::default();
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();

        assert_eq!(staker.staked_amount, 100);
        assert_eq!(pool.total_staked, 100);
        assert_eq!(pool.staker_count, 1);
        assert_eq!(principal.vault, 100);
        assert_eq!(principal.wallet, 0);
    }

    #[test]
    fn zero_stake_is_rejected() {
        let mut pool = StakingPool::default();
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);

        let err = stake(&mut pool, &mut staker, &mut principal, 0, 1).unwrap_err();
        assert_eq!(err, StakingError::InvalidAmount.into());

        let err = unstake(&mut pool, &mut staker, &mut principal, 0, 1).unwrap_err();
        assert_eq!(err, StakingError::InvalidAmount.into());
    }

    #[test]
    fn failed_deposit_leaves_no_trace() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(200);
        let mut reward = MockGateway::funded(1_000);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();
        update_reward_index(&mut pool, &updater, &mut reward, 1_000, 2).unwrap();

        let pool_before = pool.clone();
        let staker_before = staker.clone();

        principal.reject = true;
        let err = stake(&mut pool, &mut staker, &mut principal, 50, 3).unwrap_err();

        assert_eq!(err, StakingError::TransferFailed.into());
        assert_eq!(pool, pool_before);
        // settlement of the 1000 accrued was rolled back as well
        assert_eq!(staker, staker_before);
        assert_eq!(staker.unclaimed_reward, 0);
    }

    #[test]
    fn unstake_settles_with_the_old_balance() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);
        let mut reward = MockGateway::funded(500);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();
        update_reward_index(&mut pool, &updater, &mut reward, 500, 2).unwrap();
        unstake(&mut pool, &mut staker, &mut principal, 100, 3).unwrap();

        assert_eq!(staker.unclaimed_reward, 500);
        assert_eq!(staker.staked_amount, 0);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(pool.staker_count, 0);
        assert_eq!(principal.wallet, 100);
        assert_eq!(calculate_rewards_earned(&pool, &staker).unwrap(), 500);
    }

    #[test]
    fn unstake_beyond_balance_changes_nothing() {
        let mut pool = StakingPool::default();
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();
        let pool_before = pool.clone();
        let staker_before = staker.clone();

        let err = unstake(&mut pool, &mut staker, &mut principal, 101, 2).unwrap_err();

        assert_eq!(err, StakingError::InsufficientStake.into());
        assert_eq!(pool, pool_before);
        assert_eq!(staker, staker_before);
        assert_eq!(principal.vault, 100);
    }

    #[test]
    fn update_requires_the_reward_updater() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        pool.total_staked = 10;
        let mut reward = MockGateway::funded(100);

        let err = update_reward_index(&mut pool, &Pubkey::new_unique(), &mut reward, 100, 1)
            .unwrap_err();

        assert_eq!(err, StakingError::NotAuthorized.into());
        assert_eq!(pool.reward_index, 0);
        assert_eq!(reward.wallet, 100);
    }

    #[test]
    fn update_with_empty_pool_reports_no_stake_tokens() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut reward = MockGateway::funded(100);

        for amount in [0, 100] {
            let err = update_reward_index(&mut pool, &updater, &mut reward, amount, 1)
                .unwrap_err();
            assert_eq!(err, StakingError::NoStakeTokens.into());
        }
        assert_eq!(pool.reward_index, 0);
    }

    #[test]
    fn zero_update_with_stakers_is_invalid() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        pool.total_staked = 10;
        let mut reward = MockGateway::default();

        let err = update_reward_index(&mut pool, &updater, &mut reward, 0, 1).unwrap_err();
        assert_eq!(err, StakingError::InvalidAmount.into());
    }

    #[test]
    fn rejected_reward_deposit_keeps_index() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        pool.total_staked = 10;
        let mut reward = MockGateway::funded(5);

        let err = update_reward_index(&mut pool, &updater, &mut reward, 6, 1).unwrap_err();

        assert_eq!(err, StakingError::TransferFailed.into());
        assert_eq!(pool.reward_index, 0);
        assert_eq!(pool.total_rewards_distributed, 0);
    }

    #[test]
    fn claim_pays_out_once() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);
        let mut reward = MockGateway::funded(1_000);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();
        update_reward_index(&mut pool, &updater, &mut reward, 1_000, 2).unwrap();

        // the staker's side of the reward gateway starts empty
        reward.wallet = 0;
        assert_eq!(claim(&mut pool, &mut staker, &mut reward).unwrap().amount, 1_000);
        assert_eq!(reward.wallet, 1_000);
        assert_eq!(staker.rewards_claimed, 1_000);
        assert_eq!(pool.total_rewards_claimed, 1_000);

        let pool_before = pool.clone();
        let staker_before = staker.clone();
        let err = claim(&mut pool, &mut staker, &mut reward).unwrap_err();

        assert_eq!(err, StakingError::ZeroRewards.into());
        assert_eq!(pool, pool_before);
        assert_eq!(staker, staker_before);
    }

    #[test]
    fn failed_payout_restores_banked_reward() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut staker = Staker::default();
        let mut principal = MockGateway::funded(100);
        let mut reward = MockGateway::funded(1_000);

        stake(&mut pool, &mut staker, &mut principal, 100, 1).unwrap();
        update_reward_index(&mut pool, &updater, &mut reward, 1_000, 2).unwrap();

        reward.reject = true;
        let err = claim(&mut pool, &mut staker, &mut reward).unwrap_err();

        assert_eq!(err, StakingError::TransferFailed.into());
        assert_eq!(staker.unclaimed_reward, 0);
        assert_eq!(staker.reward_snapshot, 0);
        assert_eq!(pool.total_rewards_claimed, 0);
        assert_eq!(calculate_rewards_earned(&pool, &staker).unwrap(), 1_000);

        reward.reject = false;
        assert_eq!(claim(&mut pool, &mut staker, &mut reward).unwrap().amount, 1_000);
    }

    #[test]
    fn late_staker_gets_nothing_from_earlier_injection() {
        let updater = Pubkey::new_unique();
        let mut pool = pool_for(updater);
        let mut early = Staker::default();
        let mut late = Staker::default();
        let mut principal = MockGateway::funded(200);
        let mut reward = MockGateway::funded(1_000);

        stake(&mut pool, &mut early, &mut principal, 100, 1).unwrap();
        update_reward_index(&mut pool, &updater, &mut reward, 1_000, 2).unwrap();

        late.bind(Pubkey::default(), Pubkey::new_unique(), 0, pool.reward_index);
        stake(&mut pool, &mut late, &mut principal, 100, 3).unwrap();

        assert_eq!(pool.reward_index, 10 * REWARD_PRECISION);
        assert_eq!(calculate_rewards_earned(&pool, &early).unwrap(), 1_000);
        assert_eq!(calculate_rewards_earned(&pool, &late).unwrap(), 0);
    }

    #[test]
    fn updater_role_moves_to_a_new_key() {
        let updater = Pubkey::new_unique();
        let next = Pubkey::new_unique();
        let mut pool = pool_for(updater);

        let err = set_reward_updater(&mut pool, &next, next).unwrap_err();
        assert_eq!(err, StakingError::NotAuthorized.into());

        let err = set_reward_updater(&mut pool, &updater, Pubkey::default()).unwrap_err();
        assert_eq!(err, StakingError::InvalidAuthority.into());

        let err = set_reward_updater(&mut pool, &updater, updater).unwrap_err();
        assert_eq!(err, StakingError::InvalidAuthority.into());

        set_reward_updater(&mut pool, &updater, next).unwrap();
        assert!(pool.is_reward_updater(&next));
        assert!(!pool.is_reward_updater(&updater));
    }
}
