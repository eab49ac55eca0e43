use anchor_lang::prelude::*;

/// Emitted after principal has been deposited and credited.
#[event]
#[derive(Debug)]
pub struct Stake {
    pub participant: Pubkey,
    pub amount: u64,
}

/// Emitted after principal has been paid back and debited.
#[event]
#[derive(Debug)]
pub struct UnStake {
    pub participant: Pubkey,
    pub amount: u64,
}

/// Emitted after a reward injection has been folded into the index.
#[event]
#[derive(Debug)]
pub struct RewardIndexUpdated {
    /// Reward tokens deposited by the updater
    pub amount: u64,
    /// Reward index after the update (scaled by REWARD_PRECISION)
    pub new_index: u128,
}

/// Emitted after banked rewards have been paid out.
#[event]
#[derive(Debug)]
pub struct RewardsClaimed {
    pub participant: Pubkey,
    pub amount: u64,
}
