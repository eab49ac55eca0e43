// =============================================================================
// State Module - Discrete Staking
// =============================================================================
// StakingPool holds the stake ledger total and the reward index.
// Staker holds one participant's balance, snapshot and banked rewards.
// =============================================================================

pub mod staker;
pub mod staking_pool;

pub use staker::*;
pub use staking_pool::*;
