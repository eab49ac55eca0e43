// =============================================================================
// Instructions Module - Discrete Staking
// =============================================================================

pub mod admin;
pub mod claim;
pub mod initialize;
pub mod stake;
pub mod unstake;
pub mod update_reward_index;
pub mod views;

pub use admin::*;
pub use claim::*;
pub use initialize::*;
pub use stake::*;
pub use unstake::*;
pub use update_reward_index::*;
pub use views::*;
