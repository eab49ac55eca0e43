// =============================================================================
// Discrete Staking Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Fixed-point scale for the reward index (18 decimals)
// amount (u64) * REWARD_PRECISION always fits in u128, so a single injection
// can never overflow the multiplication step
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18
