use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Amount Errors (6000-6003)
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient staked balance")]
    InsufficientStake,

    #[msg("No tokens are staked: rewards cannot be apportioned")]
    NoStakeTokens,

    #[msg("No rewards available to claim")]
    ZeroRewards,

    // Authorization Errors (6004-6005)
    #[msg("Not authorized: reward updater only")]
    NotAuthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Transfer Errors (6006)
    #[msg("Token transfer rejected")]
    TransferFailed,

    // Math Errors (6007-6008)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    // Account Validation Errors (6009-6012)
    #[msg("Invalid staking mint")]
    InvalidStakingMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid PDA")]
    InvalidPDA,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}
