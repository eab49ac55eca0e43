// =============================================================================
// Token Gateway
// =============================================================================
// The accounting engine never talks to the token program directly. It moves
// tokens through a gateway bound to one participant wallet and one pool
// vault. Principal and rewards each get their own gateway instance.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::StakingError;

pub trait TokenGateway {
    /// Move `amount` from the participant's wallet into the pool vault.
    fn transfer_in(&mut self, amount: u64) -> Result<()>;

    /// Move `amount` from the pool vault out to the participant's wallet.
    fn transfer_out(&mut self, amount: u64) -> Result<()>;
}

/// SPL Token implementation of [`TokenGateway`].
///
/// Inbound transfers are signed by the wallet owner. Outbound transfers are
/// signed by the vault authority (the staking pool PDA) using its seeds.
pub struct SplTokenGateway<'a, 'info> {
    token_program: AccountInfo<'info>,
    wallet: AccountInfo<'info>,
    wallet_authority: AccountInfo<'info>,
    wallet_balance: u64,
    vault: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    vault_balance: u64,
    vault_signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> SplTokenGateway<'a, 'info> {
    pub fn new(
        token_program: &Program<'info, Token>,
        wallet: &Account<'info, TokenAccount>,
        wallet_authority: &Signer<'info>,
        vault: &Account<'info, TokenAccount>,
        vault_authority: AccountInfo<'info>,
        vault_signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program: token_program.to_account_info(),
            wallet: wallet.to_account_info(),
            wallet_authority: wallet_authority.to_account_info(),
            wallet_balance: wallet.amount,
            vault: vault.to_account_info(),
            vault_authority,
            vault_balance: vault.amount,
            vault_signer_seeds,
        }
    }
}

impl TokenGateway for SplTokenGateway<'_, '_> {
    fn transfer_in(&mut self, amount: u64) -> Result<()> {
        require!(
            self.wallet_balance >= amount,
            StakingError::TransferFailed
        );

        token::transfer(
            CpiContext::new(
                self.token_program.clone(),
                Transfer {
                    from: self.wallet.clone(),
                    to: self.vault.clone(),
                    authority: self.wallet_authority.clone(),
                },
            ),
            amount,
        )
        .map_err(|_| error!(StakingError::TransferFailed))?;

        self.wallet_balance -= amount;
        self.vault_balance = self
            .vault_balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(())
    }

    fn transfer_out(&mut self, amount: u64) -> Result<()> {
        require!(
            self.vault_balance >= amount,
            StakingError::TransferFailed
        );

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.wallet.clone(),
                    authority: self.vault_authority.clone(),
                },
                self.vault_signer_seeds,
            ),
            amount,
        )
        .map_err(|_| error!(StakingError::TransferFailed))?;

        self.vault_balance -= amount;
        self.wallet_balance = self
            .wallet_balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(())
    }
}
