use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{EDITION_SEED, METADATA_SEED, TOKEN_METADATA_PROGRAM};
use crate::core::error::WalletError;

/// Metadata PDA for a mint: seeds `["metadata", program, mint]`.
pub fn find_metadata_address(mint: &Pubkey) -> Result<(Pubkey, u8), WalletError> {
    Pubkey::try_find_program_address(
        &[METADATA_SEED, TOKEN_METADATA_PROGRAM.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM,
    )
    .ok_or(WalletError::NoValidBump)
}

/// Edition PDA for a mint: the metadata seeds plus an `"edition"` suffix.
pub fn find_edition_address(mint: &Pubkey) -> Result<(Pubkey, u8), WalletError> {
    Pubkey::try_find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &TOKEN_METADATA_PROGRAM,
    )
    .ok_or(WalletError::NoValidBump)
}

/// Canonical token account address for an (owner, mint) pair.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}
