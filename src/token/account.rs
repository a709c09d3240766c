use solana_sdk::pubkey::Pubkey;

use crate::core::binary_reader::{BinaryReader, BinaryReaderError};
use crate::core::error::WalletError;

/// Fixed length of an SPL token account record.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// One on-chain account holding units of a mint for an owner.
///
/// Constructed only by [`unpack_token_account`]; immutable afterwards. A new
/// poll cycle produces a fresh generation instead of mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    /// Raw base units, never scaled by decimals.
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub is_initialized: bool,
    pub is_frozen: bool,
    pub is_native: bool,
    pub rent_exempt_reserve: Option<u64>,
    pub close_authority: Option<Pubkey>,
}

/// Decode the fixed 165-byte SPL token account layout.
///
/// The COption flag words collapse into `Option` right here; downstream code
/// never sees a flag+payload pair. An empty or wrong-length buffer is
/// `MalformedAccount` — "no account at this address" is the caller's concern
/// and must not reach this function.
pub fn unpack_token_account(data: &[u8], address: &Pubkey) -> Result<TokenAccount, WalletError> {
    if data.len() != TOKEN_ACCOUNT_LEN {
        return Err(WalletError::malformed_account(TOKEN_ACCOUNT_LEN, data.len()));
    }
    read_layout(data, address)
        .map_err(|_| WalletError::malformed_account(TOKEN_ACCOUNT_LEN, data.len()))
}

fn read_layout(data: &[u8], address: &Pubkey) -> Result<TokenAccount, BinaryReaderError> {
    let mut reader = BinaryReader::new(data);

    let mint = reader.read_pubkey()?;
    let owner = reader.read_pubkey()?;
    let amount = reader.read_u64()?;

    let delegate_flag = reader.read_u32()?;
    let delegate_key = reader.read_pubkey()?;
    let delegate = (delegate_flag != 0).then_some(delegate_key);

    // 0 = uninitialized, 1 = initialized, 2 = frozen
    let state = reader.read_u8()?;

    let native_flag = reader.read_u32()?;
    let native_value = reader.read_u64()?;
    let (is_native, rent_exempt_reserve) = if native_flag != 0 {
        (true, Some(native_value))
    } else {
        (false, None)
    };

    let delegated_amount = reader.read_u64()?;

    let close_flag = reader.read_u32()?;
    let close_key = reader.read_pubkey()?;
    let close_authority = (close_flag != 0).then_some(close_key);

    Ok(TokenAccount {
        address: *address,
        mint,
        owner,
        amount,
        delegate,
        delegated_amount: if delegate.is_some() {
            delegated_amount
        } else {
            0
        },
        is_initialized: state != 0,
        is_frozen: state == 2,
        is_native,
        rent_exempt_reserve,
        close_authority,
    })
}
