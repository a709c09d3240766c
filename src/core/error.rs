use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::binary_reader::BinaryReaderError;

/// Error taxonomy for the wallet core.
///
/// Absence of an account is a valid outcome, not an error; `AccountNotFound`
/// only appears where a caller explicitly required presence.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("malformed token account: expected {expected} bytes, got {actual}")]
    MalformedAccount { expected: usize, actual: usize },
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),
    #[error("no valid bump found for derived address")]
    NoValidBump,
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),
    #[error("rpc transport failure: {0}")]
    Transport(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("failed to build instruction: {0}")]
    Instruction(String),
}

impl WalletError {
    pub fn malformed_account(expected: usize, actual: usize) -> Self {
        Self::MalformedAccount { expected, actual }
    }

    pub fn malformed_metadata(message: impl Into<String>) -> Self {
        Self::MalformedMetadata(message.into())
    }

    pub fn invalid_recipient(input: impl Into<String>) -> Self {
        Self::InvalidRecipient(input.into())
    }

    pub fn invalid_amount(input: impl Into<String>) -> Self {
        Self::InvalidAmount(input.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

impl From<BinaryReaderError> for WalletError {
    fn from(err: BinaryReaderError) -> Self {
        Self::MalformedMetadata(err.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for WalletError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Transport(err.to_string())
    }
}
