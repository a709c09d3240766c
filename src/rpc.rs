use std::str::FromStr;

use solana_account_decoder::UiAccount;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::config::WalletConfig;
use crate::core::error::WalletError;
use crate::token::account::{unpack_token_account, TokenAccount};

pub const DEFAULT_FETCH_CHUNK_SIZE: usize = 100;

/// Thin async wrapper around the ledger RPC node: account queries, chunked
/// multi-account fetches and transaction submission.
pub struct WalletRpc {
    client: RpcClient,
    chunk_size: usize,
}

impl WalletRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.into(), CommitmentConfig::confirmed()),
            chunk_size: DEFAULT_FETCH_CHUNK_SIZE,
        }
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                config.rpc_url.clone(),
                CommitmentConfig::confirmed(),
            ),
            chunk_size: config.fetch_chunk_size.max(1),
        }
    }

    /// Lamport balance of an address.
    pub async fn get_balance(&self, address: &Pubkey) -> Result<u64, WalletError> {
        Ok(self.client.get_balance(address).await?)
    }

    /// All SPL token accounts for an owner, decoded.
    ///
    /// A decode failure here propagates: the wallet's own account list
    /// failing to decode is a hard error worth surfacing.
    pub async fn get_token_accounts(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>, WalletError> {
        let keyed_accounts = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(spl_token::id()))
            .await?;

        keyed_accounts
            .into_iter()
            .map(|keyed| {
                let address = Pubkey::from_str(&keyed.pubkey).map_err(|_| {
                    WalletError::transport(format!("invalid pubkey in response: {}", keyed.pubkey))
                })?;
                decode_ui_account(&address, &keyed.account)
            })
            .collect()
    }

    /// Fetch many accounts in input order, at most `chunk_size` per remote
    /// call, all chunks in flight concurrently. Absent accounts come back as
    /// `None`; any chunk's transport failure fails the whole batch, after all
    /// chunks have completed. Duplicate addresses are fetched redundantly.
    pub async fn get_multiple_accounts_chunked(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Vec<u8>>>, WalletError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let fetches = addresses
            .chunks(self.chunk_size)
            .map(|chunk| self.client.get_multiple_accounts(chunk));
        let chunk_results = futures::future::join_all(fetches).await;

        let merged = merge_chunk_results(
            chunk_results
                .into_iter()
                .map(|result| {
                    result.map(|accounts| {
                        accounts
                            .into_iter()
                            .map(|account| account.map(|a| a.data))
                            .collect()
                    })
                })
                .collect(),
        )?;
        debug_assert_eq!(merged.len(), addresses.len());
        Ok(merged)
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash, WalletError> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    /// Assemble, sign and submit a transaction: fee payer is the signer,
    /// blockhash gives the validity window, confirmation is awaited within it.
    pub async fn send_instructions(
        &self,
        instructions: &[Instruction],
        signer: &dyn Signer,
    ) -> Result<Signature, WalletError> {
        let blockhash = self.client.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(&signer.pubkey()));
        let signers: Vec<&dyn Signer> = vec![signer];
        transaction
            .try_sign(&signers, blockhash)
            .map_err(|err| WalletError::Signing(err.to_string()))?;

        let signature = self.client.send_and_confirm_transaction(&transaction).await?;
        tracing::info!("sent and confirmed transaction {signature}");
        Ok(signature)
    }
}

fn decode_ui_account(address: &Pubkey, ui_account: &UiAccount) -> Result<TokenAccount, WalletError> {
    let account: Account = ui_account
        .decode()
        .ok_or_else(|| WalletError::transport(format!("undecodable account data for {address}")))?;
    unpack_token_account(&account.data, address)
}

/// Merge per-chunk fetch results back into one input-ordered list.
/// Waits for every chunk (no fail-fast) and then surfaces the first failure,
/// since a partial portfolio would be misleading.
fn merge_chunk_results<T, E: ToString>(
    chunk_results: Vec<Result<Vec<Option<T>>, E>>,
) -> Result<Vec<Option<T>>, WalletError> {
    let mut merged = Vec::new();
    let mut first_failure = None;
    for result in chunk_results {
        match result {
            Ok(items) => merged.extend(items),
            Err(err) if first_failure.is_none() => {
                first_failure = Some(WalletError::transport(err.to_string()))
            }
            Err(_) => {}
        }
    }
    match first_failure {
        Some(err) => Err(err),
        None => Ok(merged),
    }
}
