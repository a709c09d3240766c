//! Narrows a wallet's token accounts to confirmed non-fungible holdings by
//! resolving their on-chain metadata and edition records.

pub mod metadata;
pub mod off_chain;

use std::collections::HashMap;

use solana_sdk::pubkey::Pubkey;

use crate::core::error::WalletError;
use crate::core::pda::{find_edition_address, find_metadata_address};
use crate::rpc::WalletRpc;
use crate::token::account::TokenAccount;

pub use metadata::{decode_edition, decode_metadata, EditionRecord, NftMetadata};
pub use off_chain::{fetch_off_chain, OffChainAttribute, OffChainMetadata};

/// One confirmed non-fungible holding: the owning token account joined with
/// its metadata and edition records by mint identity.
#[derive(Clone, Debug, PartialEq)]
pub struct NftHolding {
    pub token_account: TokenAccount,
    pub metadata: NftMetadata,
    pub edition: EditionRecord,
}

/// Resolve the NFT set out of a token-account list.
///
/// Unit balances (`amount == 1` exactly, in base units) are the candidates.
/// A candidate survives only if both its metadata and its edition account
/// decode; anything else is a plain unit-supply fungible and stays out of the
/// NFT view. Output is ordered by base58 mint string for a deterministic,
/// diff-friendly display across refreshes.
pub async fn resolve_nfts(
    rpc: &WalletRpc,
    accounts: &[TokenAccount],
) -> Result<Vec<NftHolding>, WalletError> {
    let units: Vec<TokenAccount> = accounts
        .iter()
        .filter(|account| account.amount == 1)
        .cloned()
        .collect();
    if units.is_empty() {
        return Ok(Vec::new());
    }

    let metadata_addresses = units
        .iter()
        .map(|account| find_metadata_address(&account.mint).map(|(address, _)| address))
        .collect::<Result<Vec<_>, _>>()?;
    let metadata_blobs = rpc.get_multiple_accounts_chunked(&metadata_addresses).await?;
    let metadatas = decode_metadata_blobs(&metadata_blobs);
    if metadatas.is_empty() {
        return Ok(Vec::new());
    }

    let edition_addresses = metadatas
        .iter()
        .map(|metadata| find_edition_address(&metadata.mint).map(|(address, _)| address))
        .collect::<Result<Vec<_>, _>>()?;
    let edition_blobs = rpc.get_multiple_accounts_chunked(&edition_addresses).await?;
    let editions = decode_edition_blobs(&metadatas, &edition_blobs);

    Ok(join_holdings(&units, metadatas, &editions))
}

/// Decode fetched metadata blobs, dropping absent or corrupt records. A
/// single broken account must never abort the batch.
pub fn decode_metadata_blobs(blobs: &[Option<Vec<u8>>]) -> Vec<NftMetadata> {
    blobs
        .iter()
        .flatten()
        .filter_map(|data| match decode_metadata(data) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                tracing::debug!("dropping undecodable metadata account: {err}");
                None
            }
        })
        .collect()
}

/// Decode fetched edition blobs, keyed back to their mint. Blobs arrive in
/// the same order as `metadatas`; absent or corrupt entries are dropped.
pub fn decode_edition_blobs(
    metadatas: &[NftMetadata],
    blobs: &[Option<Vec<u8>>],
) -> HashMap<Pubkey, EditionRecord> {
    metadatas
        .iter()
        .zip(blobs)
        .filter_map(|(metadata, blob)| {
            let data = blob.as_ref()?;
            match decode_edition(data) {
                Ok(edition) => Some((metadata.mint, edition)),
                Err(err) => {
                    tracing::debug!(
                        "dropping undecodable edition for mint {}: {err}",
                        metadata.mint
                    );
                    None
                }
            }
        })
        .collect()
}

/// Join metadata and edition back to the owning token account by mint.
pub fn join_holdings(
    units: &[TokenAccount],
    metadatas: Vec<NftMetadata>,
    editions: &HashMap<Pubkey, EditionRecord>,
) -> Vec<NftHolding> {
    let by_mint: HashMap<Pubkey, &TokenAccount> = units
        .iter()
        .map(|account| (account.mint, account))
        .collect();

    let mut holdings: Vec<NftHolding> = metadatas
        .into_iter()
        .filter_map(|metadata| {
            let edition = editions.get(&metadata.mint)?.clone();
            let token_account = (*by_mint.get(&metadata.mint)?).clone();
            Some(NftHolding {
                token_account,
                metadata,
                edition,
            })
        })
        .collect();

    holdings.sort_by(|a, b| {
        a.metadata
            .mint
            .to_string()
            .cmp(&b.metadata.mint.to_string())
    });
    holdings
}

#[cfg(test)]
mod tests {
    use super::metadata::test_fixtures::*;
    use super::*;

    fn unit_account(mint: Pubkey) -> TokenAccount {
        TokenAccount {
            address: Pubkey::new_unique(),
            mint,
            owner: Pubkey::new_unique(),
            amount: 1,
            delegate: None,
            delegated_amount: 0,
            is_initialized: true,
            is_frozen: false,
            is_native: false,
            rent_exempt_reserve: None,
            close_authority: None,
        }
    }

    #[test]
    fn corrupt_metadata_is_dropped_not_fatal() {
        let mint = Pubkey::new_unique();
        let blobs = vec![
            Some(encode_metadata(&mint, "ok", "uri")),
            Some(vec![4, 1, 2]),
            None,
        ];
        let metadatas = decode_metadata_blobs(&blobs);
        assert_eq!(metadatas.len(), 1);
        assert_eq!(metadatas[0].mint, mint);
    }

    #[test]
    fn resolution_keeps_only_confirmed_editions() {
        // A: metadata + master edition; B: no metadata; C: malformed edition
        let (mint_a, mint_b, mint_c) = (
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        );
        let units = vec![
            unit_account(mint_a),
            unit_account(mint_b),
            unit_account(mint_c),
        ];

        let metadata_blobs = vec![
            Some(encode_metadata(&mint_a, "A", "uri-a")),
            None,
            Some(encode_metadata(&mint_c, "C", "uri-c")),
        ];
        let metadatas = decode_metadata_blobs(&metadata_blobs);
        assert_eq!(metadatas.len(), 2);

        let edition_blobs = vec![
            Some(encode_master_edition_v2(0, None)),
            Some(vec![6, 9]), // truncated
        ];
        let editions = decode_edition_blobs(&metadatas, &edition_blobs);
        assert_eq!(editions.len(), 1);

        let holdings = join_holdings(&units, metadatas, &editions);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].metadata.mint, mint_a);
        assert!(holdings[0].edition.is_master());
    }

    #[test]
    fn holdings_sorted_by_mint_string() {
        let mints: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let units: Vec<TokenAccount> = mints.iter().map(|&mint| unit_account(mint)).collect();
        let metadatas: Vec<NftMetadata> = mints
            .iter()
            .map(|mint| decode_metadata(&encode_metadata(mint, "n", "u")).unwrap())
            .collect();
        let editions: HashMap<Pubkey, EditionRecord> = mints
            .iter()
            .map(|&mint| {
                (
                    mint,
                    decode_edition(&encode_master_edition_v2(0, None)).unwrap(),
                )
            })
            .collect();

        let holdings = join_holdings(&units, metadatas, &editions);
        let order: Vec<String> = holdings
            .iter()
            .map(|h| h.metadata.mint.to_string())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }
}
