use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

use crate::core::error::WalletError;

const MAINNET_CHAIN_ID: u32 = 101;

/// One entry of the token directory: descriptive info for a mint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub chain_id: u32,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenList {
    tokens: Vec<TokenInfo>,
}

/// Mint → descriptive info directory, loaded once per process lifetime and
/// read-only afterwards. Aggregation functions take it by reference; there is
/// no ambient global lookup.
#[derive(Clone, Debug, Default)]
pub struct TokenDirectory {
    entries: HashMap<Pubkey, TokenInfo>,
}

impl TokenDirectory {
    pub fn from_entries(entries: impl IntoIterator<Item = (Pubkey, TokenInfo)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Fetch the token list and keep the mainnet entries.
    pub async fn load(url: &str) -> Result<Self, WalletError> {
        let list: TokenList = reqwest::get(url)
            .await
            .map_err(|err| WalletError::transport(err.to_string()))?
            .json()
            .await
            .map_err(|err| WalletError::transport(err.to_string()))?;

        let entries = list
            .tokens
            .into_iter()
            .filter(|info| info.chain_id == MAINNET_CHAIN_ID)
            .filter_map(|info| {
                let mint = Pubkey::from_str(&info.address).ok()?;
                Some((mint, info))
            })
            .collect::<HashMap<_, _>>();
        tracing::info!("loaded token directory with {} entries", entries.len());

        Ok(Self { entries })
    }

    pub fn get(&self, mint: &Pubkey) -> Option<&TokenInfo> {
        self.entries.get(mint)
    }

    pub fn decimals(&self, mint: &Pubkey) -> Option<u8> {
        self.entries.get(mint).map(|info| info.decimals)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_token_list_entries() {
        let json = r#"{
            "tokens": [
                {
                    "chainId": 101,
                    "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "decimals": 6,
                    "logoURI": "https://example.com/usdc.png"
                },
                {
                    "chainId": 103,
                    "address": "So11111111111111111111111111111111111111112",
                    "symbol": "SOL",
                    "name": "Devnet SOL",
                    "decimals": 9
                }
            ]
        }"#;
        let list: TokenList = serde_json::from_str(json).unwrap();
        assert_eq!(list.tokens.len(), 2);
        assert_eq!(list.tokens[0].symbol, "USDC");
        assert_eq!(list.tokens[0].logo_uri.as_deref(), Some("https://example.com/usdc.png"));
        assert_eq!(list.tokens[1].logo_uri, None);
    }

    #[test]
    fn directory_lookups() {
        let mint = Pubkey::new_unique();
        let directory = TokenDirectory::from_entries([(
            mint,
            TokenInfo {
                address: mint.to_string(),
                chain_id: MAINNET_CHAIN_ID,
                name: "Test".to_string(),
                symbol: "TST".to_string(),
                decimals: 6,
                logo_uri: None,
            },
        )]);
        assert_eq!(directory.decimals(&mint), Some(6));
        assert_eq!(directory.decimals(&Pubkey::new_unique()), None);
        assert_eq!(directory.len(), 1);
    }
}
