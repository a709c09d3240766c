use serde::{Deserialize, Serialize};

/// Wallet core configuration. Endpoint and cadence knobs only; key storage
/// and settings persistence live outside this crate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    #[serde(default = "WalletConfig::default_rpc_url")]
    pub rpc_url: String,
    /// Balance and token-account refresh cadence.
    #[serde(default = "WalletConfig::default_account_poll_interval_ms")]
    pub account_poll_interval_ms: u64,
    /// Upper bound on addresses per getMultipleAccounts call.
    #[serde(default = "WalletConfig::default_fetch_chunk_size")]
    pub fetch_chunk_size: usize,
    #[serde(default = "WalletConfig::default_token_list_url")]
    pub token_list_url: String,
    #[serde(default = "WalletConfig::default_price_endpoint")]
    pub price_endpoint: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: Self::default_rpc_url(),
            account_poll_interval_ms: Self::default_account_poll_interval_ms(),
            fetch_chunk_size: Self::default_fetch_chunk_size(),
            token_list_url: Self::default_token_list_url(),
            price_endpoint: Self::default_price_endpoint(),
        }
    }
}

impl WalletConfig {
    fn default_rpc_url() -> String {
        "https://api.mainnet-beta.solana.com".to_string()
    }

    const fn default_account_poll_interval_ms() -> u64 {
        5_000
    }

    const fn default_fetch_chunk_size() -> usize {
        100
    }

    fn default_token_list_url() -> String {
        "https://raw.githubusercontent.com/solana-labs/token-list/main/src/tokens/solana.tokenlist.json"
            .to_string()
    }

    fn default_price_endpoint() -> String {
        "https://api.coingecko.com/api/v3/simple/token_price/solana".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config: WalletConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WalletConfig::default());
        assert_eq!(config.account_poll_interval_ms, 5_000);
        assert_eq!(config.fetch_chunk_size, 100);
    }

    #[test]
    fn camel_case_overrides_apply() {
        let config: WalletConfig =
            serde_json::from_str(r#"{"rpcUrl": "http://localhost:8899", "fetchChunkSize": 25}"#)
                .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.fetch_chunk_size, 25);
        assert_eq!(config.account_poll_interval_ms, 5_000);
    }
}
