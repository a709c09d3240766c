use std::sync::Arc;
use std::time::Duration;

use solana_sdk::pubkey::Pubkey;

use crate::config::WalletConfig;
use crate::core::error::WalletError;
use crate::nft::{resolve_nfts, NftHolding};
use crate::portfolio::{build_portfolio, Portfolio};
use crate::price::{fetch_quotes, PriceMap};
use crate::rpc::WalletRpc;
use crate::token::account::TokenAccount;
use crate::token::registry::TokenDirectory;

/// Owns the cached input generations for one wallet and re-runs the pure
/// aggregation over whatever is currently cached.
///
/// Single writer: only the watcher's own refresh methods replace a cache
/// field, and each replacement is wholesale (a new generation supersedes the
/// old one, never merges into it). A failed refresh keeps the last good
/// generation, so the view degrades to stale rather than empty.
pub struct WalletWatcher {
    rpc: Arc<WalletRpc>,
    config: WalletConfig,
    owner: Pubkey,
    balance: Option<u64>,
    token_accounts: Option<Vec<TokenAccount>>,
    directory: Option<TokenDirectory>,
    quotes: Option<PriceMap>,
}

impl WalletWatcher {
    pub fn new(rpc: Arc<WalletRpc>, config: WalletConfig, owner: Pubkey) -> Self {
        Self {
            rpc,
            config,
            owner,
            balance: None,
            token_accounts: None,
            directory: None,
            quotes: None,
        }
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    /// Last successfully fetched lamport balance.
    pub fn balance(&self) -> Option<u64> {
        self.balance
    }

    pub fn token_accounts(&self) -> Option<&[TokenAccount]> {
        self.token_accounts.as_deref()
    }

    pub fn directory(&self) -> Option<&TokenDirectory> {
        self.directory.as_ref()
    }

    /// Recompute the valued, partitioned portfolio from the cached
    /// generations. Cheap enough to redo wholesale on every call.
    pub fn portfolio(&self) -> Portfolio {
        build_portfolio(
            self.token_accounts.as_deref().unwrap_or(&[]),
            self.directory.as_ref(),
            self.quotes.as_ref(),
        )
    }

    /// Resolve the NFT holdings among the currently cached active accounts.
    pub async fn nft_holdings(&self) -> Result<Vec<NftHolding>, WalletError> {
        let portfolio = self.portfolio();
        let active: Vec<TokenAccount> = portfolio
            .active
            .into_iter()
            .map(|valued| valued.account)
            .collect();
        resolve_nfts(&self.rpc, &active).await
    }

    pub async fn refresh_balance(&mut self) -> Result<(), WalletError> {
        self.balance = Some(self.rpc.get_balance(&self.owner).await?);
        Ok(())
    }

    pub async fn refresh_token_accounts(&mut self) -> Result<(), WalletError> {
        self.token_accounts = Some(self.rpc.get_token_accounts(&self.owner).await?);
        Ok(())
    }

    /// Load the token directory once per process lifetime.
    pub async fn load_directory(&mut self) -> Result<(), WalletError> {
        if self.directory.is_none() {
            self.directory = Some(TokenDirectory::load(&self.config.token_list_url).await?);
        }
        Ok(())
    }

    /// Load quotes once, for the mints currently held. Needs a token-account
    /// generation to know which mints to ask for.
    pub async fn load_quotes(&mut self) -> Result<(), WalletError> {
        if self.quotes.is_some() {
            return Ok(());
        }
        let Some(accounts) = self.token_accounts.as_deref() else {
            return Ok(());
        };
        let mints: Vec<Pubkey> = accounts.iter().map(|account| account.mint).collect();
        self.quotes = Some(fetch_quotes(&self.config.price_endpoint, &mints).await?);
        Ok(())
    }

    /// One polling tick: refresh balance and token accounts, then the
    /// one-shot loads that are still pending. Failures are logged and the
    /// previous generation stays in place.
    pub async fn tick(&mut self) {
        if let Err(err) = self.refresh_balance().await {
            tracing::warn!("balance refresh failed, keeping last good value: {err}");
        }
        if let Err(err) = self.refresh_token_accounts().await {
            tracing::warn!("token account refresh failed, keeping last good value: {err}");
        }
        if let Err(err) = self.load_directory().await {
            tracing::warn!("token directory load failed, will retry: {err}");
        }
        if let Err(err) = self.load_quotes().await {
            tracing::warn!("price quote load failed, will retry: {err}");
        }
    }

    /// Poll forever on the configured interval. A hung fetch stalls only this
    /// loop; independent loops elsewhere keep their own cadence.
    pub async fn run(&mut self) {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.account_poll_interval_ms));
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
