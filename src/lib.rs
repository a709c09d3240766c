//! Core library entry point exposing the wallet logic and public data types.
//!
//! The view layer sits on top of six pieces: account byte-layout decoding,
//! program-derived address derivation, chunked account fetching, portfolio
//! aggregation, NFT resolution and transfer building. Everything here is
//! request/response or pure; no server surface is exposed.

pub mod config;
pub mod core;
pub mod nft;
pub mod portfolio;
pub mod price;
pub mod rpc;
pub mod token;
pub mod transfer;
pub mod watcher;

pub use crate::config::WalletConfig;
pub use crate::core::constants::{NATIVE_DECIMALS, NATIVE_MINT};
pub use crate::core::error::WalletError;
pub use crate::nft::{resolve_nfts, EditionRecord, NftHolding, NftMetadata, OffChainMetadata};
pub use crate::portfolio::{build_portfolio, Portfolio, ValuedTokenAccount};
pub use crate::price::{fetch_quotes, PriceMap};
pub use crate::rpc::WalletRpc;
pub use crate::token::account::{unpack_token_account, TokenAccount, TOKEN_ACCOUNT_LEN};
pub use crate::token::amount::{amount_to_ui_amount, ui_amount_to_amount};
pub use crate::token::registry::{TokenDirectory, TokenInfo};
pub use crate::transfer::{
    plan_transfer, send_transfer, TransferAsset, TransferHistory, TransferPlan, TransferRecord,
};
pub use crate::watcher::WalletWatcher;
