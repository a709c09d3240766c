use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use solana_wallet_core::{
    amount_to_ui_amount, EditionRecord, WalletConfig, WalletRpc, WalletWatcher, NATIVE_DECIMALS,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .compact()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --bin snapshot <owner-address> [rpc_url]");
        eprintln!("Example: cargo run --bin snapshot 7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU");
        std::process::exit(1);
    }

    let owner = Pubkey::from_str(&args[1]).context("invalid owner address")?;
    let mut config = WalletConfig::default();
    if let Some(rpc_url) = args
        .get(2)
        .cloned()
        .or_else(|| std::env::var("SOLANA_RPC_URL").ok())
    {
        config.rpc_url = rpc_url;
    }

    println!("🔍 Fetching wallet snapshot for {owner} via {}...", config.rpc_url);

    let rpc = Arc::new(WalletRpc::from_config(&config));
    let mut watcher = WalletWatcher::new(rpc, config, owner);
    watcher.tick().await;

    match watcher.balance() {
        Some(balance) => println!(
            "💰 {} SOL",
            amount_to_ui_amount(balance, Some(NATIVE_DECIMALS))
        ),
        None => println!("💰 balance unavailable"),
    }

    let portfolio = watcher.portfolio();
    println!(
        "📋 {} active token accounts, {} empty",
        portfolio.active.len(),
        portfolio.empty.len()
    );
    for valued in &portfolio.active {
        let mint = valued.account.mint;
        let info = watcher.directory().and_then(|d| d.get(&mint));
        let symbol = info.map(|i| i.symbol.as_str()).unwrap_or("raw");
        let decimals = info.map(|i| i.decimals);
        println!(
            "   {} {} (${:.2}) [{}]",
            amount_to_ui_amount(valued.account.amount, decimals),
            symbol,
            valued.usd_value,
            mint
        );
    }

    let holdings = watcher.nft_holdings().await?;
    println!("🖼  {} NFTs", holdings.len());
    for holding in &holdings {
        let kind = match &holding.edition {
            EditionRecord::Edition { edition, .. } => format!("edition #{edition}"),
            _ => "master edition".to_string(),
        };
        println!("   {} ({kind}) [{}]", holding.metadata.name, holding.metadata.mint);
    }

    Ok(())
}
