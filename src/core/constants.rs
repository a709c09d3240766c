use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Metaplex token-metadata program.
pub const TOKEN_METADATA_PROGRAM: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// Wrapped SOL mint, used as the pseudo-mint for the native balance entry.
pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const NATIVE_DECIMALS: u8 = 9;

#[allow(non_snake_case)]
pub struct Tokens {
    pub SOL: Pubkey,
    pub USDC: Pubkey,
    pub USDT: Pubkey,
}

pub const TOKENS: Tokens = Tokens {
    SOL: NATIVE_MINT,
    USDC: pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
    USDT: pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB"),
};

/// Mints priced at a fixed 1.00 USD when the quote service omits them.
pub const PINNED_STABLECOIN_MINTS: &[Pubkey] = &[TOKENS.USDC, TOKENS.USDT];

/// Seed prefix shared by the metadata and edition PDAs.
pub const METADATA_SEED: &[u8] = b"metadata";
pub const EDITION_SEED: &[u8] = b"edition";
