use serde::Deserialize;

/// One trait entry in off-chain NFT JSON. Values are free-form (strings or
/// numbers in the wild), so they stay as raw JSON values.
#[derive(Clone, Debug, Deserialize)]
pub struct OffChainAttribute {
    #[serde(default)]
    pub trait_type: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Off-chain descriptive JSON pointed at by the on-chain metadata URI.
/// Every field is optional; real-world documents are wildly inconsistent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OffChainMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<OffChainAttribute>,
}

/// Fetch the off-chain JSON for a displayed asset. Best-effort: any fetch or
/// parse failure degrades to `None` ("no image") instead of propagating.
pub async fn fetch_off_chain(uri: &str) -> Option<OffChainMetadata> {
    if uri.is_empty() {
        return None;
    }
    let response = match reqwest::get(uri).await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!("off-chain metadata fetch failed for {uri}: {err}");
            return None;
        }
    };
    match response.json::<OffChainMetadata>().await {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::debug!("off-chain metadata parse failed for {uri}: {err}");
            None
        }
    }
}
