use solana_sdk::pubkey::Pubkey;

use crate::core::binary_reader::BinaryReader;
use crate::core::error::WalletError;

// Metaplex account discriminants ("key" byte).
const KEY_EDITION_V1: u8 = 1;
const KEY_MASTER_EDITION_V1: u8 = 2;
const KEY_METADATA_V1: u8 = 4;
const KEY_MASTER_EDITION_V2: u8 = 6;

/// Decoded on-chain descriptive record for a mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftMetadata {
    pub mint: Pubkey,
    pub update_authority: Pubkey,
    pub name: String,
    pub symbol: String,
    /// Points at off-chain descriptive JSON, fetched lazily per display.
    pub uri: String,
    pub seller_fee_basis_points: u16,
}

/// Edition record for a unit-supply mint, one of three mutually exclusive
/// on-chain layouts. Decoded once; the discriminant byte is never
/// re-inspected downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditionRecord {
    MasterEditionV1 { supply: u64, max_supply: Option<u64> },
    MasterEditionV2 { supply: u64, max_supply: Option<u64> },
    Edition { parent: Pubkey, edition: u64 },
}

impl EditionRecord {
    pub fn is_master(&self) -> bool {
        matches!(
            self,
            Self::MasterEditionV1 { .. } | Self::MasterEditionV2 { .. }
        )
    }
}

/// Decode a Metaplex metadata account. Fixed-size strings are stored
/// NUL-padded inside their borsh length prefix and come back trimmed.
pub fn decode_metadata(data: &[u8]) -> Result<NftMetadata, WalletError> {
    let mut reader = BinaryReader::new(data);
    let key = reader.read_u8()?;
    if key != KEY_METADATA_V1 {
        return Err(WalletError::malformed_metadata(format!(
            "unexpected metadata key {key}"
        )));
    }

    let update_authority = reader.read_pubkey()?;
    let mint = reader.read_pubkey()?;
    let name = trim_nul(reader.read_string()?);
    let symbol = trim_nul(reader.read_string()?);
    let uri = trim_nul(reader.read_string()?);
    let seller_fee_basis_points = reader.read_u16()?;
    // Creators, flags and collection info follow but the wallet never shows
    // them; trailing bytes are left unread.

    Ok(NftMetadata {
        mint,
        update_authority,
        name,
        symbol,
        uri,
        seller_fee_basis_points,
    })
}

/// Decode an edition account, dispatching on the leading discriminant.
pub fn decode_edition(data: &[u8]) -> Result<EditionRecord, WalletError> {
    let mut reader = BinaryReader::new(data);
    let key = reader.read_u8()?;
    match key {
        KEY_MASTER_EDITION_V1 => {
            let supply = reader.read_u64()?;
            let max_supply = reader.read_option_u64()?;
            // v1 carries two printing mints the wallet does not use
            reader.read_pubkey()?;
            reader.read_pubkey()?;
            Ok(EditionRecord::MasterEditionV1 { supply, max_supply })
        }
        KEY_MASTER_EDITION_V2 => {
            let supply = reader.read_u64()?;
            let max_supply = reader.read_option_u64()?;
            Ok(EditionRecord::MasterEditionV2 { supply, max_supply })
        }
        KEY_EDITION_V1 => {
            let parent = reader.read_pubkey()?;
            let edition = reader.read_u64()?;
            Ok(EditionRecord::Edition { parent, edition })
        }
        other => Err(WalletError::malformed_metadata(format!(
            "unexpected edition key {other}"
        ))),
    }
}

fn trim_nul(value: String) -> String {
    value.trim_end_matches('\0').to_string()
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    fn borsh_string(value: &str, padded_len: usize) -> Vec<u8> {
        let mut bytes = value.as_bytes().to_vec();
        bytes.resize(padded_len, 0);
        let mut out = (bytes.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(&bytes);
        out
    }

    pub(crate) fn encode_metadata(mint: &Pubkey, name: &str, uri: &str) -> Vec<u8> {
        let mut data = vec![KEY_METADATA_V1];
        data.extend_from_slice(Pubkey::new_unique().as_ref());
        data.extend_from_slice(mint.as_ref());
        data.extend(borsh_string(name, 32));
        data.extend(borsh_string("SYM", 10));
        data.extend(borsh_string(uri, 200));
        data.extend_from_slice(&500u16.to_le_bytes());
        data.push(0); // no creators
        data
    }

    pub(crate) fn encode_master_edition_v2(supply: u64, max_supply: Option<u64>) -> Vec<u8> {
        let mut data = vec![KEY_MASTER_EDITION_V2];
        data.extend_from_slice(&supply.to_le_bytes());
        match max_supply {
            Some(value) => {
                data.push(1);
                data.extend_from_slice(&value.to_le_bytes());
            }
            None => data.push(0),
        }
        data
    }

    pub(crate) fn encode_edition(parent: &Pubkey, edition: u64) -> Vec<u8> {
        let mut data = vec![KEY_EDITION_V1];
        data.extend_from_slice(parent.as_ref());
        data.extend_from_slice(&edition.to_le_bytes());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    #[test]
    fn decodes_metadata_and_trims_padding() {
        let mint = Pubkey::new_unique();
        let data = encode_metadata(&mint, "Degen Ape", "https://example.com/1.json");
        let metadata = decode_metadata(&data).unwrap();
        assert_eq!(metadata.mint, mint);
        assert_eq!(metadata.name, "Degen Ape");
        assert_eq!(metadata.symbol, "SYM");
        assert_eq!(metadata.uri, "https://example.com/1.json");
        assert_eq!(metadata.seller_fee_basis_points, 500);
    }

    #[test]
    fn rejects_wrong_discriminant() {
        let mint = Pubkey::new_unique();
        let mut data = encode_metadata(&mint, "x", "y");
        data[0] = 9;
        assert!(matches!(
            decode_metadata(&data),
            Err(WalletError::MalformedMetadata(_))
        ));
        assert!(matches!(
            decode_metadata(&[]),
            Err(WalletError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn decodes_all_edition_variants() {
        let record = decode_edition(&encode_master_edition_v2(5, Some(10))).unwrap();
        assert_eq!(
            record,
            EditionRecord::MasterEditionV2 {
                supply: 5,
                max_supply: Some(10)
            }
        );
        assert!(record.is_master());

        let parent = Pubkey::new_unique();
        let record = decode_edition(&encode_edition(&parent, 42)).unwrap();
        assert_eq!(record, EditionRecord::Edition { parent, edition: 42 });
        assert!(!record.is_master());
    }

    #[test]
    fn master_edition_v1_requires_printing_mints() {
        // v2 layout bytes with a v1 discriminant are too short for v1
        let mut data = encode_master_edition_v2(1, None);
        data[0] = 2;
        assert!(matches!(
            decode_edition(&data),
            Err(WalletError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn unknown_edition_key_is_malformed() {
        assert!(matches!(
            decode_edition(&[7, 0, 0]),
            Err(WalletError::MalformedMetadata(_))
        ));
    }
}
