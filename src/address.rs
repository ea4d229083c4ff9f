use bech32::{ToBase32, Variant};
use std::fmt;

/// Mainnet human-readable prefix.
pub const MAINNET_PREFIX: &str = "ckb";
/// Testnet human-readable prefix.
pub const TESTNET_PREFIX: &str = "ckt";

/// Leading payload byte of a full-format address.
const FULL_FORMAT: u8 = 0x00;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid hex in {field}: {source}")]
    Hex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error("unsupported hash type `{0}`")]
    UnknownHashType(String),
    #[error("bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
}

/// How a script's code hash is interpreted on chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashType {
    Data,
    Type,
    Data1,
    Data2,
    /// A value that is not one of the known hash types, kept lower-cased.
    Other(String),
}

impl HashType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "data" => Some(HashType::Data),
            "type" => Some(HashType::Type),
            "data1" => Some(HashType::Data1),
            "data2" => Some(HashType::Data2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HashType::Data => "data",
            HashType::Type => "type",
            HashType::Data1 => "data1",
            HashType::Data2 => "data2",
            HashType::Other(s) => s,
        }
    }

    /// Byte used in the serialized script, `None` for unknown types.
    pub fn to_byte(&self) -> Option<u8> {
        match self {
            HashType::Data => Some(0),
            HashType::Type => Some(1),
            HashType::Data1 => Some(2),
            HashType::Data2 => Some(4),
            HashType::Other(_) => None,
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lock script as read from the dump, with `0x`-prefixed hex fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDescriptor {
    pub code_hash: String,
    pub hash_type: HashType,
    pub args: String,
}

/// Turns a script into a chain address string.
pub trait AddressEncoder {
    fn encode(&self, script: &ScriptDescriptor, prefix: &str) -> Result<String, AddressError>;
}

/// Full-format bech32m address: `0x00 || code_hash || hash_type || args`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAddressEncoder;

impl AddressEncoder for FullAddressEncoder {
    fn encode(&self, script: &ScriptDescriptor, prefix: &str) -> Result<String, AddressError> {
        let code_hash = decode_hex("code_hash", &script.code_hash)?;
        let hash_type = script
            .hash_type
            .to_byte()
            .ok_or_else(|| AddressError::UnknownHashType(script.hash_type.to_string()))?;
        let args = decode_hex("args", &script.args)?;

        let mut payload = Vec::with_capacity(2 + code_hash.len() + args.len());
        payload.push(FULL_FORMAT);
        payload.extend_from_slice(&code_hash);
        payload.push(hash_type);
        payload.extend_from_slice(&args);

        let addr = bech32::encode(prefix, payload.to_base32(), Variant::Bech32m)?;
        Ok(addr)
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, AddressError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|source| AddressError::Hex { field, source })
}
