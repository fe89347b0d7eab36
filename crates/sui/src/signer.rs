//! Ed25519 signer loaded from a Sui secret key.

use anyhow::{Result, anyhow, bail};
use base64ct::Encoding;
use bech32::{FromBase32, ToBase32, Variant};
use std::env;
use std::fmt;
use std::str::FromStr;
use sui_crypto::ed25519::Ed25519PrivateKey;
use sui_sdk_types as sui;
use tracing::debug;

const SUI_PRIVKEY_HRP: &str = "suiprivkey";
const ED25519_FLAG: u8 = 0x00;

#[derive(Clone)]
pub struct Signer {
    pub address: sui::Address,
    pub key: Ed25519PrivateKey,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Signer {
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        Self {
            address: derive_address(&bytes),
            key: Ed25519PrivateKey::new(bytes),
        }
    }

    /// Build a signer from any accepted secret key spelling. The address is
    /// derived from the key.
    pub fn from_secret_key(secret: &str) -> Result<Self> {
        Ok(Self::from_secret_bytes(parse_secret_key(secret)?))
    }

    /// Load from `SUI_SECRET_KEY`. When `SUI_ADDRESS` is also set it must
    /// match the derived address.
    pub fn from_env() -> Result<Self> {
        let raw = env::var("SUI_SECRET_KEY")
            .map_err(|_| anyhow!("SUI_SECRET_KEY environment variable not set"))?;
        // `sui keytool` exports as `<scheme>:<key>` in some versions.
        let key_part = raw.split_once(':').map(|(_, b)| b).unwrap_or(&raw);
        let signer = Self::from_secret_key(key_part)?;

        if let Ok(env_address) = env::var("SUI_ADDRESS") {
            let env_address = sui::Address::from_str(env_address.trim())?;
            if env_address != signer.address {
                bail!(
                    "Address mismatch: SUI_ADDRESS {} does not match key-derived address {}",
                    env_address,
                    signer.address
                );
            }
        }
        Ok(signer)
    }

    /// Use `secret` when given, otherwise fall back to the environment.
    pub fn from_key_or_env(secret: Option<&str>) -> Result<Self> {
        match secret {
            Some(secret) => Self::from_secret_key(secret),
            None => Self::from_env(),
        }
    }

    /// Fresh random key, returned with its `suiprivkey` encoding.
    pub fn generate() -> Result<(Self, String)> {
        let bytes: [u8; 32] = rand::random();
        let encoded = encode_secret_key(&bytes)?;
        Ok((Self::from_secret_bytes(bytes), encoded))
    }
}

/// Decode a secret key given as bech32 `suiprivkey...`, base64 (optionally
/// prefixed with the scheme flag) or hex.
pub fn parse_secret_key(secret: &str) -> Result<[u8; 32]> {
    let secret = secret.trim();

    if secret.starts_with(SUI_PRIVKEY_HRP) {
        debug!("Decoding secret key as bech32 suiprivkey");
        let (hrp, data, _variant) = bech32::decode(secret)?;
        if hrp != SUI_PRIVKEY_HRP {
            bail!("invalid bech32 hrp '{}'", hrp);
        }
        let bytes = Vec::<u8>::from_base32(&data)?;
        if bytes.len() != 33 {
            bail!("bech32 payload must be 33 bytes (flag || key)");
        }
        if bytes[0] != ED25519_FLAG {
            bail!("unsupported key scheme flag {:#04x}; only ed25519 is supported", bytes[0]);
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[1..]);
        return Ok(key);
    }

    let hex_digits = secret.strip_prefix("0x").unwrap_or(secret);
    let looks_hex = secret.starts_with("0x")
        || (hex_digits.len() == 64 && hex_digits.chars().all(|c| c.is_ascii_hexdigit()));

    let mut bytes = if looks_hex {
        hex::decode(hex_digits)?
    } else {
        debug!("Decoding secret key as base64");
        base64ct::Base64::decode_vec(secret).map_err(|e| anyhow!("invalid secret key: {}", e))?
    };

    if bytes.len() == 33 {
        if bytes[0] != ED25519_FLAG {
            bail!("unsupported key scheme flag {:#04x}; only ed25519 is supported", bytes[0]);
        }
        bytes.remove(0);
    }
    if bytes.len() != 32 {
        bail!("secret key must be 32 bytes, got {}", bytes.len());
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Encode raw key bytes as `suiprivkey...`.
pub fn encode_secret_key(bytes: &[u8; 32]) -> Result<String> {
    let mut payload = Vec::with_capacity(33);
    payload.push(ED25519_FLAG);
    payload.extend_from_slice(bytes);
    Ok(bech32::encode(SUI_PRIVKEY_HRP, payload.to_base32(), Variant::Bech32)?)
}

/// Sui address of an ed25519 secret key.
pub fn derive_address(secret_key_bytes: &[u8; 32]) -> sui::Address {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(secret_key_bytes);
    let mut pk_bytes = [0u8; 32];
    pk_bytes.copy_from_slice(signing_key.verifying_key().as_bytes());
    sui::Ed25519PublicKey::new(pk_bytes).derive_address()
}
