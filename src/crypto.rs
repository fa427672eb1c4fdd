//! RSA PKCS#1 v1.5 signing and verification with SHA-1 or SHA-256.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Signature algorithm declared in the `sign_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignType {
    /// RSA with SHA-1.
    #[serde(rename = "RSA")]
    Rsa,
    /// RSA with SHA-256.
    #[default]
    #[serde(rename = "RSA2")]
    Rsa2,
}

impl SignType {
    pub const ALL: [SignType; 2] = [SignType::Rsa, SignType::Rsa2];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Rsa => "RSA",
            SignType::Rsa2 => "RSA2",
        }
    }

    /// Hash `data` with this algorithm's digest.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            SignType::Rsa => Sha1::digest(data).to_vec(),
            SignType::Rsa2 => Sha256::digest(data).to_vec(),
        }
    }

    fn padding(&self) -> Pkcs1v15Sign {
        match self {
            SignType::Rsa => Pkcs1v15Sign::new::<Sha1>(),
            SignType::Rsa2 => Pkcs1v15Sign::new::<Sha256>(),
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSA" => Ok(SignType::Rsa),
            "RSA2" => Ok(SignType::Rsa2),
            other => Err(Error::UnsupportedSignType(other.to_string())),
        }
    }
}

/// Hash and sign `data`, returning the raw signature bytes.
pub fn sign_pkcs1v15(
    private_key: &RsaPrivateKey,
    data: &[u8],
    sign_type: SignType,
) -> Result<Vec<u8>, Error> {
    let hashed = sign_type.digest(data);
    private_key
        .sign(sign_type.padding(), &hashed)
        .map_err(|e| Error::Crypto(e.to_string()))
}

/// Hash `data` and check a raw signature against it.
///
/// Any mismatch is reported as [`Error::SignatureInvalid`].
pub fn verify_pkcs1v15(
    public_key: &RsaPublicKey,
    data: &[u8],
    signature: &[u8],
    sign_type: SignType,
) -> Result<(), Error> {
    let hashed = sign_type.digest(data);
    public_key
        .verify(sign_type.padding(), &hashed, signature)
        .map_err(|e| Error::SignatureInvalid(format!("{} signature mismatch: {}", sign_type, e)))
}

/// Sign `data` and return the base64-encoded signature.
pub fn sign_data(
    private_key: &RsaPrivateKey,
    data: &[u8],
    sign_type: SignType,
) -> Result<String, Error> {
    let signature = sign_pkcs1v15(private_key, data, sign_type)?;
    Ok(general_purpose::STANDARD.encode(signature))
}

/// Verify a base64-encoded signature over `data`.
///
/// # Errors
///
/// [`Error::Encoding`] if the signature is not valid base64,
/// [`Error::SignatureInvalid`] if it does not match.
pub fn verify_signature(
    public_key: &RsaPublicKey,
    data: &[u8],
    signature_b64: &str,
    sign_type: SignType,
) -> Result<(), Error> {
    let signature = general_purpose::STANDARD.decode(signature_b64)?;
    verify_pkcs1v15(public_key, data, &signature, sign_type)
}
