//! Fixed RSA-2048 key material and OpenSSL-produced reference signatures.

pub const APP_PRIVATE_PKCS1: &str = include_str!("../tests/fixtures/app_private_pkcs1.pem");
pub const APP_PRIVATE_PKCS8: &str = include_str!("../tests/fixtures/app_private_pkcs8.pem");
pub const APP_PUBLIC: &str = include_str!("../tests/fixtures/app_public.pem");
pub const OTHER_PUBLIC: &str = include_str!("../tests/fixtures/other_public.pem");

/// `openssl dgst -sha1 -sign` over `a=1&b=2&c=3`.
pub const CANONICAL_ABC_RSA_SIG: &str = include_str!("../tests/fixtures/canonical_abc_rsa.sig");
/// `openssl dgst -sha256 -sign` over `a=1&b=2&c=3`.
pub const CANONICAL_ABC_RSA2_SIG: &str =
    include_str!("../tests/fixtures/canonical_abc_rsa2.sig");
/// `openssl dgst -sha256 -sign` over `{"code":"10000"}`.
pub const QUERY_RESPONSE_RSA2_SIG: &str =
    include_str!("../tests/fixtures/query_response_rsa2.sig");

use crate::keys::{KeyPair, PrivateKeyEncoding};

/// App key pair whose public half matches the private key.
pub fn key_pair() -> KeyPair {
    KeyPair::from_pem(
        APP_PRIVATE_PKCS1.as_bytes(),
        Some(APP_PUBLIC.as_bytes()),
        PrivateKeyEncoding::Pkcs1,
    )
    .unwrap()
}

/// App key pair with no public key loaded.
pub fn signing_only_key_pair() -> KeyPair {
    KeyPair::from_pem(APP_PRIVATE_PKCS1.as_bytes(), None, PrivateKeyEncoding::Pkcs1).unwrap()
}

/// App private key paired with an unrelated public key.
pub fn mismatched_key_pair() -> KeyPair {
    KeyPair::from_pem(
        APP_PRIVATE_PKCS1.as_bytes(),
        Some(OTHER_PUBLIC.as_bytes()),
        PrivateKeyEncoding::Pkcs1,
    )
    .unwrap()
}
