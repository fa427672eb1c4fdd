//! Request signers and the per-client signer registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::canonicalize::canonical_string;
use crate::crypto::{self, SignType};
use crate::error::Error;
use crate::keys::KeyPair;
use crate::params::ParameterSet;

/// Capabilities a client needs from a signature algorithm.
pub trait RequestSigner: Send + Sync {
    /// Value placed in the `sign_type` field.
    fn sign_type(&self) -> SignType;

    /// Sign the canonical string built from `keys` over `params`.
    ///
    /// Returns an empty string (no error) when either input is empty.
    fn sign(&self, keys: &[&str], params: &ParameterSet) -> Result<String, Error>;

    /// Whether a public key is available for verification.
    fn can_verify(&self) -> bool;

    /// Verify a base64 signature over raw response bytes.
    fn verify_response_data(&self, data: &[u8], sign: &str) -> Result<(), Error>;
}

/// RSA signer for one [`SignType`], sharing its key material.
#[derive(Debug, Clone)]
pub struct RsaSigner {
    key_pair: Arc<KeyPair>,
    sign_type: SignType,
}

impl RsaSigner {
    pub fn new(key_pair: Arc<KeyPair>, sign_type: SignType) -> Self {
        Self {
            key_pair,
            sign_type,
        }
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }
}

impl RequestSigner for RsaSigner {
    fn sign_type(&self) -> SignType {
        self.sign_type
    }

    fn sign(&self, keys: &[&str], params: &ParameterSet) -> Result<String, Error> {
        if keys.is_empty() || params.is_empty() {
            tracing::warn!(
                sign_type = %self.sign_type,
                "nothing to sign; request will carry an empty signature"
            );
            return Ok(String::new());
        }
        let canonical = canonical_string(keys, params);
        tracing::debug!(sign_type = %self.sign_type, canonical = %canonical, "signing");
        crypto::sign_data(
            self.key_pair.private_key(),
            canonical.as_bytes(),
            self.sign_type,
        )
    }

    fn can_verify(&self) -> bool {
        self.key_pair.can_verify()
    }

    fn verify_response_data(&self, data: &[u8], sign: &str) -> Result<(), Error> {
        let public_key = self.key_pair.public_key().ok_or_else(|| {
            Error::Config("no public key loaded; verification unavailable".to_string())
        })?;
        crypto::verify_signature(public_key, data, sign, self.sign_type)
    }
}

/// Signers keyed by [`SignType`], owned by a single client.
#[derive(Debug, Clone, Default)]
pub struct SignerRegistry {
    signers: HashMap<SignType, RsaSigner>,
}

impl SignerRegistry {
    pub fn new() -> Self {
        Self {
            signers: HashMap::new(),
        }
    }

    /// Register one key pair for every supported [`SignType`].
    pub fn shared(key_pair: KeyPair) -> Self {
        let key_pair = Arc::new(key_pair);
        let signers = SignType::ALL
            .into_iter()
            .map(|t| (t, RsaSigner::new(Arc::clone(&key_pair), t)))
            .collect();
        Self { signers }
    }

    /// Build from an explicit mapping.
    pub fn from_key_pairs(pairs: impl IntoIterator<Item = (SignType, KeyPair)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |registry, (t, kp)| registry.with(t, kp))
    }

    /// Register (or replace) the key pair for `sign_type`.
    pub fn with(mut self, sign_type: SignType, key_pair: KeyPair) -> Self {
        self.signers
            .insert(sign_type, RsaSigner::new(Arc::new(key_pair), sign_type));
        self
    }

    pub fn get(&self, sign_type: SignType) -> Option<&RsaSigner> {
        self.signers.get(&sign_type)
    }

    pub fn contains(&self, sign_type: SignType) -> bool {
        self.signers.contains_key(&sign_type)
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{
        key_pair, mismatched_key_pair, signing_only_key_pair, CANONICAL_ABC_RSA2_SIG,
        CANONICAL_ABC_RSA_SIG,
    };

    fn five_params() -> ParameterSet {
        [
            ("timestamp", "2024-05-01 12:00:00"),
            ("app_id", "2021000000000000"),
            ("method", "alipay.trade.query"),
            ("charset", "utf-8"),
            ("version", "1.0"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sign_matches_openssl_for_both_types() {
        let registry = SignerRegistry::shared(key_pair());
        let params: ParameterSet = [("c", "3"), ("a", "1"), ("b", "2")].into_iter().collect();
        let keys = params.sorted_keys();

        let sha1_signer = registry.get(SignType::Rsa).unwrap();
        assert_eq!(
            sha1_signer.sign(&keys, &params).unwrap(),
            CANONICAL_ABC_RSA_SIG.trim()
        );
        let sha256_signer = registry.get(SignType::Rsa2).unwrap();
        assert_eq!(
            sha256_signer.sign(&keys, &params).unwrap(),
            CANONICAL_ABC_RSA2_SIG.trim()
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = RsaSigner::new(Arc::new(key_pair()), SignType::Rsa2);
        let params = five_params();
        let keys = params.sorted_keys();
        let first = signer.sign(&keys, &params).unwrap();
        let second = signer.sign(&keys, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let signer = RsaSigner::new(Arc::new(key_pair()), SignType::Rsa2);
        let a = five_params();
        let b: ParameterSet = [
            ("version", "1.0"),
            ("charset", "utf-8"),
            ("method", "alipay.trade.query"),
            ("app_id", "2021000000000000"),
            ("timestamp", "2024-05-01 12:00:00"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            signer.sign(&a.sorted_keys(), &a).unwrap(),
            signer.sign(&b.sorted_keys(), &b).unwrap()
        );
    }

    #[test]
    fn test_sign_then_verify_canonical() {
        let signer = RsaSigner::new(Arc::new(key_pair()), SignType::Rsa);
        let params = five_params();
        let keys = params.sorted_keys();
        let sign = signer.sign(&keys, &params).unwrap();
        let canonical = canonical_string(&keys, &params);
        signer
            .verify_response_data(canonical.as_bytes(), &sign)
            .unwrap();
    }

    #[test]
    fn test_empty_inputs_yield_empty_signature() {
        let signer = RsaSigner::new(Arc::new(key_pair()), SignType::Rsa2);
        assert_eq!(signer.sign(&[], &five_params()).unwrap(), "");
        assert_eq!(signer.sign(&["app_id"], &ParameterSet::new()).unwrap(), "");

        let empty = ParameterSet::new();
        let sign = signer.sign(&empty.sorted_keys(), &empty).unwrap();
        assert!(crate::params::SignedRequest::new(empty, sign).is_unsigned());
    }

    #[test]
    fn test_mismatched_public_key_fails_verification() {
        let signer = RsaSigner::new(Arc::new(mismatched_key_pair()), SignType::Rsa2);
        let params = five_params();
        let keys = params.sorted_keys();
        let sign = signer.sign(&keys, &params).unwrap();
        let err = signer
            .verify_response_data(canonical_string(&keys, &params).as_bytes(), &sign)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SignatureInvalid);
    }

    #[test]
    fn test_signing_only_pair_reports_cannot_verify() {
        let signer = RsaSigner::new(Arc::new(signing_only_key_pair()), SignType::Rsa2);
        assert!(!signer.can_verify());
        let params = five_params();
        assert!(!signer.sign(&params.sorted_keys(), &params).unwrap().is_empty());
        assert!(signer.verify_response_data(b"x", "AAAA").is_err());
    }

    #[test]
    fn test_registry_explicit_mapping() {
        let registry = SignerRegistry::from_key_pairs([(SignType::Rsa2, key_pair())]);
        assert!(registry.contains(SignType::Rsa2));
        assert!(!registry.contains(SignType::Rsa));
        assert!(registry.get(SignType::Rsa2).unwrap().can_verify());

        let registry = registry.with(SignType::Rsa, signing_only_key_pair());
        assert!(!registry.get(SignType::Rsa).unwrap().can_verify());
        assert!(registry.get(SignType::Rsa2).unwrap().can_verify());
    }

    #[test]
    fn test_registries_are_independent() {
        let a = SignerRegistry::shared(key_pair());
        let b = SignerRegistry::shared(signing_only_key_pair());
        assert!(a.get(SignType::Rsa).unwrap().can_verify());
        assert!(!b.get(SignType::Rsa).unwrap().can_verify());
        assert!(a.get(SignType::Rsa2).unwrap().can_verify());
    }
}
