//! Verification of asynchronous notifications posted by the gateway.

use url::form_urlencoded;

use crate::canonicalize::notification_canonical_string;
use crate::crypto::SignType;
use crate::error::Error;
use crate::params::{ParameterSet, SIGN_FIELD, SIGN_TYPE_FIELD};
use crate::signer::{RequestSigner, SignerRegistry};

/// Outcome of a notification check that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVerdict {
    /// The signature matched.
    Verified,
    /// No public key is loaded for the declared `sign_type`; nothing was
    /// checked.
    Skipped,
}

/// Parse an `application/x-www-form-urlencoded` body. For repeated keys the
/// first value is kept.
pub fn parse_form(body: &[u8]) -> ParameterSet {
    form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Verify a posted notification against the signer for its `sign_type`.
///
/// A missing or empty `sign_type` is treated as `RSA2`.
///
/// # Errors
///
/// - [`Error::UnsupportedSignType`] for an unknown `sign_type`
/// - [`Error::Encoding`] if `sign` is not valid base64
/// - [`Error::SignatureInvalid`] if `sign` is missing or does not match
pub fn verify_notification(
    registry: &SignerRegistry,
    form: &ParameterSet,
) -> Result<NotificationVerdict, Error> {
    let sign_type = match form.get(SIGN_TYPE_FIELD).map(str::trim) {
        None | Some("") => SignType::default(),
        Some(declared) => declared.parse()?,
    };

    let signer = match registry.get(sign_type).filter(|s| s.can_verify()) {
        Some(signer) => signer,
        None => {
            tracing::warn!(
                sign_type = %sign_type,
                "no public key for notification sign_type; verification skipped"
            );
            return Ok(NotificationVerdict::Skipped);
        }
    };

    let sign = form
        .get(SIGN_FIELD)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::SignatureInvalid("notification has no sign".to_string()))?;
    let canonical = notification_canonical_string(form);
    signer.verify_response_data(canonical.as_bytes(), sign)?;
    tracing::debug!(sign_type = %sign_type, "notification verified");
    Ok(NotificationVerdict::Verified)
}
