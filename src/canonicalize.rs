use crate::params::{ParameterSet, SIGN_FIELD, SIGN_TYPE_FIELD};

/// Build the `key=value&key=value` string that gets signed.
///
/// - `keys` are visited in the order given (callers pass them sorted).
/// - Values are trimmed; keys whose trimmed value is empty are skipped.
/// - Keys absent from `params` are skipped.
pub fn canonical_string<K: AsRef<str>>(keys: &[K], params: &ParameterSet) -> String {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            let value = params.get(key)?.trim();
            (!value.is_empty()).then(|| format!("{}={}", key, value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonical string for an inbound notification: every posted field except
/// `sign` and `sign_type`, sorted, with the same trim/skip rules as outbound
/// signing.
pub fn notification_canonical_string(form: &ParameterSet) -> String {
    let keys: Vec<&str> = form
        .sorted_keys()
        .into_iter()
        .filter(|k| *k != SIGN_FIELD && *k != SIGN_TYPE_FIELD)
        .collect();
    canonical_string(&keys, form)
}
