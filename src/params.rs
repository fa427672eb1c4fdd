use std::collections::BTreeMap;

use url::form_urlencoded;

/// Name of the signature field.
pub const SIGN_FIELD: &str = "sign";
/// Name of the algorithm field.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Request or notification fields, ordered by key bytes.
///
/// Keys are unique: the first value inserted for a key is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    fields: BTreeMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Insert a field. Returns `false` and leaves the existing value in place
    /// if `key` is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.fields.contains_key(&key) {
            tracing::warn!(key = %key, "duplicate parameter ignored");
            return false;
        }
        self.fields.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in ascending byte order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` serialization.
    pub fn to_form_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Fields ready to send: the signed parameters plus their `sign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: ParameterSet,
    sign: String,
}

impl SignedRequest {
    pub fn new(params: ParameterSet, sign: String) -> Self {
        Self { params, sign }
    }

    /// The fields the signature covers.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn sign(&self) -> &str {
        &self.sign
    }

    /// True when there was nothing to sign and `sign` is empty.
    pub fn is_unsigned(&self) -> bool {
        self.sign.is_empty()
    }

    /// Look up any field, including `sign`.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == SIGN_FIELD {
            Some(&self.sign)
        } else {
            self.params.get(key)
        }
    }

    /// Form body with `sign` appended last.
    pub fn to_form_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(self.params.to_form_body());
        serializer.append_pair(SIGN_FIELD, &self.sign);
        serializer.finish()
    }
}
