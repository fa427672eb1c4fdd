use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::RESPONSE_SUFFIX;
use crate::error::Error;

/// Description of one gateway call.
pub trait ApiCall {
    /// Gateway method name, e.g. `alipay.trade.query`.
    fn method_name(&self) -> &str;

    /// Name of the JSON extension parameter (usually `biz_content`), if any.
    fn ext_param_name(&self) -> Option<&str> {
        None
    }

    /// Value of the extension parameter.
    fn ext_param_value(&self) -> String {
        String::new()
    }

    /// Additional method-specific fields (`notify_url`, `return_url`, ...).
    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Name of the response node that carries the signed payload.
    fn response_node(&self) -> String {
        response_node_name(self.method_name())
    }
}

/// `alipay.trade.query` -> `alipay_trade_query_response`.
pub fn response_node_name(method: &str) -> String {
    format!("{}{}", method.replace('.', "_"), RESPONSE_SUFFIX)
}

/// An [`ApiCall`] assembled at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericCall {
    method: String,
    ext_param: Option<(String, String)>,
    params: BTreeMap<String, String>,
}

impl GenericCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ext_param: None,
            params: BTreeMap::new(),
        }
    }

    /// Set the extension parameter to a raw string.
    pub fn ext_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.ext_param = Some((name.into(), value.into()));
        self
    }

    /// Set `biz_content` to the compact JSON serialization of `content`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if `content` cannot be represented as JSON.
    pub fn biz_content<T: Serialize>(self, content: &T) -> Result<Self, Error> {
        let json = serde_json::to_string(content)
            .map_err(|e| Error::Config(format!("biz_content is not serializable: {}", e)))?;
        Ok(self.ext_param("biz_content", json))
    }

    /// Add a method-specific field.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl ApiCall for GenericCall {
    fn method_name(&self) -> &str {
        &self.method
    }

    fn ext_param_name(&self) -> Option<&str> {
        self.ext_param.as_ref().map(|(name, _)| name.as_str())
    }

    fn ext_param_value(&self) -> String {
        self.ext_param
            .as_ref()
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    fn params(&self) -> BTreeMap<String, String> {
        self.params.clone()
    }
}
