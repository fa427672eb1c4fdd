//! Request assembly, dispatch and response verification.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::api::ApiCall;
use crate::config::ClientConfig;
use crate::constants::{CHARSET, FORMAT, TIME_FORMAT, VERSION};
use crate::crypto::SignType;
use crate::error::Error;
use crate::notify::{verify_notification, NotificationVerdict};
use crate::params::{ParameterSet, SignedRequest, SIGN_FIELD};
use crate::signer::{RequestSigner, RsaSigner, SignerRegistry};
use crate::transport::{HttpMethod, Transport};

/// Gateway client. Build once and reuse for every call.
pub struct Client {
    config: ClientConfig,
    utc_offset: FixedOffset,
    sign_type: SignType,
    registry: SignerRegistry,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Build a client that talks HTTP through `reqwest`.
    #[cfg(feature = "fetch")]
    pub fn new(config: ClientConfig, registry: SignerRegistry) -> Result<Self, Error> {
        let timeout = config.timeout_secs.map(std::time::Duration::from_secs);
        let transport = Arc::new(crate::transport::HttpTransport::new(timeout));
        Self::with_transport(config, registry, transport)
    }

    /// Build a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the configuration is invalid or `registry` has no
    /// signer for the configured `sign_type`.
    pub fn with_transport(
        config: ClientConfig,
        registry: SignerRegistry,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        config.validate()?;
        let utc_offset = config.utc_offset()?;
        let sign_type = config.sign_type;
        if !registry.contains(sign_type) {
            return Err(Error::Config(format!(
                "no key pair registered for sign_type {}",
                sign_type
            )));
        }
        tracing::debug!(
            app_id = %config.app_id,
            endpoint = %config.api_url(),
            sign_type = %sign_type,
            "client initialised"
        );
        Ok(Self {
            config,
            utc_offset,
            sign_type,
            registry,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn app_id(&self) -> &str {
        &self.config.app_id
    }

    pub fn partner_id(&self) -> &str {
        &self.config.partner_id
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// Switch the algorithm used for subsequent calls.
    pub fn set_sign_type(&mut self, sign_type: SignType) -> Result<(), Error> {
        if !self.registry.contains(sign_type) {
            return Err(Error::Config(format!(
                "no key pair registered for sign_type {}",
                sign_type
            )));
        }
        self.sign_type = sign_type;
        Ok(())
    }

    pub fn registry(&self) -> &SignerRegistry {
        &self.registry
    }

    /// Signer for the active [`SignType`].
    pub fn signer(&self) -> Result<&RsaSigner, Error> {
        self.registry.get(self.sign_type).ok_or_else(|| {
            Error::Config(format!(
                "no key pair registered for sign_type {}",
                self.sign_type
            ))
        })
    }

    /// Assemble and sign the fields for `call`.
    pub fn build_request(&self, call: &impl ApiCall) -> Result<SignedRequest, Error> {
        let signer = self.signer()?;
        let timestamp = Utc::now()
            .with_timezone(&self.utc_offset)
            .format(TIME_FORMAT)
            .to_string();

        let mut params = ParameterSet::new();
        params.insert("app_id", self.config.app_id.as_str());
        params.insert("method", call.method_name());
        params.insert("format", FORMAT);
        params.insert("charset", CHARSET);
        params.insert("sign_type", signer.sign_type().as_str());
        params.insert("timestamp", timestamp);
        params.insert("version", VERSION);
        if let Some(name) = call.ext_param_name().filter(|n| !n.is_empty()) {
            params.insert(name, call.ext_param_value());
        }
        for (key, value) in call.params() {
            if key == SIGN_FIELD {
                tracing::warn!("caller-supplied sign field ignored");
                continue;
            }
            params.insert(key, value);
        }

        let keys = params.sorted_keys();
        let sign = signer.sign(&keys, &params)?;
        let request = SignedRequest::new(params, sign);
        if request.is_unsigned() {
            tracing::warn!(
                api_method = %call.method_name(),
                "request built without a signature"
            );
        }
        Ok(request)
    }

    /// Send `call` and decode the verified response into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        call: &impl ApiCall,
    ) -> Result<T, Error> {
        let request = self.build_request(call)?;
        let url = self.config.api_url();
        tracing::debug!(
            api_method = %call.method_name(),
            http_method = %method,
            url = %url,
            "dispatching gateway call"
        );

        let resp = self
            .transport
            .send(method, url, request.to_form_body())
            .await?;
        if !resp.is_success() {
            tracing::warn!(
                api_method = %call.method_name(),
                status = resp.status,
                "gateway returned non-success status"
            );
            return Err(Error::Transport(format!(
                "HTTP {} from {}",
                resp.status, url
            )));
        }

        self.verify_and_decode(&call.response_node(), &resp.body)
            .map_err(|e| {
                tracing::warn!(
                    api_method = %call.method_name(),
                    status = resp.status,
                    code = %e.code(),
                    error = %e,
                    "gateway response rejected"
                );
                e
            })
    }

    /// Verify the signature over `response_node` (when a public key is
    /// loaded) and decode the body into `T`.
    ///
    /// The body is never decoded if verification fails. `response_node` is
    /// usually [`ApiCall::response_node`].
    pub fn verify_and_decode<T: DeserializeOwned>(
        &self,
        response_node: &str,
        body: &[u8],
    ) -> Result<T, Error> {
        let signer = self.signer()?;
        if signer.can_verify() {
            verify_response(signer, body, response_node)?;
        } else {
            tracing::debug!(
                response_node = %response_node,
                "no public key loaded; response signature not checked"
            );
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Verify an asynchronous notification with the signer matching its
    /// declared `sign_type`.
    pub fn verify_notification(&self, form: &ParameterSet) -> Result<NotificationVerdict, Error> {
        verify_notification(&self.registry, form)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("sign_type", &self.sign_type)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Raw JSON text of the payload node and the top-level `sign` value.
pub fn extract_signed_payload<'a>(body: &'a [u8], node: &str) -> Result<(&'a str, String), Error> {
    let envelope: HashMap<String, &'a RawValue> = serde_json::from_slice(body)?;
    let payload: &'a RawValue = envelope
        .get(node)
        .copied()
        .ok_or_else(|| Error::SignatureInvalid(format!("response has no {} node", node)))?;
    let sign = envelope
        .get(SIGN_FIELD)
        .and_then(|raw| serde_json::from_str::<String>(raw.get()).ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::SignatureInvalid("response has no sign".to_string()))?;
    Ok((payload.get(), sign))
}

/// Check the response's `sign` over the raw bytes of its payload node.
pub fn verify_response(signer: &impl RequestSigner, body: &[u8], node: &str) -> Result<(), Error> {
    let (payload, sign) = extract_signed_payload(body, node)?;
    signer.verify_response_data(payload.as_bytes(), &sign)
}
