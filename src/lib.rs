//! # alipay-sdk
//!
//! RSA-signed request/response client for the Alipay open platform gateway.
//!
//! Every gateway call is a form-encoded request whose fields are signed with
//! the application's RSA private key (PKCS#1 v1.5 over SHA-1 for `RSA`, or
//! SHA-256 for `RSA2`). Responses carry a signature over the raw JSON of
//! their payload node, which is checked with the gateway's public key before
//! anything is decoded.
//!
//! ## Features
//!
//! - **Key loading**: PKCS#1 or PKCS#8 private keys and PKIX public keys from PEM
//! - **Canonical signing**: deterministic `key=value&...` strings signed with `RSA`/`RSA2`
//! - **Response verification**: signature over the payload node must match before decoding
//! - **Notification verification**: asynchronous callbacks checked with the declared `sign_type`
//! - **Chunked encryption**: PKCS#1 v1.5 encrypt/decrypt for payloads larger than one block
//!
//! ## Quick Start
//!
//! ```no_run
//! use alipay::{Client, ClientConfig, Environment, GenericCall, HttpMethod, KeyPair,
//!     PrivateKeyEncoding, SignerRegistry};
//!
//! # async fn run(private_pem: &[u8], alipay_public_pem: &[u8]) -> Result<(), alipay::Error> {
//! let key_pair = KeyPair::from_pem(private_pem, Some(alipay_public_pem), PrivateKeyEncoding::Pkcs8)?;
//! let config = ClientConfig::new("2021000000000000", Environment::Sandbox);
//! let client = Client::new(config, SignerRegistry::shared(key_pair))?;
//!
//! let call = GenericCall::new("alipay.trade.query")
//!     .biz_content(&serde_json::json!({ "out_trade_no": "123" }))?;
//! let response: serde_json::Value = client.execute(HttpMethod::Post, &call).await?;
//! println!("{}", response["alipay_trade_query_response"]["code"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`. [`Error::code`] maps each
//! failure to a stable [`ErrorCode`], so signature failures can be told apart
//! from transport and decoding failures.

pub mod api;
pub mod canonicalize;
pub mod cipher;
pub mod client;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod notify;
pub mod params;
pub mod signer;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiCall, GenericCall};
pub use client::Client;
pub use config::{ClientConfig, Environment};
pub use crypto::SignType;
pub use error::{Error, ErrorCode};
pub use keys::{KeyPair, PrivateKeyEncoding};
pub use notify::{parse_form, verify_notification, NotificationVerdict};
pub use params::{ParameterSet, SignedRequest};
pub use signer::{RequestSigner, RsaSigner, SignerRegistry};
#[cfg(feature = "fetch")]
pub use transport::HttpTransport;
pub use transport::{HttpMethod, Transport, TransportResponse};
