//! Supra RPC client.

use crate::api::response::{AccountInfo, SupraResponse, TransactionData};
use crate::config::SupraConfig;
use crate::error::{SupraError, SupraResult};
use crate::transaction::submission::{NodeTransport, SubmissionEnvelope};
use crate::types::{AccountAddress, HashValue};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Supra node RPC API.
///
/// Every call is a single HTTP request; nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use supra_rust_sdk::api::SupraClient;
/// use supra_rust_sdk::config::SupraConfig;
/// use supra_rust_sdk::types::AccountAddress;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let client = SupraClient::new(SupraConfig::testnet())?;
///     let info = client.get_account_info(AccountAddress::ONE).await?;
///     println!("sequence number: {}", info.sequence_number);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SupraClient {
    config: SupraConfig,
    client: Client,
}

impl SupraClient {
    /// Creates a new client.
    ///
    /// TLS certificate validation uses reqwest's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: SupraConfig) -> SupraResult<Self> {
        let pool = config.pool_config();

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(pool.max_idle_per_host.unwrap_or(usize::MAX))
            .pool_idle_timeout(pool.idle_timeout)
            .tcp_nodelay(pool.tcp_nodelay);

        if let Some(keepalive) = pool.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        let client = builder.build().map_err(SupraError::Http)?;
        Ok(Self { config, client })
    }

    /// Returns the RPC base URL.
    pub fn base_url(&self) -> &Url {
        self.config.rpc_url()
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &SupraConfig {
        &self.config
    }

    /// Sends one request to `path`, relative to the RPC base URL.
    ///
    /// The response is returned whatever its status code. An empty body is
    /// decoded as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, or if a successful
    /// response carries a body that is not JSON. Error responses with a
    /// plain-text body keep the text as a JSON string.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> SupraResult<SupraResponse<Value>> {
        let url = self.build_url(path);
        debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).json(&body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;
        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(data) => data,
                // gateways answer errors in plain text
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => {
                    return Err(SupraError::api(
                        status,
                        format!("{method} {path} returned a non-JSON body: {e}"),
                    ))
                }
            }
        };

        Ok(SupraResponse {
            status,
            data,
            headers,
        })
    }

    /// Gets the sequence number and authentication key of an account.
    ///
    /// # Errors
    ///
    /// Returns [`SupraError::AccountNotFound`] if the node does not know the
    /// account, or an error if the request fails.
    pub async fn get_account_info(&self, address: AccountAddress) -> SupraResult<AccountInfo> {
        let path = format!("accounts/{address}");
        let response = self.send(Method::GET, &path, None).await?;
        if response.status == 404 || (response.status == 200 && response.data.is_null()) {
            return Err(SupraError::AccountNotFound(address.to_string()));
        }
        decode(response, &path)
    }

    /// Gets the sequence number of an account.
    ///
    /// # Errors
    ///
    /// Same as [`get_account_info`](Self::get_account_info).
    pub async fn get_sequence_number(&self, address: AccountAddress) -> SupraResult<u64> {
        Ok(self.get_account_info(address).await?.sequence_number)
    }

    /// Gets a transaction by hash. `None` while the node does not know it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the node answers with an
    /// error status other than 404.
    pub async fn get_transaction(&self, hash: &HashValue) -> SupraResult<Option<TransactionData>> {
        let path = format!("transactions/{hash}");
        let response = self.send(Method::GET, &path, None).await?;
        if response.status == 404 || (response.status == 200 && response.data.is_null()) {
            return Ok(None);
        }
        decode(response, &path).map(Some)
    }

    /// Submits a transaction and returns its hash.
    ///
    /// # Errors
    ///
    /// Transport failures become [`SupraError::SubmissionFailed`]; node
    /// rejections are returned as [`SupraError::Api`].
    pub async fn submit(&self, envelope: &SubmissionEnvelope) -> SupraResult<HashValue> {
        let body = serde_json::to_value(envelope)?;
        let response = self
            .send(Method::POST, "transactions/submit", Some(body))
            .await
            .map_err(|e| match e {
                SupraError::Http(_) => SupraError::SubmissionFailed(e.sanitized_message()),
                other => other,
            })?;
        decode(response, "transactions/submit")
    }

    /// Simulates a transaction. Signatures in `envelope` are expected to be
    /// zeroed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the node rejects the
    /// transaction.
    pub async fn simulate(&self, envelope: &SubmissionEnvelope) -> SupraResult<TransactionData> {
        let body = serde_json::to_value(envelope)?;
        let response = self
            .send(Method::POST, "transactions/simulate", Some(body))
            .await?;
        decode(response, "transactions/simulate")
    }

    fn build_url(&self, path: &str) -> Url {
        let mut url = self.config.rpc_url().clone();
        if !path.is_empty() {
            if !url.path().ends_with('/') {
                url.set_path(&format!("{}/", url.path()));
            }
            url.set_path(&format!("{}{}", url.path(), path));
        }
        url
    }
}

fn decode<T: DeserializeOwned>(response: SupraResponse<Value>, path: &str) -> SupraResult<T> {
    if (200..300).contains(&response.status) {
        return serde_json::from_value(response.data).map_err(|e| {
            SupraError::api(response.status, format!("unexpected response from {path}: {e}"))
        });
    }

    let message = response
        .data
        .get("message")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .or_else(|| response.data.as_str().map(ToString::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());
    let error_code = response
        .data
        .get("error_code")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    Err(SupraError::api_with_code(response.status, message, error_code))
}

#[async_trait]
impl NodeTransport for SupraClient {
    async fn get_account_info(&self, address: AccountAddress) -> SupraResult<AccountInfo> {
        SupraClient::get_account_info(self, address).await
    }

    async fn submit(&self, envelope: &SubmissionEnvelope) -> SupraResult<HashValue> {
        SupraClient::submit(self, envelope).await
    }

    async fn simulate(&self, envelope: &SubmissionEnvelope) -> SupraResult<TransactionData> {
        SupraClient::simulate(self, envelope).await
    }

    async fn get_transaction(&self, hash: &HashValue) -> SupraResult<Option<TransactionData>> {
        SupraClient::get_transaction(self, hash).await
    }
}
