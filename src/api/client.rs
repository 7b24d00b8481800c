use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::{ApiConfig, CATEGORIES_PATH, TRANSACTIONS_PATH};
use crate::error::{ApiError, Result};
use crate::models::{category::Category, form::NewTransaction, transaction::Transaction};

/// The three calls the screens make against the remote service.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// The created record in the response body is not used.
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<()>;
}

/// `reqwest` backed implementation talking JSON to the configured host.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::InvalidHeader(format!("{name}: {value}")))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        let response = check_status(self.client.get(&url).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl TransactionApi for HttpApi {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json(TRANSACTIONS_PATH).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_json(CATEGORIES_PATH).await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<()> {
        let url = self.config.url(TRANSACTIONS_PATH);
        let body = serde_json::to_vec(transaction)?;
        debug!(%url, payload = %String::from_utf8_lossy(&body), "POST");
        let response = self.client.post(&url).body(body).send().await?;
        check_status(response)?;
        Ok(())
    }
}
