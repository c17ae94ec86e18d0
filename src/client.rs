//! Blocking GraphQL client for the catalog API.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Url,
    blocking::Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::ApiConfig,
    error::ImportError,
    graphql::{GraphqlEnvelope, GraphqlRequest},
};

/// Status and raw body of one GraphQL POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlResponse {
    pub status: u16,
    pub body: String,
}

impl GraphqlResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a serialized request document and hands back the raw response.
pub trait Transport {
    fn execute(&self, payload: &str) -> Result<GraphqlResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, payload: &str) -> Result<GraphqlResponse> {
        (**self).execute(payload)
    }
}

pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-mcd-id",
            HeaderValue::from_str(&config.credentials.id)
                .context("API key id is not a valid header value")?,
        );
        let mut token = HeaderValue::from_str(&config.credentials.token)
            .context("API key token is not a valid header value")?;
        token.set_sensitive(true);
        headers.insert("x-mcd-token", token);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Building HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, payload: &str) -> Result<GraphqlResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .body(payload.to_string())
            .send()
            .with_context(|| format!("Sending request to {}", self.endpoint))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Reading response body from {}", self.endpoint))?;
        Ok(GraphqlResponse { status, body })
    }
}

pub struct CatalogClient<T> {
    transport: T,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs a query and decodes its `data`; HTTP failures and GraphQL errors
    /// both surface as [`ImportError`].
    pub fn query<V, D>(&self, document: &str, variables: V) -> Result<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let payload = GraphqlRequest::new(document, variables)
            .to_payload()
            .context("Serializing GraphQL request")?;
        let response = self.transport.execute(&payload)?;
        if !response.is_success() {
            return Err(ImportError::Http {
                status: response.status,
                body: response.body,
            }
            .into());
        }
        let envelope: GraphqlEnvelope<D> =
            serde_json::from_str(&response.body).context("Parsing GraphQL response")?;
        if !envelope.errors.is_empty() {
            let messages = envelope
                .errors
                .iter()
                .map(|e| e.describe())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ImportError::Graphql(messages).into());
        }
        envelope
            .data
            .ok_or_else(|| ImportError::Graphql("response carried no data".into()).into())
    }

    /// Sends a mutation and returns the body untouched, whatever the status.
    pub fn mutate_raw<V: Serialize>(&self, document: &str, variables: V) -> Result<String> {
        let payload = GraphqlRequest::new(document, variables)
            .to_payload()
            .context("Serializing GraphQL request")?;
        let response = self.transport.execute(&payload)?;
        debug!("Mutation returned HTTP {}", response.status);
        Ok(response.body)
    }
}
