use std::fmt;

use anyhow::Result;
use reqwest::Url;

use crate::{cli::AuthArgs, error::ImportError};

pub const DEFAULT_ENDPOINT: &str = "https://api.getmontecarlo.com/graphql";

/// API key pair sent as `x-mcd-id` / `x-mcd-token` on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub token: String,
}

impl Credentials {
    pub fn new(id: &str, token: &str) -> Result<Self> {
        let id = id.trim();
        let token = token.trim();
        if id.is_empty() {
            return Err(ImportError::InvalidConfig("API key id must not be empty".into()).into());
        }
        if token.is_empty() {
            return Err(
                ImportError::InvalidConfig("API key token must not be empty".into()).into(),
            );
        }
        Ok(Self {
            id: id.to_string(),
            token: token.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub credentials: Credentials,
    pub endpoint: Url,
}

impl ApiConfig {
    pub fn from_args(args: &AuthArgs) -> Result<Self> {
        let credentials = Credentials::new(&args.mcd_id, &args.mcd_token)?;
        let endpoint = parse_endpoint(&args.endpoint)?;
        Ok(Self {
            credentials,
            endpoint,
        })
    }
}

pub fn parse_endpoint(value: &str) -> Result<Url> {
    let url = Url::parse(value.trim())
        .map_err(|err| ImportError::InvalidConfig(format!("Endpoint '{value}': {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ImportError::InvalidConfig(format!(
            "Endpoint '{value}' must use http or https, not '{other}'"
        ))
        .into()),
    }
}
