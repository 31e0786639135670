//! Remote providers - pallet suggestions, address lookups, backup export
//!
//! Both clients are convenience layers, never required for correctness: the
//! suggestion client feeds the pallet engine's remote policy (validated, with
//! a deterministic fallback) and the lookup calls return a neutral result when
//! the provider is unconfigured or unreachable. Every request carries a hard
//! timeout so a slow provider can only delay, never block, the workflow.

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("fdt/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from provider calls
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider is not configured")]
    NotConfigured,

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned an error: {0}")]
    Api(String),
}

#[derive(Debug, Serialize)]
struct PalletSuggestionRequest<'a> {
    cities: &'a [String],
    pallets: &'a [u32],
}

#[derive(Debug, Deserialize)]
struct PalletSuggestionResponse {
    assignments: BTreeMap<String, u32>,
}

/// A pincode or city lookup result
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CityState {
    pub city: String,
    pub state: String,
}

/// Structured fields parsed out of a free-text address
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressSuggestion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse<T> {
    result: Option<T>,
}

/// Client for the suggestion provider (pallet assignment, address lookups)
#[derive(Debug)]
pub struct SuggestionClient {
    http: Client,
    base_url: Option<Url>,
    api_key: Option<String>,
}

impl SuggestionClient {
    /// Build a client; `base_url = None` means unconfigured
    pub fn new(
        base_url: Option<&str>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let base_url = base_url
            .map(|s| Url::parse(s).map_err(|e| ProviderError::InvalidUrl(e.to_string())))
            .transpose()?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// An unconfigured client; every call yields the neutral outcome
    pub fn unconfigured() -> Self {
        Self {
            http: Client::new(),
            base_url: None,
            api_key: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        let base = self.base_url.as_ref().ok_or(ProviderError::NotConfigured)?;
        base.join(path)
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    fn post<Req: Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, ProviderError> {
        let mut request = self.http.post(self.endpoint(path)?).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send()?;
        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "status {} from {path}",
                response.status()
            )));
        }
        Ok(response.json()?)
    }

    /// Ask the provider for a city -> pallet assignment.
    ///
    /// The reply is a raw suggestion; the pallet engine validates it against
    /// the assignment contract before accepting it.
    pub fn suggest_pallets(
        &self,
        cities: &[String],
        pallets: &[u32],
    ) -> Result<BTreeMap<String, u32>, ProviderError> {
        let response: PalletSuggestionResponse = self.post(
            "v1/pallet-suggestions",
            &PalletSuggestionRequest { cities, pallets },
        )?;
        Ok(response.assignments)
    }

    /// Pincode -> city/state. Neutral `None` when unconfigured or on failure.
    pub fn lookup_pincode(&self, pincode: &str) -> Option<CityState> {
        let response: Result<LookupResponse<CityState>, _> = self.post(
            "v1/lookups/pincode",
            &serde_json::json!({ "pincode": pincode }),
        );
        response.ok().and_then(|r| r.result)
    }

    /// City -> state. Neutral `None` when unconfigured or on failure.
    pub fn lookup_state(&self, city: &str) -> Option<String> {
        #[derive(Deserialize)]
        struct StateResult {
            state: String,
        }
        let response: Result<LookupResponse<StateResult>, _> =
            self.post("v1/lookups/city", &serde_json::json!({ "city": city }));
        response.ok().and_then(|r| r.result).map(|r| r.state)
    }

    /// Free-text address -> structured fields. Neutral `None` on failure.
    pub fn parse_address(&self, text: &str) -> Option<AddressSuggestion> {
        let response: Result<LookupResponse<AddressSuggestion>, _> =
            self.post("v1/lookups/address", &serde_json::json!({ "text": text }));
        response.ok().and_then(|r| r.result)
    }
}

#[derive(Debug, Serialize)]
struct BackupPayload<'a> {
    name: &'a str,
    snapshot: &'a serde_json::Value,
}

/// Client for the remote backup provider - a pure export target
pub struct BackupClient {
    http: Client,
    endpoint: Url,
    token: String,
}

impl BackupClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, ProviderError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    /// Upsert the single named backup object with a full snapshot of all
    /// collections. Never consulted for any runtime decision.
    pub fn push(&self, snapshot: &serde_json::Value) -> Result<(), ProviderError> {
        let response = self
            .http
            .put(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&BackupPayload {
                name: "fdt-backup",
                snapshot,
            })
            .send()?;
        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "backup upload failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
