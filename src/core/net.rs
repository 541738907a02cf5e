// src/core/net.rs
// Conditional HTTP GET against the contributions origin (blocking reqwest).

use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};

use crate::config::{consts::ACCEPT, FetchOptions};
use crate::error::ChartError;

/// Origin-supplied revalidation tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validators {
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl Validators {
    pub fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none()
    }

    /// Conditional request headers these validators translate to.
    pub fn conditional_headers(&self) -> Vec<(header::HeaderName, &str)> {
        let mut out = Vec::new();
        if let Some(e) = &self.etag { out.push((header::IF_NONE_MATCH, e.as_str())); }
        if let Some(lm) = &self.last_modified { out.push((header::IF_MODIFIED_SINCE, lm.as_str())); }
        out
    }

    /// `self` wins field by field; missing fields fall back to `older`.
    pub fn or(self, older: &Validators) -> Validators {
        Validators {
            etag: self.etag.or_else(|| older.etag.clone()),
            last_modified: self.last_modified.or_else(|| older.last_modified.clone()),
        }
    }
}

/// What came back from the origin. `body` is only read for 2xx.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginResponse {
    pub status: u16,
    pub validators: Validators,
    pub body: Option<String>,
}

impl OriginResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == 304
    }
}

/// The one network capability the fetcher needs. Tests swap in a fake.
pub trait Origin {
    fn get(&self, url: &str, validators: &Validators) -> Result<OriginResponse, ChartError>;
}

impl<T: Origin + ?Sized> Origin for &T {
    fn get(&self, url: &str, validators: &Validators) -> Result<OriginResponse, ChartError> {
        (**self).get(url, validators)
    }
}

pub struct HttpOrigin {
    client: Client,
}

impl HttpOrigin {
    pub fn new(opts: &FetchOptions) -> Result<Self, ChartError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

        let client = Client::builder()
            .user_agent(opts.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl Origin for HttpOrigin {
    fn get(&self, url: &str, validators: &Validators) -> Result<OriginResponse, ChartError> {
        let mut req = self.client.get(url);
        for (name, value) in validators.conditional_headers() {
            req = req.header(name, value);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let read = |name: header::HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        let validators = Validators {
            etag: read(header::ETAG),
            last_modified: read(header::LAST_MODIFIED),
        };

        let body = if resp.status().is_success() { Some(resp.text()?) } else { None };
        Ok(OriginResponse { status, validators, body })
    }
}
