//! REST boundary to the ledger validator.
//!
//! [`RestGateway`] is the seam the high-level client talks through; the
//! polling and show logic is tested against stubs of it. [`HttpGateway`]
//! is the production implementation over the validator's HTTP API.

use std::time::Duration;

use base64::Engine;
use gdm_types::StateAddress;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Commit status of a submitted batch, as reported by the ledger.
///
/// The client only ever distinguishes `Pending` from everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStatus {
    Pending,
    Committed,
    Invalid,
    Unknown,
}

impl BatchStatus {
    fn from_api(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "COMMITTED" => Self::Committed,
            "INVALID" => Self::Invalid,
            _ => Self::Unknown,
        }
    }
}

/// Request/response boundary to the ledger REST API.
pub trait RestGateway {
    /// Submit serialized signed-batch bytes. Returns the raw response
    /// body on any success status.
    fn submit_batches(&self, batch_bytes: Vec<u8>) -> ClientResult<String>;

    /// Query the status of a batch, asking the ledger to hold the request
    /// up to `wait` seconds before answering.
    fn batch_status(&self, batch_id: &str, wait: u64) -> ClientResult<BatchStatus>;

    /// Raw bytes stored at an address, or `None` if never written.
    fn state_entry(&self, address: &StateAddress) -> ClientResult<Option<Vec<u8>>>;

    /// All (address, bytes) pairs under a namespace prefix.
    fn state_list(&self, prefix: &str) -> ClientResult<Vec<(String, Vec<u8>)>>;
}

/// Basic-auth credentials attached to every request when configured.
#[derive(Clone, Debug)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct StateEntryBody {
    data: String,
}

#[derive(Deserialize)]
struct StateListBody {
    data: Vec<StateListEntry>,
}

#[derive(Deserialize)]
struct StateListEntry {
    address: String,
    data: String,
}

#[derive(Deserialize)]
struct BatchStatusBody {
    data: Vec<BatchStatusEntry>,
}

#[derive(Deserialize)]
struct BatchStatusEntry {
    status: String,
}

/// Blocking HTTP implementation of [`RestGateway`].
pub struct HttpGateway {
    client: reqwest::blocking::Client,
    base_url: String,
    auth: Option<BasicAuth>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, auth: Option<BasicAuth>) -> ClientResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| ClientError::Connection {
                url: String::new(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}", self.base_url, suffix)
    }

    fn apply_auth(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match &self.auth {
            Some(auth) => req.basic_auth(&auth.username, Some(&auth.password)),
            None => req,
        }
    }

    /// Issue a request; `Ok(None)` on 404, error on other non-success.
    fn send(&self, req: reqwest::blocking::RequestBuilder, url: &str) -> ClientResult<Option<String>> {
        let response = self.apply_auth(req).send().map_err(|err| {
            ClientError::Connection {
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Submission {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        let body = response.text().map_err(|err| ClientError::Connection {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(body))
    }

    fn get(&self, suffix: &str) -> ClientResult<Option<String>> {
        let url = self.url(suffix);
        self.send(self.client.get(&url), &url)
    }
}

fn decode_b64(data: &str) -> ClientResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|err| ClientError::InvalidResponse(format!("bad base64 in state data: {err}")))
}

impl RestGateway for HttpGateway {
    fn submit_batches(&self, batch_bytes: Vec<u8>) -> ClientResult<String> {
        let url = self.url("batches");
        let req = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(batch_bytes);
        // 404 is only meaningful for reads; treat it as a failure here.
        self.send(req, &url)?.ok_or(ClientError::Submission {
            status: 404,
            reason: "Not Found".to_string(),
        })
    }

    fn batch_status(&self, batch_id: &str, wait: u64) -> ClientResult<BatchStatus> {
        let body = self
            .get(&format!("batch_statuses?id={batch_id}&wait={wait}"))?
            .ok_or_else(|| ClientError::InvalidResponse("no status for batch".into()))?;
        let parsed: BatchStatusBody = serde_json::from_str(&body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        let entry = parsed
            .data
            .first()
            .ok_or_else(|| ClientError::InvalidResponse("empty batch status data".into()))?;
        Ok(BatchStatus::from_api(&entry.status))
    }

    fn state_entry(&self, address: &StateAddress) -> ClientResult<Option<Vec<u8>>> {
        let body = match self.get(&format!("state/{address}"))? {
            Some(body) => body,
            None => return Ok(None),
        };
        let parsed: StateEntryBody = serde_json::from_str(&body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        Ok(Some(decode_b64(&parsed.data)?))
    }

    fn state_list(&self, prefix: &str) -> ClientResult<Vec<(String, Vec<u8>)>> {
        let body = self
            .get(&format!("state?address={prefix}"))?
            .ok_or_else(|| ClientError::InvalidResponse("state listing returned 404".into()))?;
        let parsed: StateListBody = serde_json::from_str(&body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        parsed
            .data
            .into_iter()
            .map(|entry| Ok((entry.address, decode_b64(&entry.data)?)))
            .collect()
    }
}
