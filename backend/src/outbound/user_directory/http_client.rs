//! Reqwest-backed `UserDirectory` adapter.
//!
//! This adapter owns transport details only: URL construction, the request
//! timeout, trace propagation, status mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{CreditRequestDto, UserRecordDto};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{TRACE_ID_HEADER, TraceId, UserId, UserRecord};

/// Default per-request timeout for directory calls.
pub const DEFAULT_DIRECTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory client bound to one base URL.
#[derive(Clone)]
pub struct UserDirectoryHttpClient {
    client: Client,
    base: Url,
}

impl UserDirectoryHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// The base URL may carry a path prefix; `users` is resolved beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, UserDirectoryError> {
        self.base
            .join(path)
            .map_err(|err| UserDirectoryError::rejected(format!("invalid directory path {path}: {err}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, UserDirectoryError> {
        let request = match TraceId::current() {
            Some(trace_id) => request.header(TRACE_ID_HEADER, trace_id.to_string()),
            None => request,
        };
        request.send().await.map_err(map_transport_error)
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_decode() {
        UserDirectoryError::decode(error.to_string())
    } else {
        UserDirectoryError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            UserDirectoryError::unavailable(message)
        }
        _ if status.is_server_error() => UserDirectoryError::unavailable(message),
        _ => UserDirectoryError::rejected(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, UserDirectoryError> {
    serde_json::from_slice(body).map_err(|err| {
        UserDirectoryError::decode(format!("invalid directory JSON payload: {err}"))
    })
}

fn decode_user(body: &[u8]) -> Result<UserRecord, UserDirectoryError> {
    decode::<UserRecordDto>(body)?
        .into_domain()
        .map_err(UserDirectoryError::decode)
}

fn decode_users(body: &[u8]) -> Result<Vec<UserRecord>, UserDirectoryError> {
    decode::<Vec<UserRecordDto>>(body)?
        .into_iter()
        .map(|dto| dto.into_domain().map_err(UserDirectoryError::decode))
        .collect()
}

/// Read the body, treating 404 as `Ok(None)` and other failures as errors.
async fn read_body(response: Response) -> Result<Option<Vec<u8>>, UserDirectoryError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(Some(body.to_vec()))
}

#[async_trait]
impl UserDirectory for UserDirectoryHttpClient {
    async fn find_user(&self, user_id: UserId) -> Result<Option<UserRecord>, UserDirectoryError> {
        let url = self.endpoint(&format!("users/{user_id}"))?;
        let response = self.send(self.client.get(url)).await?;
        read_body(response)
            .await?
            .map(|body| decode_user(&body))
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let url = self.endpoint("users")?;
        let response = self.send(self.client.get(url)).await?;
        match read_body(response).await? {
            Some(body) => decode_users(&body),
            None => Err(map_status_error(StatusCode::NOT_FOUND, b"users endpoint missing")),
        }
    }

    async fn credit_total(
        &self,
        user_id: UserId,
        delta: f64,
    ) -> Result<UserRecord, UserDirectoryError> {
        let url = self.endpoint(&format!("users/{user_id}/credits"))?;
        let request = self.client.post(url).json(&CreditRequestDto { delta });
        let response = self.send(request).await?;
        match read_body(response).await? {
            Some(body) => decode_user(&body),
            None => Err(UserDirectoryError::not_found(user_id.get())),
        }
    }
}
