// API client module: a small blocking HTTP client that talks to the
// Neveo endpoint. Everything here is synchronous; the tool only ever has
// one request in flight.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Route that exchanges credentials for an access token.
const AUTH_PATH: &str = "/api/sessions/user_auth";
/// Route that lists the family media objects, paginated.
const MEDIA_PATH: &str = "/api/family/media_objects";

/// Fixed page size used for the media listing.
pub const PAGE_SIZE: u32 = 100;
/// Transport attempts per request before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// What went wrong talking to the endpoint. Callers that want to branch
/// on failure kind get this; `list_media` degrades it to an empty list.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials or token were rejected, even after re-authenticating.
    #[error("endpoint rejected authentication")]
    Auth,
    /// Any non-auth error status (>= 400).
    #[error("endpoint returned ({status}) {body}")]
    Status { status: u16, body: String },
    /// Connection-level failure after all attempts were exhausted.
    #[error("transport failure talking to endpoint")]
    Transport(#[source] reqwest::Error),
    /// The response decoded, but not into the shape we expect.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// HTTP verbs the endpoint is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One media record as returned by the listing route. Transient: fetched
/// per page and dropped once the page is processed.
#[derive(Deserialize, Debug, Clone)]
pub struct MediaItem {
    pub id: String,
    pub created_at: String,
    pub original: String,
}

#[derive(Deserialize, Debug)]
struct MediaListResponse {
    media_objects: Vec<MediaItem>,
}

/// Blocking client for the Neveo endpoint. Holds the credentials and the
/// access token obtained from `authenticate`. The token is re-fetched on
/// every listing call and again on a 401, never proactively cleared.
pub struct EndpointClient {
    client: Client,
    base_url: String,
    login: String,
    password: String,
    token: Option<String>,
    retry_delay: Duration,
}

impl EndpointClient {
    /// Create a client for the given base URL and credentials. A request
    /// timeout is set so a hung remote call cannot stall the run forever.
    pub fn new(base_url: &str, login: &str, password: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EndpointClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            login: login.to_string(),
            password: password.to_string(),
            token: None,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Override the pause between transport retries (the default is one
    /// second, which tests do not want to sit through).
    pub fn set_retry_delay(&mut self, delay: Duration) {
        self.retry_delay = delay;
    }

    /// Log in and store the access token. Returns whether it worked;
    /// authentication failures never propagate as errors. Called on every
    /// listing request, so a stale token is simply replaced.
    pub fn authenticate(&mut self) -> bool {
        debug!("logging in to endpoint {}", AUTH_PATH);
        let body = serde_json::json!({
            "user": { "email": self.login, "password": self.password }
        });
        // The auth route itself must never trigger re-authentication.
        match self.call_inner(Method::Post, AUTH_PATH, &[], Some(&body), false) {
            Ok(value) => match value.get("access_token").and_then(Value::as_str) {
                Some(token) => {
                    debug!("logged in");
                    self.token = Some(token.to_string());
                    true
                }
                None => {
                    warn!("auth response carried no access_token field");
                    false
                }
            },
            Err(err) => {
                warn!("authentication failed: {}", err);
                false
            }
        }
    }

    /// Send one request to the endpoint.
    ///
    /// Behavior by failure class:
    /// - 401: re-authenticate once and retry the call once, with further
    ///   re-authentication disabled so two 401s in a row terminate.
    /// - other status >= 400: fail immediately, no retry.
    /// - transport errors: up to 3 attempts with a pause in between.
    pub fn call(
        &mut self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.call_inner(method, path, params, body, true)
    }

    fn call_inner(
        &mut self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
        re_authenticate: bool,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("path : {}", url);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut req = match method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
                Method::Put => self.client.put(&url),
            };
            if !params.is_empty() {
                req = req.query(params);
            }
            if let Some(json) = body {
                req = req.json(json);
            }
            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status == StatusCode::UNAUTHORIZED && re_authenticate {
                        debug!("got 401, re-authenticating once");
                        self.authenticate();
                        return self.call_inner(method, path, params, body, false);
                    }
                    if status == StatusCode::UNAUTHORIZED {
                        return Err(ApiError::Auth);
                    }
                    if status.as_u16() >= 400 {
                        let text = resp.text().unwrap_or_default();
                        warn!("endpoint returned ({}) {}", status.as_u16(), text);
                        return Err(ApiError::Status {
                            status: status.as_u16(),
                            body: text,
                        });
                    }
                    return resp
                        .json::<Value>()
                        .map_err(|err| ApiError::Shape(err.to_string()));
                }
                Err(err) => {
                    warn!(
                        "transport error calling endpoint (attempt {}/{}): {}",
                        attempt, MAX_ATTEMPTS, err
                    );
                    if attempt >= MAX_ATTEMPTS {
                        error!(
                            "error calling endpoint: method: {:?}, path: {}, \
                             params: {:?}, body present: {}, re_authenticate: {}",
                            method,
                            path,
                            params,
                            body.is_some(),
                            re_authenticate
                        );
                        return Err(ApiError::Transport(err));
                    }
                    std::thread::sleep(self.retry_delay);
                }
            }
        }
    }

    /// Fetch one page of media objects. Re-authenticates up front; if that
    /// fails, the listing request is not sent at all. Every failure mode
    /// comes back as an empty list with a logged warning, so callers only
    /// distinguish "items" from "nothing available".
    pub fn list_media(&mut self, page: u32) -> Vec<MediaItem> {
        if !self.authenticate() {
            return Vec::new();
        }
        let token = self.token.clone().unwrap_or_default();
        let params = [
            ("limit", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
            ("token", token),
        ];
        match self.call(Method::Get, MEDIA_PATH, &params, None) {
            Ok(value) => match serde_json::from_value::<MediaListResponse>(value) {
                Ok(list) => {
                    debug!(
                        "page {} returned {} media objects",
                        page,
                        list.media_objects.len()
                    );
                    list.media_objects
                }
                Err(err) => {
                    warn!("media listing had unexpected shape: {}", err);
                    Vec::new()
                }
            },
            Err(err) => {
                warn!("media listing failed: {}", err);
                Vec::new()
            }
        }
    }
}
