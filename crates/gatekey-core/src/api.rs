//! Authentication API client.
//!
//! Three operations against one base URL: register, authenticate, and
//! confirm-code. Every reply is funneled through [`normalize_response`], a
//! single total mapping from whatever shape the server produced to
//! [`ApiResponse`]. The client never returns `Err` to its caller: transport
//! and parse failures come back as `success = false` with a generic message,
//! so the UI always has data to present.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

/// Message used for transport and body-read failures. Raw error detail is
/// deliberately not surfaced to the user.
pub const NETWORK_ERROR: &str = "Network error occurred. Please try again.";

/// An endpoint of the authentication API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Signup,
    Login,
    VerifyEmail,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Signup => "/signup",
            Endpoint::Login => "/login",
            Endpoint::VerifyEmail => "/verify-email",
        }
    }

    /// Fallback error text when the server reply carries none.
    fn failure_text(self) -> &'static str {
        match self {
            Endpoint::Signup => "Signup failed",
            Endpoint::Login => "Sign in failed. Please check your credentials.",
            Endpoint::VerifyEmail => "Email verification failed",
        }
    }

    /// Fallback success text when the server reply carries none.
    fn success_text(self) -> &'static str {
        match self {
            Endpoint::Signup => "Signup successful",
            Endpoint::Login => "Sign in successful",
            Endpoint::VerifyEmail => "Email verified successfully",
        }
    }
}

/// Body for POST /signup.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    pub role: String,
}

/// Body for POST /login.
#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Body for POST /verify-email.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest {
    pub email: String,
    #[serde(rename = "OTP")]
    pub otp: String,
}

/// Normalized result of any API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub token: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiResponse {
    fn network_error() -> Self {
        Self {
            success: false,
            error: Some(NETWORK_ERROR.to_string()),
            ..Self::default()
        }
    }
}

/// HTTP client for the authentication API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST /signup.
    pub async fn register(&self, request: &SignupRequest) -> ApiResponse {
        self.post(Endpoint::Signup, request).await
    }

    /// POST /login.
    pub async fn authenticate(&self, request: &SigninRequest) -> ApiResponse {
        self.post(Endpoint::Login, request).await
    }

    /// POST /verify-email.
    pub async fn confirm_code(&self, request: &VerifyRequest) -> ApiResponse {
        self.post(Endpoint::VerifyEmail, request).await
    }

    async fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> ApiResponse {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!(endpoint = endpoint.path(), "sending request");

        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(endpoint = endpoint.path(), %err, "transport failure");
                return ApiResponse::network_error();
            }
        };

        let status = response.status();
        let Ok(text) = response.text().await else {
            return ApiResponse::network_error();
        };

        let outcome = normalize_response(endpoint, status, &parse_body(&text));
        tracing::debug!(
            endpoint = endpoint.path(),
            status = status.as_u16(),
            success = outcome.success,
            "request finished"
        );
        outcome
    }
}

/// Parses a reply body, tolerating non-JSON replies.
///
/// Non-JSON text is wrapped as `{"message": <text>}` so the normalizer can
/// treat every body uniformly. An empty body parses to null.
fn parse_body(text: &str) -> Value {
    if let Ok(value) = serde_json::from_str(text) {
        return value;
    }
    if text.trim().is_empty() {
        Value::Null
    } else {
        json!({ "message": text })
    }
}

/// Maps a raw server reply to an [`ApiResponse`]. Total: every combination
/// of status and body shape produces a result.
///
/// Error text probe order: `message`, `error` (string), `error.message`,
/// `msg`, a bare string body, then the endpoint fallback.
///
/// Token probe order (login only): `token`, `accessToken`, `access_token`,
/// `data.token`, `data.accessToken`. A 2xx reply without a token is still a
/// success; some server variants return only user data.
pub fn normalize_response(endpoint: Endpoint, status: StatusCode, body: &Value) -> ApiResponse {
    if !status.is_success() {
        let error = extract_error(body)
            .unwrap_or_else(|| endpoint.failure_text().to_string());
        return ApiResponse {
            success: false,
            error: Some(error),
            ..ApiResponse::default()
        };
    }

    let token = if endpoint == Endpoint::Login {
        extract_token(body)
    } else {
        None
    };

    let data = match endpoint {
        // Login replies may nest the profile under `data` or `user`.
        Endpoint::Login => body
            .get("data")
            .or_else(|| body.get("user"))
            .cloned()
            .or_else(|| non_null(body)),
        // Signup and verification echo the body as data.
        Endpoint::Signup | Endpoint::VerifyEmail => non_null(body),
    };

    let message = body
        .get("message")
        .or_else(|| body.get("msg"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| Some(endpoint.success_text().to_string()));

    ApiResponse {
        success: true,
        data,
        token,
        message,
        error: None,
    }
}

fn non_null(body: &Value) -> Option<Value> {
    if body.is_null() {
        None
    } else {
        Some(body.clone())
    }
}

fn extract_error(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .or_else(|| body.get("msg").and_then(Value::as_str))
        .or_else(|| body.as_str())
        .map(str::to_string)
}

fn extract_token(body: &Value) -> Option<String> {
    body.get("token")
        .and_then(Value::as_str)
        .or_else(|| body.get("accessToken").and_then(Value::as_str))
        .or_else(|| body.get("access_token").and_then(Value::as_str))
        .or_else(|| {
            body.get("data")
                .and_then(|d| d.get("token"))
                .and_then(Value::as_str)
        })
        .or_else(|| {
            body.get("data")
                .and_then(|d| d.get("accessToken"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}
