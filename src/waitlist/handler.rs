//! Framework-independent waitlist signup handling

use crate::core::types::Timestamp;
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Source recorded when the request does not name one
pub const DEFAULT_SOURCE: &str = "landing";

/// CORS headers attached to every response
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-credentials", "true"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET,OPTIONS,PATCH,DELETE,POST,PUT"),
    (
        "access-control-allow-headers",
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version",
    ),
];

#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Failed to process signup: {0}")]
    Sink(String),
}

impl WaitlistError {
    pub fn status(&self) -> u16 {
        match self {
            WaitlistError::InvalidEmail => 400,
            WaitlistError::MethodNotAllowed => 405,
            WaitlistError::Sink(_) => 500,
        }
    }

    fn body(&self) -> Value {
        match self {
            WaitlistError::InvalidEmail | WaitlistError::MethodNotAllowed => {
                json!({ "error": self.to_string() })
            }
            WaitlistError::Sink(_) => json!({
                "error": "Failed to process signup",
                "message": "Please try again or contact support",
            }),
        }
    }
}

/// An accepted signup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitlistSignup {
    pub email: String,
    pub source: String,
    pub timestamp: String,
    pub ip: Option<String>,
}

/// Destination for accepted signups
pub trait WaitlistSink: Send + Sync {
    fn record(&self, signup: &WaitlistSignup) -> Result<(), WaitlistError>;
}

/// Writes each signup as one structured log line
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WaitlistSink for LogSink {
    fn record(&self, signup: &WaitlistSignup) -> Result<(), WaitlistError> {
        tracing::info!(
            email = %signup.email,
            source = %signup.source,
            timestamp = %signup.timestamp,
            ip = signup.ip.as_deref().unwrap_or("unknown"),
            "new waitlist signup"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    /// `None` means an empty body
    pub body: Option<Value>,
}

impl WaitlistResponse {
    fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            headers: CORS_HEADERS.to_vec(),
            body,
        }
    }

    fn error(error: &WaitlistError) -> Self {
        Self::new(error.status(), Some(error.body()))
    }
}

/// Handle one request to the waitlist endpoint
pub fn handle_waitlist(
    method: &str,
    body: &[u8],
    forwarded_for: Option<&str>,
    sink: &dyn WaitlistSink,
    now: Timestamp,
) -> WaitlistResponse {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return WaitlistResponse::new(200, None);
    }
    if !method.eq_ignore_ascii_case("POST") {
        return WaitlistResponse::error(&WaitlistError::MethodNotAllowed);
    }

    let signup = match parse_signup(body, forwarded_for, now) {
        Ok(signup) => signup,
        Err(e) => return WaitlistResponse::error(&e),
    };

    if let Err(e) = sink.record(&signup) {
        tracing::error!(error = %e, "waitlist sink failed");
        return WaitlistResponse::error(&e);
    }

    WaitlistResponse::new(
        200,
        Some(json!({
            "success": true,
            "message": "Successfully joined the waitlist!",
            "data": { "email": signup.email, "source": signup.source },
        })),
    )
}

fn parse_signup(
    body: &[u8],
    forwarded_for: Option<&str>,
    now: Timestamp,
) -> Result<WaitlistSignup, WaitlistError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| WaitlistError::InvalidEmail)?;
    let obj = value.as_object().ok_or(WaitlistError::InvalidEmail)?;

    let email = obj
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| email.contains('@'))
        .ok_or(WaitlistError::InvalidEmail)?;

    let source = obj
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_SOURCE);
    let timestamp = match obj.get("timestamp").and_then(Value::as_str) {
        Some(ts) => ts.to_string(),
        None => now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    Ok(WaitlistSignup {
        email: email.to_string(),
        source: source.to_string(),
        timestamp,
        ip: forwarded_for.map(str::to_string),
    })
}
