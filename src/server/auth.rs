//! HTTP basic auth for the SWML and SWAIG endpoints.

use super::AppState;
use crate::config::AuthSettings;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;

/// Credentials the platform must present.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: String,
    generated: bool,
}

impl BasicAuth {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            generated: false,
        }
    }

    /// Use configured values, falling back to `default_user` and a random
    /// password.
    pub fn from_settings(settings: &AuthSettings, default_user: &str) -> Self {
        let user = settings
            .user
            .clone()
            .unwrap_or_else(|| default_user.to_string());
        match &settings.password {
            Some(password) => Self::new(user, password.clone()),
            None => Self {
                user,
                password: uuid::Uuid::new_v4().simple().to_string(),
                generated: true,
            },
        }
    }

    /// Whether the password was generated rather than configured.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Value for an `Authorization` header.
    pub fn header_value(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.user, self.password))
        )
    }

    /// Check an `Authorization` header value.
    pub fn matches(&self, header: &str) -> bool {
        let Some((scheme, encoded)) = header.trim().split_once(' ') else {
            return false;
        };
        if !scheme.eq_ignore_ascii_case("basic") {
            return false;
        }
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };
        match decoded.split_once(':') {
            Some((user, password)) => user == self.user && password == self.password,
            None => false,
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .field("generated", &self.generated)
            .finish()
    }
}

/// Reject requests without valid credentials.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| state.agent.auth().matches(v));

    if authorized {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"franklin\"")],
        Json(serde_json::json!({ "error": "Unauthorized" })),
    )
        .into_response()
}
