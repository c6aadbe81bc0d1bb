//! Request handlers.

use super::AppState;
use crate::agent::AgentBase;
use crate::error::{FranklinError, Result};
use crate::swml::{FunctionResult, SwaigRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy", "agent": state.agent.name() }))
}

pub async fn ready() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ready" }))
}

/// SWML document. The platform POSTs call details; GET works for inspection.
pub async fn swml(State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes) -> Response {
    if let Ok(call) = serde_json::from_slice::<Value>(&body) {
        if let Some(call_id) = call.get("call_id").and_then(Value::as_str) {
            debug!(call_id, "SWML requested for call");
        }
    }

    match webhook_url(&state.agent, &headers) {
        Ok(url) => Json(state.agent.render_swml(&url)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build webhook URL");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// SWAIG function call.
pub async fn swaig(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: SwaigRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid SWAIG request: {}", e),
            )
        }
    };

    info!(
        function = %request.function,
        call_id = request.call_id.as_deref().unwrap_or("-"),
        "SWAIG call"
    );

    match state
        .agent
        .execute_function(&request.function, &request.args())
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(FranklinError::FunctionNotFound(name)) => (
            StatusCode::NOT_FOUND,
            Json(FunctionResult::new(format!("Function '{}' not found", name))),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, function = %request.function, "Function failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FunctionResult::new(
                    "Sorry, something went wrong while running that function.",
                )),
            )
                .into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
        .filter(|v| !v.is_empty())
}

/// Absolute SWAIG webhook URL with credentials embedded.
///
/// Base is the configured public URL, else the forwarded or direct `Host`
/// of the request, else the bind address.
pub fn webhook_url(agent: &AgentBase, headers: &HeaderMap) -> Result<String> {
    let server = &agent.settings().server;

    let base = match server.public_url.as_deref().filter(|u| !u.is_empty()) {
        Some(public) => Url::parse(public)?,
        None => {
            let proto = header_str(headers, "x-forwarded-proto").unwrap_or("http");
            let host = header_str(headers, "x-forwarded-host")
                .or_else(|| header_str(headers, header::HOST.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| {
                    let host = if server.host == "0.0.0.0" { "localhost" } else { server.host.as_str() };
                    format!("{}:{}", host, server.port)
                });
            Url::parse(&format!("{}://{}", proto, host))?
        }
    };

    let mut url = base.clone();
    url.set_path(&format!(
        "{}{}",
        base.path().trim_end_matches('/'),
        agent.swaig_route()
    ));
    url.set_query(None);

    let auth = agent.auth();
    url.set_username(&auth.user)
        .and_then(|_| url.set_password(Some(&auth.password)))
        .map_err(|_| FranklinError::Config(format!("Cannot embed credentials in {}", base)))?;

    Ok(url.to_string())
}
