use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::fetch::range::RangeToken;
use crate::render::{render_widget, RenderRequest, WidgetRender};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for the widget endpoint.
#[derive(Debug, Deserialize)]
pub struct WidgetParams {
    /// Range token override. Anything outside the fixed set silently
    /// falls back to the configured default.
    pub range: Option<String>,
    /// `refresh=1` busts the cache entry before fetching. Authorization
    /// is the embedding host's job; the flag is trusted here.
    pub refresh: Option<String>,
}

/// Widget endpoint response. Missing configuration is a guidance
/// message, not an error status.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WidgetResponse {
    Unconfigured { message: String },
    Ready(WidgetRender),
}

/// Validate a configured domain for safe inclusion in upstream query
/// strings: non-empty, at most 256 bytes, restricted charset.
pub fn validate_domain(domain: &str) -> Result<(), ApiError> {
    if domain.len() > 256 {
        return Err(ApiError::BadRequest(
            "domain must be at most 256 characters".to_string(),
        ));
    }
    let valid = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !valid {
        return Err(ApiError::BadRequest(
            "domain may only contain alphanumeric characters, '.', '-', '_'".to_string(),
        ));
    }
    Ok(())
}

/// Lowercase the configured domain and strip any trailing `:port`.
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let host = trimmed.rsplit_once(':').map_or(trimmed, |(host, port)| {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            host
        } else {
            trimmed
        }
    });
    host.to_lowercase()
}

/// GET /api/widget — Run the full pipeline and return the render result.
pub async fn get_widget(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WidgetParams>,
) -> Result<Json<WidgetResponse>, ApiError> {
    let config = &state.config;

    let domain = normalize_domain(&config.domain);
    if domain.is_empty() {
        return Ok(Json(WidgetResponse::Unconfigured {
            message: "Could not determine the site domain. Set `domain` in the widget configuration.".to_string(),
        }));
    }
    if config.api_key.is_empty() {
        return Ok(Json(WidgetResponse::Unconfigured {
            message: "No API key configured. Set `api_key` in the widget configuration.".to_string(),
        }));
    }
    validate_domain(&domain)?;

    let range = params
        .range
        .as_deref()
        .and_then(RangeToken::parse)
        .unwrap_or(config.default_range);
    let force_refresh = params.refresh.as_deref() == Some("1");

    let render = render_widget(
        &state.client,
        &config.api_key,
        RenderRequest {
            domain: &domain,
            range,
            mode: config.display_mode,
            force_refresh,
        },
    )
    .await?;

    Ok(Json(WidgetResponse::Ready(render)))
}
