use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::decode_base64_image;
use crate::services::{CooldownStore, TokenVerifier};
use crossfade::FadeOptions;

// Image count bounds for the networked form.
const MIN_IMAGES: usize = 2;
const MAX_IMAGES: usize = 3;

/// Request body for the /api/generate endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Base64-encoded source images (2 or 3 entries)
    #[serde(default)]
    pub images: Vec<String>,
    /// Display duration per source image in milliseconds (default: 100)
    #[serde(default)]
    pub duration: Option<u32>,
    /// Interpolated frames per transition (default: 10)
    #[serde(default)]
    pub fade_frames: Option<u32>,
    /// Display duration per fade frame in milliseconds (default: 100)
    #[serde(default)]
    pub fade_duration: Option<u32>,
}

/// Response from the /api/generate endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Base64-encoded animated GIF
    pub gif: String,
}

/// Generate a cross-fade GIF from 2-3 images
///
/// Requires a bearer token. Each user may generate one GIF per cooldown
/// window (7 days by default); within the window the endpoint answers 429
/// with the remaining wait and a `retry_after` timestamp.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "GIF generated successfully", body = GenerateResponse),
        (status = 400, description = "Invalid JSON payload or wrong image count"),
        (status = 401, description = "Missing, malformed, invalid or expired bearer token"),
        (status = 429, description = "Cooldown active; body carries retry_after"),
        (status = 500, description = "Image decoding or GIF assembly failed"),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token identifying the user"),
    ),
    tag = "Generation"
)]
pub async fn handle_generate(
    State(config): State<Arc<AppConfig>>,
    State(verifier): State<Arc<dyn TokenVerifier>>,
    State(store): State<Arc<dyn CooldownStore>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<GenerateResponse>, ApiError> {
    // 1. Authentication. Runs before body parsing so a bad token never
    //    reports a JSON error.
    let token = headers.bearer_token()?;
    let user = verifier.verify(token).await?;

    // 2. Cooldown. Store errors fail open: availability over strictness.
    let now = Utc::now();
    match store.last_generation(&user).await {
        Ok(Some(last)) => {
            let window = config.cooldown();
            let elapsed = now.signed_duration_since(last);
            if elapsed < window {
                let remaining = window - elapsed;
                return Err(ApiError::RateLimit {
                    days: remaining.num_days(),
                    hours: remaining.num_hours() % 24,
                    retry_after: last + window,
                });
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(%e, user = %user, "Cooldown check failed, allowing request");
        }
    }

    // 3. Body parsing and validation.
    let request: GenerateRequest = serde_json::from_str(&body)
        .map_err(|_| ApiError::Validation("Invalid JSON payload".to_string()))?;

    if request.images.len() < MIN_IMAGES {
        return Err(ApiError::Validation(
            "At least 2 images required".to_string(),
        ));
    }
    if request.images.len() > MAX_IMAGES {
        return Err(ApiError::Validation("Maximum 3 images allowed".to_string()));
    }

    tracing::info!(
        user = %user,
        images = request.images.len(),
        "Generate request received"
    );

    // 4. Decode and synthesize. Decode failures are internal errors: the
    //    payload passed validation, so specifics stay server-side.
    let mut images = Vec::with_capacity(request.images.len());
    for encoded in &request.images {
        images.push(decode_base64_image(encoded)?);
    }

    let options = FadeOptions {
        base_duration_ms: request.duration.unwrap_or(config.default_duration_ms),
        fade_frames: request.fade_frames.unwrap_or(config.default_fade_frames),
        fade_duration_ms: request
            .fade_duration
            .unwrap_or(config.default_fade_duration_ms),
        max_dimension: config.max_dimension,
    };

    let timeline = crossfade::synthesize(images, &options)?;
    let frame_count = timeline.len();
    let gif_bytes = crossfade::encode(timeline)?;

    // 5. Record the success. A failed update means one free bypass of the
    //    cooldown; accepted.
    if let Err(e) = store.record_generation(&user, Utc::now()).await {
        tracing::warn!(%e, user = %user, "Failed to update cooldown timestamp");
    }

    tracing::info!(
        user = %user,
        frames = frame_count,
        bytes = gif_bytes.len(),
        "GIF generated"
    );

    Ok(Json(GenerateResponse {
        gif: BASE64.encode(&gif_bytes),
    }))
}

/// Answer a CORS preflight: 204 with permissive headers and no body.
pub async fn handle_preflight() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("3600"),
    );
    (StatusCode::NO_CONTENT, headers)
}
