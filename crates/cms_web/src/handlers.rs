use std::sync::Arc;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use cms_core::{NormalizedArticle, Theme};
use crate::render::{listing_page, PageContext};
use crate::AppState;

/// Client hint carrying the browser's color scheme preference.
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

fn prefers_dark(headers: &HeaderMap) -> bool {
    headers
        .get(PREFERS_COLOR_SCHEME)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_matches('"').eq_ignore_ascii_case("dark"))
        .unwrap_or(false)
}

async fn current_theme(state: &AppState, headers: &HeaderMap) -> Theme {
    let system_dark = prefers_dark(headers);
    match Theme::load(state.prefs.as_ref(), system_dark).await {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("Failed to read theme preference: {}", e);
            Theme::resolve(None, system_dark)
        }
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let theme = current_theme(&state, &headers).await;
    let articles = state.source.fetch_articles().await;
    tracing::debug!("Rendering {} articles ({} theme)", articles.len(), theme);

    let page = listing_page(&PageContext {
        theme,
        articles: &articles,
        image_host: &state.image_host,
        fetched_at: Utc::now(),
    });

    (
        [("accept-ch", "Sec-CH-Prefers-Color-Scheme"), ("vary", "Sec-CH-Prefers-Color-Scheme")],
        page,
    )
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<NormalizedArticle>> {
    Json(state.source.fetch_articles().await)
}

pub async fn toggle_theme(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Redirect, (StatusCode, String)> {
    let next = current_theme(&state, &headers).await.toggle();
    next.save(state.prefs.as_ref()).await.map_err(|e| {
        tracing::error!("Failed to save theme preference: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to save theme: {}", e))
    })?;
    tracing::info!("Theme switched to {}", next);
    Ok(Redirect::to("/"))
}
