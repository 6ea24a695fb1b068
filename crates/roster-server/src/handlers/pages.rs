//! Sign-up and roster page handlers

use crate::{views, AppState};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Cookie remembering the last submitted name
pub const NAME_COOKIE: &str = "player_name";

const COOKIE_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    name: String,
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let remembered = remembered_name(&headers);
    Html(views::index(&state.base_path, remembered.as_deref()))
}

pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Response, StatusCode> {
    tracing::debug!("Got name {:?}", form.name);

    let sign_up = match state.roster.sign_up(&form.name).await {
        Ok(sign_up) => sign_up,
        Err(e) => {
            tracing::error!("Failed to sign up {:?}: {}", form.name, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let roster = match state.roster.roster().await {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Failed to list players: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let cookie = remember_cookie(&form.name, &state.base_path, Utc::now());
    let page = views::players(&state.base_path, &roster, Some(&sign_up.message()));

    Ok(([(header::SET_COOKIE, cookie)], Html(page)).into_response())
}

pub async fn players(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    match state.roster.roster().await {
        Ok(roster) => Ok(Html(views::players(&state.base_path, &roster, None))),
        Err(e) => {
            tracing::error!("Failed to list players: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn remember_cookie(name: &str, path: &str, now: DateTime<Utc>) -> String {
    let expires = now + Duration::seconds(COOKIE_MAX_AGE_SECS);
    format!(
        "{}={}; Path={}; Expires={}; Max-Age={}; HttpOnly; SameSite=Lax",
        NAME_COOKIE,
        urlencoding::encode(name),
        path,
        expires.format("%a, %d %b %Y %H:%M:%S GMT"),
        COOKIE_MAX_AGE_SECS
    )
}

fn remembered_name(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == NAME_COOKIE)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}
