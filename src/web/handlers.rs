//! Route handlers for the login flow and profile pages

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AppState, SESSION_COOKIE, pages};
use crate::Error;
use crate::oauth::{LoginAttempt, pkce};
use crate::session::SessionRecord;

/// Query parameters on the authorization callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code
    #[serde(default)]
    pub code: String,
    /// State parameter issued at login start
    #[serde(default)]
    pub state: String,
}

/// Form body for the rename action
#[derive(Debug, Deserialize)]
pub struct RenameForm {
    /// New display name
    pub name: String,
}

/// Landing page: login form when anonymous, user summary when signed in.
pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    match current_session(&state, &jar) {
        Some((_, session)) => Html(pages::index_signed_in(&session.user_info)),
        None => Html(pages::index_signed_out()),
    }
}

/// Start a login: register the client, record the attempt, and redirect
/// the browser to the authorization server.
pub async fn login(State(state): State<Arc<AppState>>) -> Response {
    let credential = match state.oauth.register_client().await {
        Ok(credential) => credential,
        Err(e) => {
            warn!(error = %e, "Client registration failed");
            return error_response(&e);
        }
    };

    let pkce_pair = pkce::PkcePair::generate();
    let state_param = pkce::generate_state();

    let authorization_url =
        match state
            .oauth
            .authorization_url(&credential.client_id, &pkce_pair.challenge, &state_param)
        {
            Ok(url) => url,
            Err(e) => return error_response(&e),
        };

    state.pending_logins.insert(LoginAttempt {
        credential,
        pkce: pkce_pair,
        state: state_param,
    });

    Redirect::to(&authorization_url).into_response()
}

/// Authorization callback: validate the state, exchange the code for a
/// token, create a session, and hand the id to the browser as a cookie.
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(attempt) = state.pending_logins.take(&params.state) else {
        warn!("Authorization callback with unknown or reused state");
        return error_response(&Error::StateMismatch);
    };

    debug!(code = %params.code, "Received authorization code");

    let access_token = match state
        .oauth
        .exchange_code(&params.code, &attempt.pkce.verifier, &attempt.credential)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "Token exchange failed");
            return error_response(&e);
        }
    };

    let session_id = state
        .sessions
        .create(&access_token, state.session_max_age)
        .await;

    let jar = jar.add(session_cookie(
        &session_id,
        state.session_max_age,
        state.secure_cookies,
    ));

    (jar, Redirect::to("/profile")).into_response()
}

/// Profile page; anonymous visitors are sent back to the landing page.
pub async fn profile(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    match current_session(&state, &jar) {
        Some((_, session)) => Html(pages::profile(&session.user_info, None)).into_response(),
        None => (jar.remove(removal_cookie()), Redirect::to("/")).into_response(),
    }
}

/// Rename action: update the name upstream, then refresh the session so
/// the cached profile reflects the change.
pub async fn rename(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RenameForm>,
) -> Response {
    let Some((session_id, session)) = current_session(&state, &jar) else {
        return (jar.remove(removal_cookie()), Redirect::to("/")).into_response();
    };

    if state
        .user_info
        .update_name(&session.access_token, &form.name)
        .await
    {
        state
            .sessions
            .update(&session_id, &session.access_token, state.session_max_age)
            .await;
        Redirect::to("/profile").into_response()
    } else {
        Html(pages::profile(
            &session.user_info,
            Some("Unable to update the name. Check the logs for errors."),
        ))
        .into_response()
    }
}

/// Logout: drop the session and clear the cookie.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.delete(cookie.value());
    } else {
        debug!("Logout without a session cookie");
    }

    (jar.remove(removal_cookie()), Redirect::to("/")).into_response()
}

/// Resolve the session cookie to a live session.
fn current_session(state: &AppState, jar: &CookieJar) -> Option<(String, SessionRecord)> {
    let session_id = jar.get(SESSION_COOKIE)?.value().to_string();
    let record = state.sessions.get(&session_id)?;
    Some((session_id, record))
}

fn session_cookie(session_id: &str, max_age: Duration, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::seconds(i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX));

    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .path("/")
        .max_age(max_age)
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

fn error_response(error: &Error) -> Response {
    let status = match error {
        Error::StateMismatch => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Html(pages::error_page(error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_params_deserialize() {
        let params: CallbackParams = serde_urlencoded::from_str("code=abc123&state=xyz789").unwrap();
        assert_eq!(params.code, "abc123");
        assert_eq!(params.state, "xyz789");
    }

    #[test]
    fn callback_params_default_to_empty() {
        let params: CallbackParams = serde_urlencoded::from_str("").unwrap();
        assert!(params.code.is_empty());
        assert!(params.state.is_empty());
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("sid-1", Duration::from_secs(60), true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "sid-1");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
    }
}
