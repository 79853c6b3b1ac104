use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error, warn};

use super::{
    repo_types::User,
    session::{SessionKeys, SESSION_COOKIE},
};
use crate::{flash::FlashRedirect, state::AppState};

/// The logged-in user. Anonymous requests are redirected to `/login`.
pub struct CurrentUser(pub User);

/// The logged-in user, or `None` for anonymous requests.
pub struct MaybeUser(pub Option<User>);

async fn session_user(parts: &Parts, state: &AppState) -> Option<User> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_owned();

    let keys = SessionKeys::from_ref(state);
    let claims = match keys.verify(&token) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "invalid or expired session");
            return None;
        }
    };

    match state.users.find_by_id(claims.sub).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            warn!(user_id = %claims.sub, "session for unknown user");
            None
        }
        Err(e) => {
            error!(error = %e, user_id = %claims.sub, "load session user failed");
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_user(parts, state).await))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = FlashRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_user(parts, state)
            .await
            .map(CurrentUser)
            .ok_or_else(|| FlashRedirect::new("/login", "Please log in to continue"))
    }
}
