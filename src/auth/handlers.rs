use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{FormPage, LoginForm, RegisterForm},
        services::{authenticate, register},
        session::SessionKeys,
    },
    error::AppError,
    flash::{page, FlashRedirect, Page},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register_user))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

pub async fn register_page(jar: CookieJar) -> (CookieJar, Json<Page<FormPage>>) {
    page(
        jar,
        FormPage {
            form: "register",
            fields: &["username", "email", "password", "confirm_password"],
        },
    )
}

pub async fn login_page(jar: CookieJar) -> (CookieJar, Json<Page<FormPage>>) {
    page(
        jar,
        FormPage {
            form: "login",
            fields: &["username", "password"],
        },
    )
}

#[instrument(skip(state, form))]
pub async fn register_user(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    let form = form.normalized();
    form.validate().map_err(|e| e.redirect_to("/register"))?;

    let user = register(state.users.as_ref(), &form.username, &form.email, &form.password).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(FlashRedirect::new(
        "/login",
        "Registration successful, please log in",
    ))
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, FlashRedirect), FlashRedirect> {
    let user = authenticate(state.users.as_ref(), form.username.trim(), &form.password).await?;

    let keys = SessionKeys::from_ref(&state);
    let token = keys
        .sign(user.id)
        .map_err(|e| AppError::Internal(e).redirect_to("/login"))?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        jar.add(keys.cookie(token)),
        FlashRedirect::new("/dashboard", format!("Welcome back, {}", user.username)),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, FlashRedirect) {
    (
        jar.remove(SessionKeys::removal_cookie()),
        FlashRedirect::new("/login", "You have been logged out"),
    )
}
