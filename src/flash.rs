use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use time::Duration;

pub const FLASH_COOKIE: &str = "flash";

/// 303 redirect that carries a one-shot message for the next page.
#[derive(Debug)]
pub struct FlashRedirect {
    to: String,
    message: String,
}

impl FlashRedirect {
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let jar = CookieJar::new().add(
            Cookie::build((FLASH_COOKIE, self.message))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .max_age(Duration::minutes(5)),
        );
        (jar, Redirect::to(&self.to)).into_response()
    }
}

/// JSON page body with the pending flash message, if any.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub flash: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Consume the flash cookie and wrap `body` into a page.
pub fn page<T: Serialize>(jar: CookieJar, body: T) -> (CookieJar, Json<Page<T>>) {
    let flash = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());
    let jar = if flash.is_some() {
        jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"))
    } else {
        jar
    };
    (jar, Json(Page { flash, body }))
}
