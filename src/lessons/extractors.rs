use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;
use uuid::Uuid;

use crate::{error::AppError, flash::FlashRedirect};

/// The `:id` segment of a lesson route. Ids that do not parse are treated
/// like ids that do not exist.
pub struct LessonId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for LessonId
where
    S: Send + Sync,
{
    type Rejection = FlashRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Uuid>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(LessonId(id)),
            Err(rejection) => {
                debug!(error = %rejection, path = %parts.uri.path(), "malformed lesson id");
                Err(AppError::NotFound.into())
            }
        }
    }
}
