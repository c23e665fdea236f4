use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;
use uuid::Uuid;

use crate::utils::errors::app_error::AppError;

/// Header set by the upstream authentication layer with the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing user identity".to_string()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid user identity".to_string()))?;

        let id = Uuid::parse_str(value.trim()).map_err(|e| {
            warn!("Rejected {} header {:?}: {}", USER_ID_HEADER, value, e);
            AppError::Unauthorized("Invalid user identity".to_string())
        })?;

        Ok(CurrentUser { id })
    }
}
