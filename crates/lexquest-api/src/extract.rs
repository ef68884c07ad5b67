//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lexquest_core::ids::UserId;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the player id issued by the account layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The player making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthenticated(format!("missing {USER_ID_HEADER} header")))?;
        let text = value
            .to_str()
            .map_err(|_| ApiError::Unauthenticated(format!("{USER_ID_HEADER} is not valid text")))?;
        let id = Uuid::parse_str(text.trim())
            .map_err(|e| ApiError::Unauthenticated(format!("{USER_ID_HEADER} is not a UUID: {e}")))?;
        Ok(Self(UserId(id)))
    }
}
