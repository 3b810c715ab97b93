//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tablebook_core::ValidationError;

use super::error::ApiError;

/// Extract a row id from the path; ids start at 1.
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i32> = Path::from_request_parts(parts, state).await.map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        if id < 1 {
            return Err(ApiError::Validation(ValidationError::NotPositive {
                field: "id",
                value: id.into(),
            }));
        }

        Ok(Self(id))
    }
}
