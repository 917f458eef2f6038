use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared_models::error::AppError;

/// JSON body extractor whose rejections are validation errors.
///
/// Missing content type, malformed JSON and wrongly typed fields all come
/// back as `400` with the usual `{"error": ...}` body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(rejection_to_error(rejection))
            }
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::ValidationError(rejection.body_text())
}
