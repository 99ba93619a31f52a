//! HTTP handlers, one module per resource.
//!
//! Handlers bind the request, validate it with the core validators, call a
//! repository or service and wrap the result in the response envelope.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

pub mod auth;
pub mod campaign;
pub mod cart;
pub mod cart_item;
pub mod category;
pub mod discount;
pub mod discount_rule;
pub mod health;
pub mod product;

/// JSON body extractor whose rejection is the standard
/// "Invalid request payload" envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(ApiError::invalid_payload())
            }
        }
    }
}
