use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{AppError, FieldViolation};

/// JSON body extractor whose rejection follows the application's error
/// contract: a malformed or incomplete body produces the same 400 JSON
/// shape as any other validation failure, not the framework's plain-text
/// default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path extractor with the same rejection mapping as [`Json`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldViolation {
            field: "body".to_string(),
            reason: rejection.body_text(),
        }])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(vec![FieldViolation {
            field: "path".to_string(),
            reason: rejection.body_text(),
        }])
    }
}
