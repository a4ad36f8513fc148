use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Paging value or identifier outside its accepted range
    #[error("Argument '{0}' is out of range")]
    OutOfRange(&'static str),

    #[error("Argument '{0}' is required")]
    MissingArgument(&'static str),

    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product {0} not found")]
    NotFound(Uuid),

    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Malformed query string: {0}")]
    Query(#[from] QueryRejection),

    /// Store fault, passed through untouched
    #[error("Store error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            e @ (ProductError::OutOfRange(_) | ProductError::MissingArgument(_)) => {
                AppError::BadRequest(e.to_string())
            }
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Body(rejection) => AppError::JsonExtractorRejection(rejection),
            ProductError::Query(rejection) => AppError::BadRequest(rejection.body_text()),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
