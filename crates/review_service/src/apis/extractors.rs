use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::errors::app_error::AppError;

/// `axum::Form` whose rejections are reported as `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct FormBody<T>(pub T);

/// `axum::extract::Query` whose rejections are reported as `AppError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
