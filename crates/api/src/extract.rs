//! Wrappers over axum's extractors that reject through [`AppError`], so a
//! malformed body, query string or path id still gets the JSON error envelope.
//!
//! A path id that does not parse is reported as 404: no resource can live at
//! such a path.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Malformed or mistyped bodies are a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters. Values that do not parse are a 404.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);

/// Query string parameters. Unknown choice codes and bad numbers are a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
