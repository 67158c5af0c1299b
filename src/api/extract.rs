//! Extractors whose rejections render as `ProductError`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ProductError;

/// JSON body; a missing field or malformed payload is a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ProductError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; an id that does not parse is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ProductError))]
pub struct ApiPath<T>(pub T);
