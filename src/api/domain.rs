use axum::{
    extract::{Query, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::AppError;

/// Domain a request is scoped to, placed in request extensions by
/// [`require_domain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain(pub String);

#[derive(Deserialize)]
struct DomainParam {
    domain: Option<String>,
}

/// Reject requests without a non-empty `domain` query parameter.
///
/// Runs before any handler, so nothing reaches the database without a domain
/// filter.
pub async fn require_domain(mut req: Request, next: Next) -> Response {
    let domain = Query::<DomainParam>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(param)| param.domain)
        .filter(|d| !d.is_empty());

    match domain {
        Some(domain) => {
            req.extensions_mut().insert(Domain(domain));
            next.run(req).await
        }
        None => {
            tracing::debug!(uri = %req.uri(), "Empty domain in request");
            AppError::BadRequest("Missing required parameter 'domain'".into()).into_response()
        }
    }
}
