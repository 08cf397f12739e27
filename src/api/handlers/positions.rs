use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Extension;
use serde::{Deserialize, Serialize};

use crate::api::domain::Domain;
use crate::api::json_response;
use crate::errors::AppError;
use crate::models::{OrderField, Position};
use crate::AppState;

/// Fixed page length for `/api/positions`.
pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct PositionsParams {
    pub page: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

#[derive(Serialize)]
pub struct PositionsResponse {
    pub domain: String,
    pub positions: Vec<Position>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(Domain(domain)): Extension<Domain>,
    params: Result<Query<PositionsParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let page = parse_page(params.page.as_deref())?;
    let offset = page_offset(page)?;

    // Checked here as well as in the service: nothing unvetted is forwarded.
    let order_by = params.order_by.unwrap_or_default();
    OrderField::parse(&order_by)?;

    let positions = state
        .positions
        .positions(&domain, PAGE_SIZE, offset, &order_by)
        .await?;

    json_response(&PositionsResponse { domain, positions })
}

/// 1-based page number; absent means the first page.
fn parse_page(raw: Option<&str>) -> Result<i64, AppError> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(1);
    };

    match raw.parse::<i64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(AppError::BadRequest(format!(
            "Invalid page '{raw}': must be an integer >= 1"
        ))),
    }
}

fn page_offset(page: i64) -> Result<i64, AppError> {
    PAGE_SIZE
        .checked_mul(page - 1)
        .ok_or_else(|| AppError::BadRequest(format!("Page {page} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("")).unwrap(), 1);
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
    }

    #[test]
    fn test_page_must_be_positive_integer() {
        for raw in ["abc", "0", "-1", "1.5", " 2"] {
            assert!(
                matches!(parse_page(Some(raw)), Err(AppError::BadRequest(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1).unwrap(), 0);
        assert_eq!(page_offset(2).unwrap(), 10);
        assert_eq!(page_offset(7).unwrap(), 60);
        assert!(page_offset(i64::MAX).is_err());
    }
}
