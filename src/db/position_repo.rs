use sqlx::SqlitePool;

use crate::models::{OrderField, Position};

/// Sum of `position` over all rows of a domain. `None` when nothing matched.
pub async fn sum_positions(pool: &SqlitePool, domain: &str) -> Result<Option<i64>, sqlx::Error> {
    let row: (Option<i64>,) = sqlx::query_as(
        "SELECT SUM(position) AS summary FROM positions WHERE domain = ?",
    )
    .bind(domain)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// One page of a domain's positions, ascending by `order`.
pub async fn list_positions(
    pool: &SqlitePool,
    domain: &str,
    order: OrderField,
    limit: i64,
    offset: i64,
) -> Result<Vec<Position>, sqlx::Error> {
    let query = positions_query(order);

    let positions = sqlx::query_as::<_, Position>(&query)
        .bind(domain)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(positions)
}

/// The only place a column name is spliced into SQL text. It comes from the
/// closed `OrderField` set; everything caller-supplied is bound.
pub fn positions_query(order: OrderField) -> String {
    format!(
        r#"
        SELECT keyword, position, url, volume, results, cpc, updated
        FROM positions
        WHERE domain = ?
        ORDER BY {} ASC, rowid ASC
        LIMIT ? OFFSET ?
        "#,
        order.column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_orders_by_each_field() {
        for field in OrderField::ALL {
            let sql = positions_query(field);
            assert!(sql.contains(&format!("ORDER BY {} ASC, rowid ASC", field.column())));
            assert!(sql.contains("WHERE domain = ?"));
            assert!(sql.contains("LIMIT ? OFFSET ?"));
        }
    }

    #[test]
    fn test_query_has_no_other_interpolation() {
        let sql = positions_query(OrderField::Keyword);
        assert_eq!(sql.matches('?').count(), 3);
        assert!(!sql.contains('{'));
    }
}
