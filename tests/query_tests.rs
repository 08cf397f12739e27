mod common;

use chrono::NaiveDate;

use common::{seed_many, seed_position, SeedPosition};
use sem_positions::models::OrderField;
use sem_positions::services::positions::{PositionService, QueryConfig, QueryError};

async fn build_service() -> (PositionService, sqlx::SqlitePool) {
    let pool = common::setup_test_db().await;
    (PositionService::new(pool.clone(), QueryConfig::default()), pool)
}

#[tokio::test]
async fn test_summary_sums_positions_of_domain() {
    let (service, pool) = build_service().await;

    for (keyword, position) in [("a", 3), ("b", 4), ("c", 10)] {
        seed_position(&pool, SeedPosition { position, ..SeedPosition::new("example.com", keyword) }).await;
    }
    seed_position(&pool, SeedPosition { position: 100, ..SeedPosition::new("other.com", "a") }).await;

    assert_eq!(service.summary("example.com").await.unwrap(), 17);
    assert_eq!(service.summary("other.com").await.unwrap(), 100);
}

#[tokio::test]
async fn test_summary_no_rows_equals_zero_sum() {
    let (service, pool) = build_service().await;

    seed_position(&pool, SeedPosition { position: 0, ..SeedPosition::new("zero.com", "a") }).await;
    seed_position(&pool, SeedPosition { position: 0, ..SeedPosition::new("zero.com", "b") }).await;

    let empty = service.summary("missing.com").await.unwrap();
    let zero = service.summary("zero.com").await.unwrap();
    assert_eq!(empty, 0);
    assert_eq!(empty, zero);
}

#[tokio::test]
async fn test_positions_respects_limit_and_domain() {
    let (service, pool) = build_service().await;
    seed_many(&pool, "example.com", 15).await;
    seed_many(&pool, "other.com", 5).await;

    let page = service.positions("example.com", 10, 0, "").await.unwrap();
    assert_eq!(page.len(), 10);
    assert!(page.iter().all(|p| p.url.starts_with("https://example.com/")));

    let page = service.positions("other.com", 10, 0, "").await.unwrap();
    assert_eq!(page.len(), 5);
    assert!(page.iter().all(|p| p.url.starts_with("https://other.com/")));
}

#[tokio::test]
async fn test_positions_default_order_is_volume_ascending() {
    let (service, pool) = build_service().await;
    seed_many(&pool, "example.com", 12).await;

    let page = service.positions("example.com", 10, 0, "").await.unwrap();
    let volumes: Vec<u64> = page.iter().map(|p| p.volume).collect();
    assert_eq!(volumes, (1..=10).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_positions_sorted_by_each_field() {
    let (service, pool) = build_service().await;
    seed_many(&pool, "example.com", 8).await;

    for field in OrderField::ALL {
        let page = service
            .positions("example.com", 100, 0, field.column())
            .await
            .unwrap();
        assert_eq!(page.len(), 8);

        let sorted = page.windows(2).all(|w| match field {
            OrderField::Volume => w[0].volume <= w[1].volume,
            OrderField::Results => w[0].results <= w[1].results,
            OrderField::Updated => w[0].updated <= w[1].updated,
            OrderField::Cpc => w[0].cpc <= w[1].cpc,
            OrderField::Url => w[0].url <= w[1].url,
            OrderField::Position => w[0].position <= w[1].position,
            OrderField::Keyword => w[0].keyword <= w[1].keyword,
        });
        assert!(sorted, "not sorted by {field}");
    }

    // results run opposite to volume in the seed data
    let page = service.positions("example.com", 3, 0, "results").await.unwrap();
    let results: Vec<u64> = page.iter().map(|p| p.results).collect();
    assert_eq!(results, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_positions_offset_pages_do_not_overlap() {
    let (service, pool) = build_service().await;
    seed_many(&pool, "example.com", 15).await;

    let first = service.positions("example.com", 10, 0, "volume").await.unwrap();
    let second = service.positions("example.com", 10, 10, "volume").await.unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);
    assert_eq!(second[0].volume, 11);
    assert!(first.iter().all(|a| second.iter().all(|b| a.keyword != b.keyword)));
}

#[tokio::test]
async fn test_positions_empty_domain_is_not_an_error() {
    let (service, _pool) = build_service().await;

    let page = service.positions("missing.com", 10, 0, "").await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_positions_rejects_unknown_order_and_leaves_table_intact() {
    let (service, pool) = build_service().await;
    seed_many(&pool, "example.com", 3).await;

    let err = service
        .positions("example.com", 10, 0, "keyword; DROP TABLE positions")
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::UnknownOrderField(_)));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM positions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_positions_decode_updated_formats() {
    let (service, pool) = build_service().await;

    for (keyword, updated, volume) in [
        ("plain", "2020-02-02", 1),
        ("rfc3339", "2021-03-04T05:06:07Z", 2),
        ("sqlite", "2022-05-06 07:08:09", 3),
    ] {
        seed_position(&pool, SeedPosition { updated, volume, ..SeedPosition::new("example.com", keyword) }).await;
    }

    let page = service.positions("example.com", 10, 0, "volume").await.unwrap();
    let dates: Vec<NaiveDate> = page.iter().map(|p| p.updated.date()).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2022, 5, 6).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_negative_column_is_query_failure() {
    let (service, pool) = build_service().await;
    seed_position(&pool, SeedPosition { volume: -5, ..SeedPosition::new("example.com", "broken") }).await;

    let err = service.positions("example.com", 10, 0, "").await.unwrap_err();
    assert!(matches!(err, QueryError::QueryFailed(_)));
}
