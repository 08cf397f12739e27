use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// In-memory database with the `positions` table. A single connection that
/// never expires, since every new in-memory connection is a fresh database.
#[allow(dead_code)]
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::query(
        r#"
        CREATE TABLE positions (
            domain   TEXT    NOT NULL,
            keyword  TEXT    NOT NULL,
            position INTEGER NOT NULL,
            url      TEXT    NOT NULL,
            volume   INTEGER NOT NULL,
            results  INTEGER NOT NULL,
            cpc      REAL    NOT NULL,
            updated  TEXT    NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create positions table");

    pool
}

#[allow(dead_code)]
pub struct SeedPosition<'a> {
    pub domain: &'a str,
    pub keyword: &'a str,
    pub position: i64,
    pub volume: i64,
    pub results: i64,
    pub cpc: f64,
    pub updated: &'a str,
}

#[allow(dead_code)]
impl<'a> SeedPosition<'a> {
    pub fn new(domain: &'a str, keyword: &'a str) -> Self {
        Self {
            domain,
            keyword,
            position: 1,
            volume: 100,
            results: 1_000,
            cpc: 0.5,
            updated: "2020-02-02",
        }
    }
}

/// Seed a position row for testing.
#[allow(dead_code)]
pub async fn seed_position(pool: &SqlitePool, seed: SeedPosition<'_>) {
    sqlx::query(
        r#"
        INSERT INTO positions (domain, keyword, position, url, volume, results, cpc, updated)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(seed.domain)
    .bind(seed.keyword)
    .bind(seed.position)
    .bind(format!("https://{}/{}", seed.domain, seed.keyword))
    .bind(seed.volume)
    .bind(seed.results)
    .bind(seed.cpc)
    .bind(seed.updated)
    .execute(pool)
    .await
    .expect("Failed to seed position");
}

/// Seed `count` rows for `domain` with volumes 1..=count, inserted in reverse
/// so that insertion order differs from volume order.
#[allow(dead_code)]
pub async fn seed_many(pool: &SqlitePool, domain: &str, count: i64) {
    for i in (1..=count).rev() {
        let keyword = format!("kw{i:03}");
        seed_position(
            pool,
            SeedPosition {
                position: i,
                volume: i,
                results: count - i,
                ..SeedPosition::new(domain, &keyword)
            },
        )
        .await;
    }
}
