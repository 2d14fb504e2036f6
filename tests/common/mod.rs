use linksaver::db;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// テスト用のインメモリDBプール
/// in-memory SQLiteは接続ごとに別DBになるため単一接続に固定する
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    db::init_schema(&pool).await.expect("init schema");
    pool
}
