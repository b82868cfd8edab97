//! Idempotent schema creation.

mod common;

use common::setup;
use persistence::schema::{self, TABLES};

#[tokio::test]
async fn test_setup_twice_keeps_same_tables() {
    let ctx = setup().await;

    let before = {
        let mut conn = ctx.db.acquire().await.unwrap();
        schema::list_tables(&mut conn).await.unwrap()
    };

    ctx.service.init_db().await.unwrap();
    schema::setup_tables(&ctx.db).await.unwrap();

    let after = {
        let mut conn = ctx.db.acquire().await.unwrap();
        schema::list_tables(&mut conn).await.unwrap()
    };

    assert_eq!(before, after);
    assert_eq!(after.len(), TABLES.len());
    for table in TABLES {
        assert!(after.iter().any(|name| name == table.name), "missing {}", table.name);
    }
}

#[tokio::test]
async fn test_setup_preserves_rows() {
    let ctx = setup().await;
    ctx.service.add_language("es", "Spanish").await;

    ctx.service.init_db().await.unwrap();

    assert_eq!(ctx.service.get_languages().await[0].code, "es");
}
