use tests::prelude::*;

use rowmap::StatementCache;

use std::sync::Arc;

#[derive(Debug, Default, Clone, Model)]
struct Note {
    #[key]
    #[db_default]
    id: i64,

    body: String,

    #[db_default]
    pinned: bool,
}

const SCHEMA: &str = "
    CREATE TABLE notes (
        id INTEGER PRIMARY KEY,
        body TEXT NOT NULL,
        pinned BOOLEAN NOT NULL DEFAULT FALSE
    )
";

fn note(body: &str) -> Note {
    Note {
        body: body.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn same_shape_hits() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;
    let cache = db.statement_cache();

    db.insert(&mut note("a"), Columns::Infer).await.unwrap();
    assert_eq!((cache.misses(), cache.hits()), (1, 0));

    db.insert(&mut note("b"), Columns::Infer).await.unwrap();
    assert_eq!((cache.misses(), cache.hits()), (1, 1));
    assert_eq!(cache.len(), 1);

    let sql = test.log().sql();
    assert_eq!(sql[0], sql[1]);
}

#[tokio::test]
async fn shape_depends_on_policy_and_defaults() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;
    let cache = db.statement_cache();

    db.insert(&mut note("a"), Columns::Infer).await.unwrap();

    // A non-zero default-bearing field is written, which changes the SQL.
    let mut pinned = Note {
        pinned: true,
        ..note("b")
    };
    db.insert(&mut pinned, Columns::Infer).await.unwrap();
    assert_eq!(cache.len(), 2);

    db.insert(&mut note("c"), Columns::All).await.unwrap();
    assert_eq!(cache.len(), 3);

    pinned.body = "b2".to_string();
    db.update(&mut pinned, Columns::Infer).await.unwrap();
    db.update(&mut pinned, Columns::whitelist(["body"])).await.unwrap();
    assert_eq!(cache.len(), 5);
    assert_eq!(cache.hits(), 0);

    let sql = test.log().sql();
    assert!(sql[0].starts_with("INSERT INTO \"notes\" (\"body\") VALUES"));
    assert!(sql[0].ends_with("RETURNING \"id\", \"pinned\";"));
    assert!(sql[1].starts_with("INSERT INTO \"notes\" (\"body\", \"pinned\") VALUES"));
}

#[tokio::test]
async fn disabled_cache_gives_the_same_results() {
    let mut builder = Db::builder();
    builder.statement_cache(Arc::new(StatementCache::disabled()));
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    let mut first = note("a");
    let mut second = note("b");
    db.insert(&mut first, Columns::Infer).await.unwrap();
    db.insert(&mut second, Columns::Infer).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(!second.pinned);
    assert!(!db.statement_cache().is_enabled());
    assert!(db.statement_cache().is_empty());
    assert_eq!(db.statement_cache().hits(), 0);
}

#[tokio::test]
async fn shared_between_databases() {
    let cache = Arc::new(StatementCache::new());

    let mut builder = Db::builder();
    builder.statement_cache(cache.clone());
    let one = DbTest::with_builder(builder, SCHEMA).await;

    let mut builder = Db::builder();
    builder.statement_cache(cache.clone());
    let two = DbTest::with_builder(builder, SCHEMA).await;

    one.db.insert(&mut note("a"), Columns::Infer).await.unwrap();
    two.db.insert(&mut note("b"), Columns::Infer).await.unwrap();

    assert_eq!((cache.misses(), cache.hits()), (1, 1));
    assert_eq!(Note::query().count(&two.db).await.unwrap(), 1);

    cache.clear();
    assert!(cache.is_empty());
}
