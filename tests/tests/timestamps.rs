use tests::prelude::*;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Default, Clone, Model)]
struct Post {
    #[key]
    #[db_default]
    id: i64,

    title: String,

    #[auto]
    created_at: DateTime<Utc>,

    #[auto]
    updated_at: DateTime<Utc>,
}

const SCHEMA: &str = "
    CREATE TABLE posts (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
";

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

#[test]
fn timestamp_columns_are_marked() {
    assert!(Post::TABLE.created_at().is_some());
    assert_eq!(
        Post::TABLE.updated_at().map(|column| column.name),
        Some("updated_at")
    );
}

#[tokio::test]
async fn insert_sets_both() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let before = Utc::now() - Duration::seconds(1);

    let mut post = Post {
        title: "hello".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();

    assert!(post.created_at > before);
    assert_eq!(post.created_at, post.updated_at);

    let stored = Post::find(db, post.id).await.unwrap();
    assert_eq!(stored.created_at, post.created_at);
    assert_eq!(stored.updated_at, post.updated_at);
}

#[tokio::test]
async fn insert_keeps_explicit_values() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let then = "2020-01-02T03:04:05.123456Z".parse::<DateTime<Utc>>().unwrap();

    let mut post = Post {
        title: "imported".to_string(),
        created_at: then,
        updated_at: then,
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();

    let stored = Post::find(db, post.id).await.unwrap();
    assert_eq!(stored.created_at, then);
    assert_eq!(stored.updated_at, then);
}

#[tokio::test]
async fn update_refreshes_updated_at_only() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut post = Post {
        title: "hello".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();
    let created_at = post.created_at;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    post.title = "hello again".to_string();
    // A local change to `created_at` is never written by an inferred update.
    post.created_at = epoch();
    db.update(&mut post, Columns::Infer).await.unwrap();

    assert!(post.updated_at > created_at);

    let stored = Post::find(db, post.id).await.unwrap();
    assert_eq!(stored.created_at, created_at);
    assert_eq!(stored.updated_at, post.updated_at);
}

#[tokio::test]
async fn skip_timestamps() {
    let test = DbTest::new(SCHEMA).await;
    let db = test.db.skip_timestamps();

    let mut post = Post {
        title: "raw".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();
    assert_eq!(post.created_at, epoch());
    assert_eq!(post.updated_at, epoch());

    let stored = Post::find(&db, post.id).await.unwrap();
    assert_eq!(stored.created_at, epoch());

    post.title = "still raw".to_string();
    db.update(&mut post, Columns::Infer).await.unwrap();
    assert_eq!(post.updated_at, epoch());

    // The regular handle still stamps.
    test.db.update(&mut post, Columns::Infer).await.unwrap();
    assert_ne!(post.updated_at, epoch());
}

#[tokio::test]
async fn whitelisted_update_still_writes_updated_at() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut post = Post {
        title: "hello".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();
    let inserted_at = post.updated_at;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    post.title = "renamed".to_string();
    db.update(&mut post, Columns::whitelist(["title"])).await.unwrap();
    assert!(post.updated_at > inserted_at);

    let mut reloaded = post.clone();
    db.reload(&mut reloaded).await.unwrap();
    assert_eq!(reloaded.title, post.title);
    assert_eq!(reloaded.created_at, post.created_at);
    assert_eq!(reloaded.updated_at, post.updated_at);

    let sql = test.log().sql();
    assert_eq!(
        sql[1],
        r#"UPDATE "posts" SET "title" = ?1, "updated_at" = ?2 WHERE "id" = ?3;"#
    );
}

#[tokio::test]
async fn whitelisted_writes_skip_updated_at_when_timestamps_are_skipped() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut post = Post {
        title: "hello".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::Infer).await.unwrap();

    post.title = "quiet".to_string();
    db.skip_timestamps()
        .update(&mut post, Columns::whitelist(["title"]))
        .await
        .unwrap();

    let sql = test.log().sql();
    assert_eq!(
        sql[1],
        r#"UPDATE "posts" SET "title" = ?1 WHERE "id" = ?2;"#
    );
}

#[tokio::test]
async fn whitelisted_insert_still_writes_timestamps() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut post = Post {
        title: "hello".to_string(),
        ..Default::default()
    };
    db.insert(&mut post, Columns::whitelist(["title"])).await.unwrap();

    let stored = Post::find(db, post.id).await.unwrap();
    assert_ne!(stored.created_at, epoch());
    assert_eq!(stored.created_at, post.created_at);
    assert_eq!(stored.updated_at, post.updated_at);
}
