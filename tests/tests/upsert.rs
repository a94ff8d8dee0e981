use tests::prelude::*;

use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone, Model)]
struct Setting {
    #[key]
    name: String,

    value: String,

    #[auto]
    created_at: DateTime<Utc>,

    #[auto]
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Model)]
struct Subscriber {
    #[key]
    #[db_default]
    id: i64,

    email: String,

    plan: String,
}

const SCHEMA: &str = "
    CREATE TABLE settings (
        name TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE subscribers (
        id INTEGER PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        plan TEXT NOT NULL
    )
";

fn setting(name: &str, value: &str) -> Setting {
    Setting {
        name: name.to_string(),
        value: value.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn inserts_then_updates() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut theme = setting("theme", "dark");
    db.upsert(&mut theme, Upsert::new()).await.unwrap();
    assert_ne!(theme.created_at, DateTime::<Utc>::default());
    assert_eq!(theme.created_at, theme.updated_at);

    let created_at = theme.created_at;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let mut again = setting("theme", "light");
    db.upsert(&mut again, Upsert::new()).await.unwrap();

    let stored = Setting::find(db, "theme").await.unwrap();
    assert_eq!(stored.value, "light");
    assert_eq!(stored.created_at, created_at);
    assert!(stored.updated_at > created_at);

    assert_eq!(Setting::query().count(db).await.unwrap(), 1);

    let sql = test.log().sql();
    assert_eq!(sql.len(), 4);
    assert!(sql[0].starts_with("INSERT INTO \"settings\""));
    assert!(sql[0].contains("ON CONFLICT (\"name\") DO UPDATE SET"));
    assert!(sql[0].contains("\"value\" = EXCLUDED.\"value\""));
    assert!(!sql[0].contains("\"created_at\" = EXCLUDED"));
}

#[tokio::test]
async fn ignoring_conflicts() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut theme = setting("theme", "dark");
    db.upsert(&mut theme, Upsert::new()).await.unwrap();

    let mut again = setting("theme", "light");
    db.upsert(&mut again, Upsert::new().update_on_conflict(false))
        .await
        .unwrap();
    assert_eq!(again.value, "light");

    let stored = Setting::find(db, "theme").await.unwrap();
    assert_eq!(stored.value, "dark");
    assert!(test.log().sql()[1].contains("DO NOTHING"));
}

#[tokio::test]
async fn update_list_must_not_be_empty() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut theme = setting("theme", "dark");
    assert_err!(
        db.upsert(&mut theme, Upsert::new().update_columns(Columns::None))
            .await,
        is_validation
    );
    assert_err!(
        db.upsert(
            &mut theme,
            Upsert::new().update_columns(Columns::whitelist(["name"]))
        )
        .await,
        is_validation
    );
    assert!(test.log().is_empty());

    // Without an update on conflict, the update list is never consulted.
    db.upsert(
        &mut theme,
        Upsert::new()
            .update_on_conflict(false)
            .update_columns(Columns::None),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn update_whitelist() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut theme = setting("theme", "dark");
    db.upsert(&mut theme, Upsert::new()).await.unwrap();

    let mut again = setting("theme", "light");
    db.upsert(
        &mut again,
        Upsert::new().update_columns(Columns::whitelist(["updated_at"])),
    )
    .await
    .unwrap();

    let stored = Setting::find(db, "theme").await.unwrap();
    assert_eq!(stored.value, "dark");
    assert!(stored.updated_at >= theme.updated_at);
}

#[tokio::test]
async fn conflict_on_unique_column() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut first = Subscriber {
        email: "ana@example.com".to_string(),
        plan: "free".to_string(),
        ..Default::default()
    };
    db.upsert(&mut first, Upsert::new().conflict_columns(["email"]))
        .await
        .unwrap();
    assert_ne!(first.id, 0);

    let mut second = Subscriber {
        email: "ana@example.com".to_string(),
        plan: "pro".to_string(),
        ..Default::default()
    };
    db.upsert(&mut second, Upsert::new().conflict_columns(["email"]))
        .await
        .unwrap();

    // The existing row's key is read back.
    assert_eq!(second.id, first.id);

    let stored = Subscriber::find(db, first.id).await.unwrap();
    assert_eq!(stored.plan, "pro");
    assert_eq!(Subscriber::query().count(db).await.unwrap(), 1);

    assert_err!(
        db.upsert(&mut second, Upsert::new().conflict_columns(["nope"]))
            .await,
        is_validation
    );
}
