use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Model)]
struct User {
    #[key]
    #[db_default]
    id: i64,

    name: String,

    email: Option<String>,

    #[db_default]
    kind: String,
}

const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        kind TEXT NOT NULL DEFAULT 'member'
    )
";

fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn insert_reads_back_defaults() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    assert_eq!(alice.id, 1);
    assert_eq!(alice.kind, "member");
    assert_eq!(alice.email, None);

    let found = User::find(db, alice.id).await.unwrap();
    assert_eq!(found, alice);
}

#[tokio::test]
async fn insert_writes_non_zero_defaults() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut bob = User {
        kind: "admin".to_string(),
        ..user("Bob")
    };
    db.insert(&mut bob, Columns::Infer).await.unwrap();

    let found = User::find(db, bob.id).await.unwrap();
    assert_eq!(found.kind, "admin");
}

#[tokio::test]
async fn insert_with_explicit_lists() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut carol = User {
        email: Some("carol@example.com".to_string()),
        ..user("Carol")
    };
    db.insert(&mut carol, Columns::blacklist(["email"]))
        .await
        .unwrap();

    let found = User::find(db, carol.id).await.unwrap();
    assert_eq!(found.email, None);

    let mut dave = User {
        id: 40,
        ..user("Dave")
    };
    db.insert(&mut dave, Columns::whitelist(["id", "name"]))
        .await
        .unwrap();

    assert_eq!(dave.kind, "member");
    assert!(User::exists(db, 40_i64).await.unwrap());
}

#[tokio::test]
async fn update_writes_back_by_key() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    alice.name = "Alicia".to_string();
    alice.email = Some("alicia@example.com".to_string());
    assert_eq!(db.update(&mut alice, Columns::Infer).await.unwrap(), 1);

    let found = User::find(db, alice.id).await.unwrap();
    assert_eq!(found.name, "Alicia");
    assert_eq!(found.email.as_deref(), Some("alicia@example.com"));
}

#[tokio::test]
async fn update_whitelist_leaves_other_columns() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    alice.name = "ignored".to_string();
    alice.email = Some("alice@example.com".to_string());
    db.update(&mut alice, Columns::whitelist(["email"]))
        .await
        .unwrap();

    let found = User::find(db, alice.id).await.unwrap();
    assert_eq!(found.name, "Alice");
    assert_eq!(found.email.as_deref(), Some("alice@example.com"));
}

#[tokio::test]
async fn update_with_nothing_to_write_fails() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();
    test.log().clear();

    assert_err!(db.update(&mut alice, Columns::None).await, is_validation);
    assert_err!(
        db.update(&mut alice, Columns::whitelist(["id"])).await,
        is_validation
    );
    assert_err!(
        db.update(&mut alice, Columns::whitelist(["nope"])).await,
        is_validation
    );

    assert!(test.log().is_empty());
}

#[tokio::test]
async fn update_of_missing_row_counts_zero() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut ghost = User {
        id: 99,
        ..user("Ghost")
    };
    assert_eq!(db.update(&mut ghost, Columns::Infer).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_and_not_found() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    assert_eq!(db.delete(&mut alice).await.unwrap(), 1);
    assert_eq!(db.delete(&mut alice).await.unwrap(), 0);

    assert!(!User::exists(db, alice.id).await.unwrap());
    assert_err!(User::find(db, alice.id).await, is_record_not_found);
}

#[tokio::test]
async fn reload_discards_local_changes() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    alice.name = "local only".to_string();
    db.reload(&mut alice).await.unwrap();
    assert_eq!(alice.name, "Alice");

    db.delete(&mut alice).await.unwrap();
    assert_err!(db.reload(&mut alice).await, is_record_not_found);
}

#[tokio::test]
async fn untyped_key_lookups() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut alice = user("Alice");
    db.insert(&mut alice, Columns::Infer).await.unwrap();

    let found: User = db.find_by_key(vec![alice.id.into()]).await.unwrap();
    assert_eq!(found.name, "Alice");

    assert!(db.exists::<User>(vec![alice.id.into()]).await.unwrap());
    assert_err!(db.find_by_key::<User>(vec![]).await, is_validation);
}

#[test]
fn column_constants() {
    assert_eq!(User::COLUMNS.id, "id");
    assert_eq!(User::COLUMNS.kind, "kind");
    assert_eq!(User::TABLE_COLUMNS.email, "users.email");
    assert_eq!(User::TABLE.name, "users");
    assert_eq!(User::TABLE.primary_key, &[0]);
    assert!(User::TABLE.column(2).nullable);
    assert!(User::TABLE.column(3).has_default);
}
