use tests::prelude::*;

use async_trait::async_trait;
use rowmap::{stmt::Value, Error, Hook};

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

#[derive(Debug, Default, Clone, Model)]
struct User {
    #[key]
    #[db_default]
    id: i64,

    name: String,

    email: String,
}

const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL
    );
    CREATE TABLE audit (
        entry TEXT NOT NULL
    )
";

fn ana() -> User {
    User {
        name: "Ana".to_string(),
        email: "ANA@Example.com".to_string(),
        ..Default::default()
    }
}

/// Records every written row in the `audit` table.
struct Audit;

#[async_trait]
impl Hook<User> for Audit {
    async fn call(&self, db: &Db, row: &mut User) -> Result<()> {
        db.execute_sql(
            "INSERT INTO audit (entry) VALUES (?1)",
            vec![Value::from(format!("user {}", row.id))],
        )
        .await?;
        Ok(())
    }
}

#[tokio::test]
async fn before_insert_rewrites_the_row() {
    let mut builder = Db::builder();
    builder.hook::<User>(HookPoint::BeforeInsert, |user: &mut User| {
        user.email = user.email.to_lowercase();
        Ok(())
    });
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    let mut user = ana();
    db.insert(&mut user, Columns::Infer).await.unwrap();
    assert_eq!(user.email, "ana@example.com");

    let stored = User::find(db, user.id).await.unwrap();
    assert_eq!(stored.email, "ana@example.com");
}

#[tokio::test]
async fn failing_hook_aborts_the_write() {
    let mut builder = Db::builder();
    builder.hook::<User>(HookPoint::BeforeInsert, |user: &mut User| {
        if user.name.is_empty() {
            return Err(Error::hook_failed("name is required"));
        }
        Ok(())
    });
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    let mut nameless = User::default();
    assert_err!(db.insert(&mut nameless, Columns::Infer).await, is_hook_failed);
    assert!(test.log().is_empty());

    // Skipped hooks do not run at all.
    db.skip_hooks()
        .insert(&mut nameless, Columns::Infer)
        .await
        .unwrap();
    assert_eq!(test.log().count_sql("INSERT INTO \"users\""), 1);
}

#[tokio::test]
async fn hooks_run_in_registration_order() {
    let calls = Arc::new(Mutex::new(vec![]));

    let mut builder = Db::builder();
    for name in ["first", "second"] {
        let calls = calls.clone();
        builder.hook::<User>(HookPoint::BeforeUpdate, move |_: &mut User| {
            calls.lock().unwrap().push(name);
            Ok(())
        });
    }
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    {
        let calls = calls.clone();
        db.hooks()
            .register::<User>(HookPoint::AfterUpdate, move |_: &mut User| {
                calls.lock().unwrap().push("after");
                Ok(())
            });
    }
    assert_eq!(db.hooks().len::<User>(HookPoint::BeforeUpdate), 2);

    let mut user = ana();
    db.insert(&mut user, Columns::Infer).await.unwrap();
    assert!(calls.lock().unwrap().is_empty());

    user.name = "Ana Maria".to_string();
    db.update(&mut user, Columns::Infer).await.unwrap();
    assert_eq!(*calls.lock().unwrap(), ["first", "second", "after"]);

    db.hooks().clear::<User>();
    db.update(&mut user, Columns::Infer).await.unwrap();
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn after_select_runs_per_loaded_row() {
    let loaded = Arc::new(AtomicUsize::new(0));

    let mut builder = Db::builder();
    {
        let loaded = loaded.clone();
        builder.hook::<User>(HookPoint::AfterSelect, move |_: &mut User| {
            loaded.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    let mut user = ana();
    db.insert(&mut user, Columns::Infer).await.unwrap();
    let mut other = User {
        name: "Ben".to_string(),
        ..ana()
    };
    db.insert(&mut other, Columns::Infer).await.unwrap();
    assert_eq!(loaded.load(Ordering::SeqCst), 0);

    User::query().all(db).await.unwrap();
    assert_eq!(loaded.load(Ordering::SeqCst), 2);

    User::find(db, user.id).await.unwrap();
    db.reload(&mut user).await.unwrap();
    assert_eq!(loaded.load(Ordering::SeqCst), 4);

    // Aggregates load no rows.
    User::query().count(db).await.unwrap();
    assert_eq!(loaded.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn async_hook_uses_the_database() {
    let mut builder = Db::builder();
    builder.hook::<User>(HookPoint::AfterInsert, Audit);
    builder.hook::<User>(HookPoint::AfterDelete, Audit);
    let test = DbTest::with_builder(builder, SCHEMA).await;
    let db = &test.db;

    let mut user = ana();
    db.insert(&mut user, Columns::Infer).await.unwrap();
    db.delete(&mut user).await.unwrap();

    let sql = test.log().sql();
    assert_eq!(sql.len(), 4);
    assert!(sql[1].starts_with("INSERT INTO audit"));
    assert!(sql[2].starts_with("DELETE FROM \"users\""));
    assert!(sql[3].starts_with("INSERT INTO audit"));
}

#[tokio::test]
async fn hooks_see_the_transaction() {
    let mut builder = Db::builder();
    builder.hook::<User>(HookPoint::AfterInsert, Audit);
    let test = DbTest::with_builder(builder, SCHEMA).await;

    let tx = test.db.transaction().await.unwrap();
    let mut user = ana();
    tx.insert(&mut user, Columns::Infer).await.unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(test.db.execute_sql("DELETE FROM audit", vec![]).await.unwrap(), 0);
}
