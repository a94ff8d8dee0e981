use tests::prelude::*;

use pretty_assertions::assert_eq;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq, Model)]
struct Sample {
    #[key]
    #[db_default]
    id: i64,

    flag: bool,
    small: i32,
    big: i64,
    ratio: f64,
    label: String,
    note: Option<String>,
    data: Vec<u8>,
    price: Decimal,
    discount: Option<Decimal>,
    meta: serde_json::Value,
    tags: Vec<String>,
    seen_at: DateTime<Utc>,
    gone_at: Option<DateTime<Utc>>,
}

const SCHEMA: &str = "
    CREATE TABLE samples (
        id INTEGER PRIMARY KEY,
        flag BOOLEAN NOT NULL,
        small INTEGER NOT NULL,
        big INTEGER NOT NULL,
        ratio REAL NOT NULL,
        label TEXT NOT NULL,
        note TEXT,
        data BLOB NOT NULL,
        price TEXT NOT NULL,
        discount TEXT,
        meta TEXT NOT NULL,
        tags TEXT NOT NULL,
        seen_at TEXT NOT NULL,
        gone_at TEXT
    )
";

fn sample() -> Sample {
    Sample {
        id: 0,
        flag: true,
        small: -7,
        big: i64::MAX,
        ratio: 2.5,
        label: "héllo".to_string(),
        note: Some("note".to_string()),
        data: vec![0, 1, 254, 255],
        price: Decimal::new(1250, 2),
        discount: None,
        meta: json!({ "color": "red", "sizes": [1, 2] }),
        tags: vec!["a".to_string(), "b,c".to_string()],
        seen_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        gone_at: None,
    }
}

#[tokio::test]
async fn round_trip() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut written = sample();
    db.insert(&mut written, Columns::Infer).await.unwrap();
    assert_ne!(written.id, 0);

    let read = Sample::find(db, written.id).await.unwrap();
    assert_eq!(read, written);

    let mut changed = Sample {
        flag: false,
        note: None,
        discount: Some(Decimal::new(-5, 1)),
        meta: json!(null),
        tags: vec![],
        gone_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        ..read
    };
    db.update(&mut changed, Columns::Infer).await.unwrap();

    let read = Sample::find(db, changed.id).await.unwrap();
    assert_eq!(read, changed);
}

#[tokio::test]
async fn typed_filters() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut written = sample();
    db.insert(&mut written, Columns::Infer).await.unwrap();

    let found = Sample::filter(
        Sample::FIELDS
            .seen_at()
            .lt(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
            .and(Sample::FIELDS.flag().eq(true))
            .and(Sample::FIELDS.gone_at().is_null()),
    )
    .count(db)
    .await
    .unwrap();
    assert_eq!(found, 1);

    let found = Sample::filter(Sample::FIELDS.big().eq(i64::MAX))
        .exists(db)
        .await
        .unwrap();
    assert!(found);
}

#[tokio::test]
async fn bad_stored_value() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut written = sample();
    db.insert(&mut written, Columns::Infer).await.unwrap();

    db.execute_sql("UPDATE samples SET price = 'lots'", vec![])
        .await
        .unwrap();
    assert_err!(Sample::find(db, written.id).await, is_type_conversion);

    db.execute_sql("UPDATE samples SET price = '1', small = 3000000000", vec![])
        .await
        .unwrap();
    assert_err!(Sample::query().all(db).await, is_type_conversion);
}

#[derive(Debug, Default, Clone, Model)]
struct Price {
    #[key]
    id: i64,

    amount: Decimal,
}

#[tokio::test]
async fn decimals_need_text_columns() {
    let amount: Decimal = "12345678901234567.123456789".parse().unwrap();

    let test = DbTest::new("CREATE TABLE prices (id INTEGER PRIMARY KEY, amount TEXT NOT NULL)").await;
    let mut price = Price { id: 1, amount };
    test.db.insert(&mut price, Columns::Infer).await.unwrap();
    assert_eq!(Price::find(&test.db, 1_i64).await.unwrap().amount, amount);

    // NUMERIC affinity stores the value as REAL, losing digits.
    let test = DbTest::new("CREATE TABLE prices (id INTEGER PRIMARY KEY, amount NUMERIC NOT NULL)").await;
    let mut price = Price { id: 1, amount };
    test.db.insert(&mut price, Columns::Infer).await.unwrap();
    assert_err!(Price::find(&test.db, 1_i64).await, is_type_conversion);
}

#[tokio::test]
async fn sql_errors_are_driver_errors() {
    let test = DbTest::new(SCHEMA).await;

    assert_err!(
        test.db.execute_sql("SELECT * FROM nope", vec![]).await,
        is_driver_operation_failed
    );

    let err = Db::connect("mysql://localhost/db").await.err().unwrap();
    assert!(err.is_invalid_connection_url());
}
