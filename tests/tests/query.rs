use tests::prelude::*;

use pretty_assertions::assert_eq;

use rowmap::Assignments;

#[derive(Debug, Default, Clone, PartialEq, Model)]
struct Device {
    #[key]
    #[db_default]
    id: i64,

    name: String,

    battery: i32,

    owner: Option<String>,
}

const SCHEMA: &str = "
    CREATE TABLE devices (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        battery INTEGER NOT NULL,
        owner TEXT
    )
";

async fn seed(test: &DbTest) {
    let devices = [
        ("tracker", 80, Some("ana")),
        ("beacon", 15, Some("ana")),
        ("watch", 55, None),
        ("phone", 100, Some("ben")),
    ];

    for (name, battery, owner) in devices {
        let mut device = Device {
            name: name.to_string(),
            battery,
            owner: owner.map(str::to_string),
            ..Default::default()
        };
        test.db.insert(&mut device, Columns::Infer).await.unwrap();
    }

    test.log().clear();
}

fn names(devices: &[Device]) -> Vec<&str> {
    devices.iter().map(|device| device.name.as_str()).collect()
}

#[tokio::test]
async fn filter_and_order() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let devices = Device::filter(Device::FIELDS.battery().ge(50))
        .order_by(Device::FIELDS.battery().desc())
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&devices), ["phone", "tracker", "watch"]);

    let devices = Device::filter(
        Device::FIELDS
            .owner()
            .eq("ana")
            .and(Device::FIELDS.battery().lt(50)),
    )
    .all(db)
    .await
    .unwrap();
    assert_eq!(names(&devices), ["beacon"]);

    let devices = Device::filter(
        Device::FIELDS
            .name()
            .eq("watch")
            .or(Device::FIELDS.name().eq("phone")),
    )
    .order_by(Device::FIELDS.id().asc())
    .all(db)
    .await
    .unwrap();
    assert_eq!(names(&devices), ["watch", "phone"]);

    let devices = Device::filter(Device::FIELDS.owner().eq("ana").not())
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&devices), ["phone"]);
}

#[tokio::test]
async fn null_comparisons() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let unowned = Device::filter(Device::FIELDS.owner().is_null())
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&unowned), ["watch"]);

    let none: Option<String> = None;
    let unowned = Device::filter(Device::FIELDS.owner().eq(none.clone()))
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&unowned), ["watch"]);

    let owned = Device::filter(Device::FIELDS.owner().ne(none))
        .count(db)
        .await
        .unwrap();
    assert_eq!(owned, 3);

    let owned = Device::filter(Device::FIELDS.owner().is_not_null())
        .count(db)
        .await
        .unwrap();
    assert_eq!(owned, 3);
}

#[tokio::test]
async fn in_list_limit_offset() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let devices = Device::filter(
        Device::FIELDS
            .name()
            .in_list(["beacon".to_string(), "phone".to_string(), "nope".to_string()]),
    )
    .order_by(Device::FIELDS.name().asc())
    .all(db)
    .await
    .unwrap();
    assert_eq!(names(&devices), ["beacon", "phone"]);

    let devices = Device::query()
        .order_by(Device::FIELDS.id().asc())
        .limit(2)
        .offset(1)
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&devices), ["beacon", "watch"]);

    let devices = Device::query()
        .order_by(Device::FIELDS.id().asc())
        .offset(3)
        .all(db)
        .await
        .unwrap();
    assert_eq!(names(&devices), ["phone"]);
}

#[tokio::test]
async fn one_first_count_exists() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let phone = Device::filter(Device::FIELDS.name().eq("phone"))
        .one(db)
        .await
        .unwrap();
    assert_eq!(phone.battery, 100);

    assert_err!(
        Device::filter(Device::FIELDS.name().eq("laptop")).one(db).await,
        is_record_not_found
    );

    let first = Device::filter(Device::FIELDS.name().eq("laptop"))
        .first(db)
        .await
        .unwrap();
    assert!(first.is_none());

    assert_eq!(Device::query().count(db).await.unwrap(), 4);
    assert_eq!(Device::query().limit(1).count(db).await.unwrap(), 1);
    assert_eq!(Device::query().offset(3).count(db).await.unwrap(), 1);
    assert_eq!(Device::query().offset(10).count(db).await.unwrap(), 0);
    assert!(Device::filter(Device::FIELDS.battery().gt(90))
        .exists(db)
        .await
        .unwrap());
    assert!(!Device::filter(Device::FIELDS.battery().gt(100))
        .exists(db)
        .await
        .unwrap());

    let sql = test.log().sql();
    assert!(sql.iter().any(|sql| sql.starts_with("SELECT COUNT(*) FROM")));
    assert!(sql.iter().any(|sql| sql.starts_with("SELECT EXISTS(")));
}

#[tokio::test]
async fn partial_columns() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let devices = Device::query()
        .columns(&[Device::COLUMNS.id, Device::COLUMNS.name])
        .order_by(Device::FIELDS.id().asc())
        .all(db)
        .await
        .unwrap();

    assert_eq!(devices.len(), 4);
    assert_eq!(devices[0].name, "tracker");
    assert_eq!(devices[0].battery, 0);
    assert_eq!(devices[0].owner, None);

    assert_err!(
        Device::query().columns(&["nope"]).all(db).await,
        is_validation
    );
}

#[tokio::test]
async fn bulk_by_predicate() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let updated = Device::filter(Device::FIELDS.owner().eq("ana"))
        .update_all(db, Assignments::new().set(Device::FIELDS.battery(), 1))
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let low = Device::filter(Device::FIELDS.battery().eq(1))
        .count(db)
        .await
        .unwrap();
    assert_eq!(low, 2);

    assert_err!(
        Device::query().update_all(db, Assignments::new()).await,
        is_validation
    );

    let deleted = Device::filter(Device::FIELDS.battery().lt(10))
        .delete(db)
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(Device::query().count(db).await.unwrap(), 2);
}

#[tokio::test]
async fn filters_compose_from_lists() {
    let test = DbTest::new(SCHEMA).await;
    seed(&test).await;
    let db = &test.db;

    let any = Filter::or_any(
        ["tracker", "watch"]
            .into_iter()
            .map(|name| Device::FIELDS.name().eq(name)),
    );
    assert_eq!(Device::filter(any).count(db).await.unwrap(), 2);

    let everything = Filter::<Device>::and_all([]);
    assert_eq!(Device::filter(everything).count(db).await.unwrap(), 4);
}
