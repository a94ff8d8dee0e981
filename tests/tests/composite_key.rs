use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Model)]
#[table = "memberships"]
struct Membership {
    #[key]
    org_id: i64,

    #[key]
    user_id: i64,

    role: String,
}

const SCHEMA: &str = "
    CREATE TABLE memberships (
        org_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        role TEXT NOT NULL,
        PRIMARY KEY (org_id, user_id)
    )
";

fn membership(org_id: i64, user_id: i64, role: &str) -> Membership {
    Membership {
        org_id,
        user_id,
        role: role.to_string(),
    }
}

#[tokio::test]
async fn crud_by_full_key() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut owner = membership(1, 10, "owner");
    let mut member = membership(1, 11, "member");
    db.insert(&mut owner, Columns::Infer).await.unwrap();
    db.insert(&mut member, Columns::Infer).await.unwrap();

    let found = Membership::find(db, 1_i64, 11_i64).await.unwrap();
    assert_eq!(found, member);

    member.role = "admin".to_string();
    assert_eq!(db.update(&mut member, Columns::Infer).await.unwrap(), 1);
    assert_eq!(Membership::find(db, 1_i64, 11_i64).await.unwrap().role, "admin");
    assert_eq!(Membership::find(db, 1_i64, 10_i64).await.unwrap().role, "owner");

    assert_eq!(db.delete(&mut owner).await.unwrap(), 1);
    assert!(!Membership::exists(db, 1_i64, 10_i64).await.unwrap());
    assert!(Membership::exists(db, 1_i64, 11_i64).await.unwrap());
}

#[tokio::test]
async fn partial_key_is_rejected() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    assert_err!(
        db.find_by_key::<Membership>(vec![1_i64.into()]).await,
        is_validation
    );
    assert_err!(
        db.exists::<Membership>(vec![1_i64.into(), 2_i64.into(), 3_i64.into()])
            .await,
        is_validation
    );
    assert!(test.log().is_empty());
}

#[tokio::test]
async fn update_never_writes_key_columns() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut row = membership(2, 20, "member");
    db.insert(&mut row, Columns::Infer).await.unwrap();
    test.log().clear();

    row.role = "owner".to_string();
    db.update(&mut row, Columns::All).await.unwrap();

    let sql = test.log().sql();
    assert_eq!(sql.len(), 1);
    assert!(sql[0].starts_with(r#"UPDATE "memberships" SET "role" = "#), "{}", sql[0]);
}

#[tokio::test]
async fn slice_operations() {
    let test = DbTest::new(SCHEMA).await;
    let db = &test.db;

    let mut rows = vec![
        membership(3, 1, "member"),
        membership(3, 2, "member"),
        membership(4, 1, "member"),
    ];
    for row in &mut rows {
        db.insert(row, Columns::Infer).await.unwrap();
    }
    test.log().clear();

    let assignments = rowmap::Assignments::new().set(Membership::FIELDS.role(), "guest");
    assert_eq!(db.update_all(&rows[..2], assignments).await.unwrap(), 2);
    assert_eq!(test.log().len(), 1);

    db.reload_all(&mut rows).await.unwrap();
    let mut roles: Vec<_> = rows.iter().map(|row| (row.org_id, row.user_id, row.role.clone())).collect();
    roles.sort();
    assert_eq!(
        roles,
        [
            (3, 1, "guest".to_string()),
            (3, 2, "guest".to_string()),
            (4, 1, "member".to_string()),
        ]
    );

    test.log().clear();
    assert_eq!(db.delete_all(&mut rows[1..]).await.unwrap(), 2);
    assert_eq!(test.log().len(), 1);

    db.reload_all(&mut rows).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].org_id, rows[0].user_id), (3, 1));
}
