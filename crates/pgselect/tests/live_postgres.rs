//! Runs statements against a real database. Skipped when DATABASE_URL is unset.

use pgselect::prelude::*;
use tokio_postgres::{NoTls, Row};

#[derive(Debug, PartialEq)]
struct Account {
    id: i64,
    name: String,
}

impl FromRow for Account {
    fn from_row(row: &Row) -> SqlResult<Self> {
        Ok(Account {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
        })
    }
}

async fn connect() -> SqlResult<Option<tokio_postgres::Client>> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping live_postgres");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .map_err(SqlError::from_db_error)?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Ok(Some(client))
}

#[tokio::test]
async fn select_roundtrip() -> SqlResult<()> {
    let Some(client) = connect().await? else {
        return Ok(());
    };

    client
        .batch_execute(
            "CREATE TEMP TABLE pgselect_accounts (id BIGINT PRIMARY KEY, name TEXT NOT NULL, active BOOLEAN NOT NULL);
             INSERT INTO pgselect_accounts VALUES (1, 'ada', true), (2, 'bob', false), (3, 'cy', true), (4, 'di', true);",
        )
        .await
        .map_err(SqlError::from_db_error)?;

    let db = Db::new(client);
    let stmt = db
        .select(["id", "name"])
        .from("pgselect_accounts")
        .where_([Condition::eq("active", true)])
        .order_by([desc("id")])
        .limit(2);

    let accounts: Vec<Account> = stmt.get_all(&db).await?;
    assert_eq!(
        accounts,
        vec![
            Account { id: 4, name: "di".into() },
            Account { id: 3, name: "cy".into() },
        ]
    );

    let first: Account = stmt.get_row(&db).await?;
    assert_eq!(first.id, 4);

    assert_eq!(stmt.get_count(&db).await?, 3);

    let pair: (i64, String) = db
        .select(["id", "name"])
        .from("pgselect_accounts")
        .where_([Condition::eq("id", 2i64)])
        .lock(for_update().no_wait())
        .get_row(&db)
        .await?;
    assert_eq!(pair, (2, "bob".to_string()));

    let missing = db
        .select(["id"])
        .from("pgselect_accounts")
        .where_([Condition::eq("id", 99i64)])
        .get_row::<i64>(&db)
        .await;
    assert!(matches!(missing, Err(ref e) if e.is_not_found()));

    let grouped = db
        .select(["active"])
        .from("pgselect_accounts")
        .group_by(["active"])
        .order_by([asc("active")]);
    assert_eq!(grouped.get_count(&db).await?, 2);

    let distinct = db.select(["active"]).distinct(["active"]).from("pgselect_accounts");
    assert_eq!(distinct.get_count(&db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn jsonb_operand_roundtrip() -> SqlResult<()> {
    let Some(client) = connect().await? else {
        return Ok(());
    };

    client
        .batch_execute(
            r#"CREATE TEMP TABLE pgselect_docs (id BIGINT PRIMARY KEY, body JSONB NOT NULL);
               INSERT INTO pgselect_docs VALUES
                 (1, '{"a": "x"}'),
                 (2, '{"a": "y", "tags": [1, true, null]}'),
                 (3, '{"n": 1.5}');"#,
        )
        .await
        .map_err(SqlError::from_db_error)?;

    let db = Db::new(client);

    let ids: Vec<i64> = db
        .select(["id"])
        .from("pgselect_docs")
        .where_([Condition::eq("body", Jsonb::object().set("a", Jsonb::scalar("x")))])
        .get_all(&db)
        .await?;
    assert_eq!(ids, vec![1]);

    let nested = Jsonb::object().set("a", Jsonb::scalar("y")).set(
        "tags",
        Jsonb::build_array([Jsonb::scalar(1i64), Jsonb::scalar(true), Jsonb::null()]),
    );
    let id: i64 = db
        .select(["id"])
        .from("pgselect_docs")
        .where_([Condition::eq("body", nested)])
        .get_row(&db)
        .await?;
    assert_eq!(id, 2);

    let from_json = Jsonb::from(serde_json::json!({"n": 1.5}));
    let count = db
        .select(["id"])
        .from("pgselect_docs")
        .where_([Condition::eq("body", from_json)])
        .get_count(&db)
        .await?;
    assert_eq!(count, 1);

    let echoed: serde_json::Value = db
        .select(["jsonb_build_array(1)"])
        .from("pgselect_docs")
        .where_([Condition::ne("body", Jsonb::build_array([Jsonb::scalar("z")]))])
        .limit(1)
        .get_row(&db)
        .await?;
    assert_eq!(echoed, serde_json::json!([1]));

    Ok(())
}
