mod common;

use common::{ScriptedTransport, WAREHOUSE_ID, tables_page};
use mcd_describe::{
    client::CatalogClient,
    error::ImportError,
    tables::{TablePages, build_table_map},
};
use serde_json::json;
use uuid::Uuid;

fn warehouse() -> Uuid {
    Uuid::parse_str(WAREHOUSE_ID).unwrap()
}

#[test]
fn build_table_map_follows_cursors_across_pages() {
    let transport = ScriptedTransport::new()
        .ok(tables_page(
            &[("db:s.t1", "mcon-1"), ("db:s.t2", "mcon-2")],
            Some("cursor-1"),
        ))
        .ok(tables_page(&[("db:s.t3", "mcon-3")], Some("cursor-2")))
        .ok(tables_page(&[("DB:S.T4", "mcon-4")], None));
    let client = CatalogClient::new(&transport);

    let map = build_table_map(&client, warehouse(), 1000).expect("build map");

    assert_eq!(map.len(), 4);
    assert_eq!(map.lookup("db:s.t4"), Some("mcon-4"));
    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0]["variables"].get("after"), None);
    assert_eq!(requests[1]["variables"]["after"], json!("cursor-1"));
    assert_eq!(requests[2]["variables"]["after"], json!("cursor-2"));
    for request in &requests {
        assert_eq!(request["variables"]["dwId"], json!(WAREHOUSE_ID));
        assert_eq!(request["variables"]["first"], json!(1000));
        assert_eq!(request["variables"]["isDeleted"], json!(true));
    }
}

#[test]
fn later_pages_win_for_duplicate_tables() {
    let transport = ScriptedTransport::new()
        .ok(tables_page(&[("db:s.t1", "old")], Some("cursor-1")))
        .ok(tables_page(&[("db:s.T1", "new")], None));
    let client = CatalogClient::new(&transport);

    let map = build_table_map(&client, warehouse(), 1000).expect("build map");

    assert_eq!(map.len(), 1);
    assert_eq!(map.lookup("db:s.t1"), Some("new"));
}

#[test]
fn single_page_issues_one_request() {
    let transport = ScriptedTransport::new().ok(tables_page(&[("db:s.t1", "m1")], None));
    let client = CatalogClient::new(&transport);

    let map = build_table_map(&client, warehouse(), 250).expect("build map");

    assert_eq!(map.len(), 1);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.requests()[0]["variables"]["first"], json!(250));
}

#[test]
fn pages_stop_when_next_page_lacks_a_cursor() {
    let transport = ScriptedTransport::new().ok(json!({
        "data": {
            "getTables": {
                "edges": [],
                "pageInfo": {"endCursor": null, "hasNextPage": true}
            }
        }
    }));
    let client = CatalogClient::new(&transport);

    let pages = TablePages::new(&client, warehouse(), 1000)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("pages");

    assert_eq!(pages.len(), 1);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn page_errors_abort_the_build() {
    let transport = ScriptedTransport::new()
        .ok(tables_page(&[("db:s.t1", "m1")], Some("cursor-1")))
        .respond(500, json!({"message": "internal error"}));
    let client = CatalogClient::new(&transport);

    let err = build_table_map(&client, warehouse(), 1000).unwrap_err();

    assert!(format!("{err:#}").contains("Fetching table page 2"));
    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Http { status: 500, .. })
    ));
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn iterator_yields_nothing_after_an_error() {
    let transport = ScriptedTransport::new().respond(502, json!({"message": "bad gateway"}));
    let client = CatalogClient::new(&transport);
    let mut pages = TablePages::new(&client, warehouse(), 1000);

    assert!(pages.next().expect("first item").is_err());
    assert!(pages.next().is_none());
    assert_eq!(transport.request_count(), 1);
}
