#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use mcd_describe::client::{GraphqlResponse, Transport};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

pub const WAREHOUSE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const OTHER_WAREHOUSE_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Replays canned responses in order and records every payload it was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<GraphqlResponse>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses.borrow_mut().push_back(GraphqlResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn ok(self, body: Value) -> Self {
        self.respond(200, body)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("request payload is JSON"))
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, payload: &str) -> Result<GraphqlResponse> {
        self.requests.borrow_mut().push(payload.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected request: {payload}"))
    }
}

pub fn warehouses_response(warehouses: &[(&str, &str, &str)]) -> Value {
    let list = warehouses
        .iter()
        .map(|(uuid, name, connection_type)| {
            json!({"uuid": uuid, "name": name, "connectionType": connection_type})
        })
        .collect::<Vec<_>>();
    json!({"data": {"getUser": {"account": {"warehouses": list}}}})
}

pub fn tables_page(tables: &[(&str, &str)], next_cursor: Option<&str>) -> Value {
    let edges = tables
        .iter()
        .map(|(full_table_id, mcon)| json!({"node": {"fullTableId": full_table_id, "mcon": mcon}}))
        .collect::<Vec<_>>();
    json!({
        "data": {
            "getTables": {
                "edges": edges,
                "pageInfo": {
                    "endCursor": next_cursor,
                    "hasNextPage": next_cursor.is_some(),
                }
            }
        }
    })
}

pub fn mutation_ok(mcon: &str) -> Value {
    json!({
        "data": {
            "createOrUpdateCatalogObjectMetadata": {
                "catalogObjectMetadata": {"mcon": mcon}
            }
        }
    })
}
