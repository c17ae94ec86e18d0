//! GraphQL documents and wire types for the catalog API.
//!
//! Request bodies serialize as `{"query": ..., "variables": ...}`. Responses
//! arrive in the standard envelope with optional `data` and `errors`; the
//! payload types below mirror the camelCase field names the API returns.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

pub const WAREHOUSES_QUERY: &str = "\
query getWarehouses {
  getUser {
    account {
      warehouses {
        name
        connectionType
        uuid
      }
    }
  }
}";

pub const TABLES_QUERY: &str = "\
query getTables($dwId: UUID, $first: Int, $after: String, $isDeleted: Boolean) {
  getTables(dwId: $dwId, first: $first, after: $after, isDeleted: $isDeleted) {
    edges {
      node {
        fullTableId
        mcon
      }
    }
    pageInfo {
      endCursor
      hasNextPage
    }
  }
}";

pub const UPDATE_DESCRIPTION_MUTATION: &str = "\
mutation createOrUpdateCatalogObjectMetadata($mcon: String!, $description: String!) {
  createOrUpdateCatalogObjectMetadata(mcon: $mcon, description: $description) {
    catalogObjectMetadata {
      mcon
    }
  }
}";

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

impl<'a, V: Serialize> GraphqlRequest<'a, V> {
    pub fn new(query: &'a str, variables: V) -> Self {
        Self { query, variables }
    }

    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateDescriptionVariables<'a> {
    pub mcon: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TablesVariables<'a> {
    pub dw_id: Uuid,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlEnvelope<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<JsonValue>>,
}

impl GraphqlError {
    pub fn describe(&self) -> String {
        match &self.path {
            Some(path) if !path.is_empty() => {
                let joined = path
                    .iter()
                    .map(|segment| match segment {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                format!("{} (at {joined})", self.message)
            }
            _ => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehousesData {
    pub get_user: UserNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNode {
    pub account: AccountNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountNode {
    #[serde(default)]
    pub warehouses: Vec<WarehouseNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseNode {
    pub uuid: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connection_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesData {
    pub get_tables: TableConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConnection {
    #[serde(default)]
    pub edges: Vec<TableEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableEdge {
    pub node: TableNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    pub full_table_id: String,
    #[serde(default)]
    pub mcon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}
