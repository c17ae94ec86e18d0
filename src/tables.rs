//! Cursor pagination over a warehouse's tables.
//!
//! [`TablePages`] fetches one page per `next()` call, following the
//! `endCursor` of the previous page until the API reports no further page.
//! [`build_table_map`] drains it into a case-insensitive [`TableMap`].

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::{debug, info};
use uuid::Uuid;

use crate::{
    client::{CatalogClient, Transport},
    graphql::{TABLES_QUERY, TablesData, TablesVariables},
};

pub const DEFAULT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    pub full_table_id: String,
    pub mcon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    pub tables: Vec<TableRecord>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

pub struct TablePages<'a, T> {
    client: &'a CatalogClient<T>,
    warehouse: Uuid,
    page_size: u32,
    cursor: Option<String>,
    finished: bool,
}

impl<'a, T: Transport> TablePages<'a, T> {
    pub fn new(client: &'a CatalogClient<T>, warehouse: Uuid, page_size: u32) -> Self {
        Self {
            client,
            warehouse,
            page_size,
            cursor: None,
            finished: false,
        }
    }

    fn fetch(&self) -> Result<TablePage> {
        let variables = TablesVariables {
            dw_id: self.warehouse,
            first: self.page_size,
            after: self.cursor.as_deref(),
            is_deleted: true,
        };
        let data: TablesData = self.client.query(TABLES_QUERY, variables)?;
        let connection = data.get_tables;
        let tables = connection
            .edges
            .into_iter()
            .map(|edge| TableRecord {
                full_table_id: edge.node.full_table_id,
                mcon: edge.node.mcon.unwrap_or_default(),
            })
            .collect();
        Ok(TablePage {
            tables,
            end_cursor: connection.page_info.end_cursor,
            has_next_page: connection.page_info.has_next_page,
        })
    }
}

impl<T: Transport> Iterator for TablePages<'_, T> {
    type Item = Result<TablePage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.fetch() {
            Ok(page) => {
                match (&page.end_cursor, page.has_next_page) {
                    (Some(cursor), true) => self.cursor = Some(cursor.clone()),
                    _ => self.finished = true,
                }
                Some(Ok(page))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Lowercased `full_table_id` to mcon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMap {
    entries: HashMap<String, String>,
}

impl TableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same identifier replace earlier ones.
    pub fn insert(&mut self, full_table_id: &str, mcon: String) {
        self.entries.insert(full_table_id.to_lowercase(), mcon);
    }

    pub fn lookup(&self, full_table_id: &str) -> Option<&str> {
        self.entries
            .get(&full_table_id.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TableRecord> for TableMap {
    fn from_iter<I: IntoIterator<Item = TableRecord>>(iter: I) -> Self {
        let mut map = TableMap::new();
        for record in iter {
            map.insert(&record.full_table_id, record.mcon);
        }
        map
    }
}

pub fn build_table_map<T: Transport>(
    client: &CatalogClient<T>,
    warehouse: Uuid,
    page_size: u32,
) -> Result<TableMap> {
    let mut map = TableMap::new();
    let mut pages = 0usize;
    for page in TablePages::new(client, warehouse, page_size) {
        let page = page.with_context(|| format!("Fetching table page {}", pages + 1))?;
        pages += 1;
        debug!("Page {pages}: {} table(s)", page.tables.len());
        for record in page.tables {
            map.insert(&record.full_table_id, record.mcon);
        }
    }
    info!(
        "Loaded {} table(s) from warehouse {warehouse} across {pages} page(s)",
        map.len()
    );
    Ok(map)
}
