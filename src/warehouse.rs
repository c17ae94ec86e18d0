use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

use crate::{
    client::{CatalogClient, Transport},
    error::ImportError,
    graphql::{WAREHOUSES_QUERY, WarehousesData},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub uuid: Uuid,
    pub name: String,
    pub connection_type: String,
}

pub fn list_warehouses<T: Transport>(client: &CatalogClient<T>) -> Result<Vec<Warehouse>> {
    let data: WarehousesData = client
        .query(WAREHOUSES_QUERY, serde_json::json!({}))
        .context("Listing warehouses")?;
    Ok(data
        .get_user
        .account
        .warehouses
        .into_iter()
        .map(|node| Warehouse {
            uuid: node.uuid,
            name: node.name.unwrap_or_default(),
            connection_type: node.connection_type.unwrap_or_default(),
        })
        .collect())
}

/// Returns `explicit` untouched, otherwise the account's only warehouse.
pub fn resolve_warehouse<T: Transport>(
    client: &CatalogClient<T>,
    explicit: Option<Uuid>,
) -> Result<Uuid> {
    if let Some(uuid) = explicit {
        return Ok(uuid);
    }
    let mut warehouses = list_warehouses(client)?;
    match warehouses.len() {
        0 => Err(ImportError::NoWarehouses.into()),
        1 => {
            let warehouse = warehouses.remove(0);
            info!(
                "Using warehouse '{}' ({}) {}",
                warehouse.name, warehouse.connection_type, warehouse.uuid
            );
            Ok(warehouse.uuid)
        }
        _ => Err(ImportError::AmbiguousWarehouse(warehouses).into()),
    }
}
