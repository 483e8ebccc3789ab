//! Table manager for spawning and managing multiple table actors.

use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    actor::{TableActor, TableHandle},
    config::TableConfig,
    errors::TableError,
    messages::{TableId, TableSnapshot},
};
use crate::game::{Phase, entities::Chips};

/// Table metadata for discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    pub id: TableId,
    pub name: String,
    pub seat_count: usize,
    pub max_seats: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub phase: Phase,
    pub is_started: bool,
}

impl From<TableSnapshot> for TableMetadata {
    fn from(snapshot: TableSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            seat_count: snapshot.state.seats.len(),
            max_seats: snapshot.max_seats,
            small_blind: snapshot.state.blinds.small.amount,
            big_blind: snapshot.state.blinds.big.amount,
            phase: snapshot.state.phase,
            is_started: snapshot.state.is_started,
        }
    }
}

/// Table manager for managing multiple table instances
pub struct TableManager {
    /// Active table handles
    tables: Arc<RwLock<HashMap<TableId, TableHandle>>>,

    /// Next table ID
    next_table_id: Arc<RwLock<TableId>>,

    /// Maximum number of concurrently open tables
    max_tables: usize,
}

impl TableManager {
    /// Create a new table manager that allows up to `max_tables` open tables
    pub fn new(max_tables: usize) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            next_table_id: Arc::new(RwLock::new(1)),
            max_tables,
        }
    }

    /// Create and spawn a new table
    ///
    /// # Returns
    ///
    /// * `Result<TableId, TableError>` - ID of the new table
    pub async fn create_table(&self, config: TableConfig) -> Result<TableId, TableError> {
        config.validate()?;

        let mut tables = self.tables.write().await;
        if tables.len() >= self.max_tables {
            return Err(TableError::LimitReached(self.max_tables));
        }

        let table_id = {
            let mut next_id = self.next_table_id.write().await;
            let id = *next_id;
            *next_id += 1;
            id
        };

        let name = config.name.clone();
        let (actor, handle) = TableActor::new(table_id, config);
        tokio::spawn(actor.run());
        tables.insert(table_id, handle);
        drop(tables);

        log::info!("Created and spawned table {} '{}'", table_id, name);
        Ok(table_id)
    }

    /// Get a table handle by ID
    pub async fn get_table(&self, table_id: TableId) -> Option<TableHandle> {
        let tables = self.tables.read().await;
        tables.get(&table_id).cloned()
    }

    /// List all open tables, ordered by ID
    ///
    /// Tables that close while being queried are skipped.
    pub async fn list_tables(&self) -> Vec<TableMetadata> {
        let handles: Vec<TableHandle> = self.tables.read().await.values().cloned().collect();

        let mut metadata_list = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.snapshot().await {
                Ok(snapshot) => metadata_list.push(snapshot.into()),
                Err(e) => log::debug!("Skipping table {}: {}", handle.table_id(), e),
            }
        }
        metadata_list.sort_by_key(|metadata: &TableMetadata| metadata.id);
        metadata_list
    }

    /// Close a table
    pub async fn close_table(&self, table_id: TableId) -> Result<(), TableError> {
        let handle = self
            .tables
            .write()
            .await
            .remove(&table_id)
            .ok_or(TableError::NotFound(table_id))?;

        // Already gone is as good as closed.
        if let Err(e) = handle.close().await {
            log::debug!("Table {} was already stopped: {}", table_id, e);
        }

        log::info!("Closed table {}", table_id);
        Ok(())
    }

    /// Close every open table
    pub async fn close_all(&self) {
        let ids: Vec<TableId> = self.tables.read().await.keys().copied().collect();
        for table_id in ids {
            if let Err(e) = self.close_table(table_id).await {
                log::warn!("Failed to close table {}: {}", table_id, e);
            }
        }
    }

    /// Get active table count
    pub async fn active_table_count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tables_get_sequential_ids() {
        let manager = TableManager::new(4);
        let first = manager.create_table(TableConfig::default()).await.unwrap();
        let second = manager.create_table(TableConfig::default()).await.unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(manager.active_table_count().await, 2);
    }

    #[tokio::test]
    async fn invalid_config_is_refused() {
        let manager = TableManager::new(4);
        let config = TableConfig {
            big_blind: 10,
            ..TableConfig::default()
        };
        assert!(matches!(
            manager.create_table(config).await,
            Err(TableError::InvalidConfig(_))
        ));
        assert_eq!(manager.active_table_count().await, 0);
    }

    #[tokio::test]
    async fn table_limit_is_enforced() {
        let manager = TableManager::new(1);
        manager.create_table(TableConfig::default()).await.unwrap();
        assert_eq!(
            manager.create_table(TableConfig::default()).await,
            Err(TableError::LimitReached(1))
        );
    }

    #[tokio::test]
    async fn listing_reports_each_table() {
        let manager = TableManager::new(4);
        let config = TableConfig {
            name: "High Stakes".to_string(),
            small_blind: 500,
            big_blind: 1000,
            ..TableConfig::default()
        };
        let id = manager.create_table(config).await.unwrap();
        let tables = manager.list_tables().await;
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].id, id);
        assert_eq!(tables[0].name, "High Stakes");
        assert_eq!(tables[0].big_blind, 1000);
        assert_eq!(tables[0].seat_count, 0);
        assert_eq!(tables[0].phase, Phase::WaitingForPlayers);
    }

    #[tokio::test]
    async fn closed_tables_disappear() {
        let manager = TableManager::new(4);
        let id = manager.create_table(TableConfig::default()).await.unwrap();
        manager.close_table(id).await.unwrap();
        assert!(manager.get_table(id).await.is_none());
        assert_eq!(
            manager.close_table(id).await,
            Err(TableError::NotFound(id))
        );
    }
}
