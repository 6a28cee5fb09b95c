use super::text::{TableIoError, TextTable};
use super::traits::{TableFormat, TableSink};
use crate::core::models::table::DistributionTable;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("Failed to write '{}': {}", .path.display(), .source)]
pub struct DestinationError {
    pub path: PathBuf,
    #[source]
    pub source: TableIoError,
}

/// Writes each model's table to `<dir>/<model>_momentum_distribution.txt`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, model: &str) -> PathBuf {
        self.dir.join(format!("{model}_momentum_distribution.txt"))
    }
}

impl TableSink for DirectorySink {
    type Error = DestinationError;

    fn write_table(&mut self, model: &str, table: &DistributionTable) -> Result<(), Self::Error> {
        let path = self.path_for(model);
        std::fs::create_dir_all(&self.dir).map_err(|e| DestinationError {
            path: self.dir.clone(),
            source: e.into(),
        })?;
        TextTable::write_to_path(table, &path).map_err(|source| DestinationError {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} rows to {:?}", table.len(), path);
        Ok(())
    }
}

/// Collects tables in memory, in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tables: Vec<(String, DistributionTable)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[(String, DistributionTable)] {
        &self.tables
    }

    pub fn get(&self, model: &str) -> Option<&DistributionTable> {
        self.tables
            .iter()
            .find(|(name, _)| name == model)
            .map(|(_, table)| table)
    }

    pub fn into_tables(self) -> Vec<(String, DistributionTable)> {
        self.tables
    }
}

impl TableSink for MemorySink {
    type Error = Infallible;

    fn write_table(&mut self, model: &str, table: &DistributionTable) -> Result<(), Self::Error> {
        self.tables.push((model.to_string(), table.clone()));
        Ok(())
    }
}
