use crate::core::models::table::DistributionTable;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing distribution tables.
///
/// Implementors handle format-specific parsing and formatting; the provided methods add
/// file-path convenience on top.
pub trait TableFormat {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<DistributionTable, Self::Error>;

    /// Writes a table to a writer, one row per grid point.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(table: &DistributionTable, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<DistributionTable, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a table to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        table: &DistributionTable,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// A destination that accepts one finished table per model.
pub trait TableSink {
    type Error: Error + Send + Sync + 'static;

    fn write_table(&mut self, model: &str, table: &DistributionTable) -> Result<(), Self::Error>;
}
