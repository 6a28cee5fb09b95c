use super::traits::TableFormat;
use crate::core::models::table::DistributionTable;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const HEADER: &str = "# p [fm^-1]\trho(p) [fm]";

#[derive(Debug, Error)]
pub enum TableIoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed table data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table row {row}: momentum {momentum} is not finite")]
    NonFiniteMomentum { row: usize, momentum: f64 },

    #[error("Table row {row}: momentum {momentum} does not increase over the previous row")]
    NotIncreasing { row: usize, momentum: f64 },
}

/// Tab-delimited text table: a `#` comment header followed by `momentum<TAB>density`
/// rows, floats written with round-trip precision.
///
/// Reading skips `#` comment lines and blank lines and trims whitespace around each
/// field. Momenta must be finite and strictly increasing.
pub struct TextTable;

impl TableFormat for TextTable {
    type Error = TableIoError;

    fn read_from(reader: &mut impl BufRead) -> Result<DistributionTable, Self::Error> {
        let mut momenta = Vec::new();
        let mut densities = Vec::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(false)
            .has_headers(false)
            .from_reader(reader);

        for (row, record) in csv_reader.deserialize::<(f64, f64)>().enumerate() {
            let (momentum, density) = record?;
            if !momentum.is_finite() {
                return Err(TableIoError::NonFiniteMomentum { row, momentum });
            }
            if momenta.last().is_some_and(|&prev| momentum <= prev) {
                return Err(TableIoError::NotIncreasing { row, momentum });
            }
            momenta.push(momentum);
            densities.push(density);
        }

        Ok(DistributionTable::from_columns(momenta, densities))
    }

    fn write_to(table: &DistributionTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{HEADER}")?;
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(&mut *writer);
        for point in table.iter() {
            csv_writer.serialize((point.momentum, point.density))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
