// src/analysis/reader.rs

use std::io;
use std::path::{Path, PathBuf};

use crate::analysis::record::SalesRecord;
use crate::error::ConveyorError;

/// Loads sales transactions from a CSV file.
pub struct SalesReader {
    path: PathBuf,
}

impl SalesReader {
    /// Binds the reader to `path`. Fails right away when the file does
    /// not exist, so the caller gets the error before any analysis
    /// starts rather than in the middle of it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConveyorError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConveyorError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("CSV file not found: {}", path.display()),
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record into memory. The analyses are all whole-file
    /// aggregations, so streaming buys nothing here.
    pub fn read_all(&self) -> Result<Vec<SalesRecord>, ConveyorError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,Product,Category,Region,Customer_Type,Quantity,Unit_Price,Total_Revenue
2024-01-15,Laptop Pro,Electronics,North,Business,3,1200.00,3600.00
2024-02-03,Desk Chair,Furniture,South,Consumer,10,150.00,1500.00
";

    #[test]
    fn missing_file_is_rejected_up_front() {
        let result = SalesReader::from_path("/no/such/sales.csv");
        assert!(matches!(result, Err(ConveyorError::Io(_))));
    }

    #[test]
    fn reads_all_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let reader = SalesReader::from_path(file.path()).unwrap();
        let records = reader.read_all().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product, "Laptop Pro");
        assert_eq!(records[0].quantity, 3);
        assert_eq!(records[1].total_revenue, 1500.00);
        assert_eq!(records[1].customer_type, "Consumer");
    }
}
