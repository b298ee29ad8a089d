// src/io/report.rs

use std::path::Path;

use crate::analysis::SalesRecord;
use crate::error::ConveyorError;
use crate::sim::WorkerRecord;

/// Writes the per-worker run log to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g. "run_log.csv").
/// * `data` - The worker rows from the run report.
pub fn write_run_log(file_path: impl AsRef<Path>, data: &[WorkerRecord]) -> Result<(), ConveyorError> {
    let file_path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(file_path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path.display()
    );
    Ok(())
}

/// Writes a sales data set to a CSV file with the analysis header.
pub fn write_sales_data(
    file_path: impl AsRef<Path>,
    data: &[SalesRecord],
) -> Result<(), ConveyorError> {
    let mut wtr = csv::Writer::from_path(file_path.as_ref())?;

    for record in data {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SalesReader;
    use crate::io::generate::generate_sales_data;

    #[test]
    fn run_log_has_one_row_per_worker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_log.csv");

        let rows = vec![
            WorkerRecord {
                worker: "Producer-P1".to_string(),
                role: "producer".to_string(),
                items_moved: 20,
            },
            WorkerRecord {
                worker: "Consumer-C1".to_string(),
                role: "consumer".to_string(),
                items_moved: 20,
            },
        ];
        write_run_log(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("worker,role,items_moved"));
        assert_eq!(lines.next(), Some("Producer-P1,producer,20"));
        assert_eq!(lines.next(), Some("Consumer-C1,consumer,20"));
    }

    #[test]
    fn sales_data_round_trips_through_the_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales_data.csv");

        let generated = generate_sales_data(25);
        write_sales_data(&path, &generated).unwrap();

        let read_back = SalesReader::from_path(&path).unwrap().read_all().unwrap();
        assert_eq!(read_back, generated);
    }
}
