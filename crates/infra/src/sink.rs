use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use thiserror::Error;

use replen_restock::RestockRecommendation;

/// Column order of the persisted report.
pub const RECOMMENDATION_COLUMNS: [&str; 6] = [
    "sku",
    "avg_daily_sales",
    "current_inventory",
    "days_of_supply",
    "restock_needed_in_days",
    "recommendation",
];

/// What a sink did with a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Written { rows: usize, location: String },
    /// The plan was empty; nothing was written.
    NothingToWrite,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write recommendations to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode recommendations for {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Destination for an ordered recommendation list.
///
/// An empty list must not produce an artifact; sinks report
/// [`SinkOutcome::NothingToWrite`] instead.
pub trait RecommendationSink {
    fn persist(&self, recommendations: &[RestockRecommendation]) -> Result<SinkOutcome, SinkError>;
}

/// Writes recommendations as a comma-separated file with a header row.
///
/// The file is replaced atomically: rows go to a temporary file next to the
/// target, which is renamed over it only after a successful flush.
#[derive(Debug, Clone)]
pub struct CsvRecommendationSink {
    path: PathBuf,
}

impl CsvRecommendationSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> SinkError {
        SinkError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    /// Run `write` against a temporary file in the target directory and move
    /// it into place. On any error the temporary file is removed and an
    /// existing report at `path` is left as it was.
    fn write_atomically<F>(&self, write: F) -> Result<(), SinkError>
    where
        F: FnOnce(&mut csv::Writer<&mut File>) -> Result<(), SinkError>,
    {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            write(&mut writer)?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }

        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl RecommendationSink for CsvRecommendationSink {
    fn persist(&self, recommendations: &[RestockRecommendation]) -> Result<SinkOutcome, SinkError> {
        if recommendations.is_empty() {
            return Ok(SinkOutcome::NothingToWrite);
        }

        self.write_atomically(|writer| {
            writer
                .write_record(RECOMMENDATION_COLUMNS)
                .map_err(|e| self.csv_error(e))?;
            for rec in recommendations {
                writer.serialize(rec).map_err(|e| self.csv_error(e))?;
            }
            Ok(())
        })?;

        Ok(SinkOutcome::Written {
            rows: recommendations.len(),
            location: self.path.display().to_string(),
        })
    }
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationSink {
    inner: Mutex<Vec<RestockRecommendation>>,
}

impl InMemoryRecommendationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<RestockRecommendation> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecommendationSink for InMemoryRecommendationSink {
    fn persist(&self, recommendations: &[RestockRecommendation]) -> Result<SinkOutcome, SinkError> {
        if recommendations.is_empty() {
            return Ok(SinkOutcome::NothingToWrite);
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *inner = recommendations.to_vec();
        Ok(SinkOutcome::Written {
            rows: recommendations.len(),
            location: "memory".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replen_core::Sku;

    fn rec(sku: &str, avg: f64, inv: u64, dos: f64, needed: u32, remaining: u64) -> RestockRecommendation {
        RestockRecommendation {
            sku: Sku::parse(sku).unwrap(),
            avg_daily_sales: avg,
            current_inventory: inv,
            days_of_supply: dos,
            restock_needed_in_days: needed,
            recommendation: format!("Restock recommended. {remaining} days of supply remaining."),
        }
    }

    #[test]
    fn csv_sink_writes_header_and_rows_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recommendations").join("restock_recommendations.csv");
        let sink = CsvRecommendationSink::new(&path);

        let outcome = sink
            .persist(&[rec("SKU1", 7.5, 10, 1.33, 28, 1), rec("SKU9", 4.0, 0, 0.0, 30, 0)])
            .unwrap();
        assert_eq!(
            outcome,
            SinkOutcome::Written {
                rows: 2,
                location: path.display().to_string()
            }
        );

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "sku,avg_daily_sales,current_inventory,days_of_supply,restock_needed_in_days,recommendation\n\
             SKU1,7.5,10,1.33,28,Restock recommended. 1 days of supply remaining.\n\
             SKU9,4.0,0,0.0,30,Restock recommended. 0 days of supply remaining.\n"
        );
    }

    #[test]
    fn empty_plan_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink = CsvRecommendationSink::new(&path);

        assert_eq!(sink.persist(&[]).unwrap(), SinkOutcome::NothingToWrite);
        assert!(!path.exists());
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn csv_sink_replaces_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\n").unwrap();

        let sink = CsvRecommendationSink::new(&path);
        sink.persist(&[rec("SKU1", 7.5, 10, 1.33, 28, 1)]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("sku,avg_daily_sales,"));
        assert!(written.contains("SKU1,7.5,10,1.33,28,"));
        assert_eq!(entries(dir.path()), vec!["out.csv"]);
    }

    #[test]
    fn failed_write_keeps_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "previous\n").unwrap();

        let sink = CsvRecommendationSink::new(&path);
        let err = sink
            .write_atomically(|writer| {
                writer
                    .write_record(RECOMMENDATION_COLUMNS)
                    .map_err(|e| sink.csv_error(e))?;
                writer.flush().map_err(|e| sink.io_error(e))?;
                Err(sink.io_error(io::Error::other("disk full")))
            })
            .unwrap_err();

        assert!(matches!(err, SinkError::Io { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n");
        assert_eq!(entries(dir.path()), vec!["out.csv"]);
    }

    #[test]
    fn failed_rename_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the report should go cannot be replaced.
        let path = dir.path().join("out.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "keep").unwrap();

        let sink = CsvRecommendationSink::new(&path);
        let err = sink.persist(&[rec("SKU1", 7.5, 10, 1.33, 28, 1)]).unwrap_err();

        assert!(matches!(err, SinkError::Io { .. }));
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "keep");
        assert_eq!(entries(dir.path()), vec!["out.csv"]);
    }

    #[test]
    fn in_memory_sink_keeps_last_plan() {
        let sink = InMemoryRecommendationSink::new();
        sink.persist(&[rec("A", 1.0, 0, 0.0, 30, 0)]).unwrap();
        assert_eq!(sink.persist(&[]).unwrap(), SinkOutcome::NothingToWrite);
        assert_eq!(sink.all().len(), 1);
    }
}
