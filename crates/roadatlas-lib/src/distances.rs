//! Capital-to-capital distance ingestion.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Symmetric capital distance table keyed by upper-cased state codes.
///
/// Physical distance is direction-independent, so every well-formed row is
/// stored in both directions and lookups return the same value regardless
/// of argument order.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    distances: HashMap<String, HashMap<String, f64>>,
    pairs: usize,
}

impl DistanceTable {
    /// Parse a comma-separated distance table.
    ///
    /// The header row is discarded. Data rows must have exactly six fields:
    /// `rowid1,code1,rowid2,code2,km,mi`. Rows with any other field count
    /// or a non-numeric distance are skipped; only failing to read the file
    /// at all is fatal.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::DistanceSource {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut table = DistanceTable::default();
        let mut skipped_rows = 0usize;
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "skipping unreadable distance row");
                    skipped_rows += 1;
                    continue;
                }
            };
            if record.len() != 6 {
                skipped_rows += 1;
                continue;
            }
            let Ok(km) = record[4].parse::<f64>() else {
                skipped_rows += 1;
                continue;
            };
            if record[5].parse::<f64>().is_err() {
                skipped_rows += 1;
                continue;
            }
            table.insert(&record[1], &record[3], km);
        }

        if skipped_rows > 0 {
            warn!(skipped_rows, "ignored malformed capital distance rows");
        }
        debug!(pairs = table.len(), "capital distance table loaded");
        Ok(table)
    }

    /// Record a distance in both directions.
    pub fn insert(&mut self, code1: &str, code2: &str, km: f64) {
        let a = code1.to_ascii_uppercase();
        let b = code2.to_ascii_uppercase();
        self.distances.entry(a.clone()).or_default().insert(b.clone(), km);
        self.distances.entry(b).or_default().insert(a, km);
        self.pairs += 1;
    }

    /// Kilometre distance between two capitals, in either argument order.
    pub fn km(&self, code1: &str, code2: &str) -> Option<f64> {
        self.distances
            .get(&code1.to_ascii_uppercase())?
            .get(&code2.to_ascii_uppercase())
            .copied()
    }

    /// Distance rounded to the nearest kilometre.
    pub fn rounded_km(&self, code1: &str, code2: &str) -> Option<u32> {
        self.km(code1, code2).map(|km| km.round() as u32)
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }
}
