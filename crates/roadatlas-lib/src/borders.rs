//! Border adjacency ingestion.
//!
//! The border source is line-oriented free text, one country per line:
//! `Country = Neighbour1 d1 km; Neighbour2 d2 km; ...`. The embedded
//! distances are ingestion noise; authoritative edge weights always come
//! from the capital distance table, so every numeric/unit token is stripped
//! here and only the neighbour names survive.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identity::strip_numeric_noise;

/// Mapping from a raw country name to its deduplicated raw neighbour names.
///
/// Ordered maps keep iteration deterministic so reconciliation downstream
/// does not depend on source line order.
pub type BorderMap = BTreeMap<String, BTreeSet<String>>;

/// Parse a border adjacency file.
///
/// Malformed lines (a field count other than two around `=`) are skipped
/// silently; only failing to read the file at all is fatal.
pub fn load_borders(path: &Path) -> Result<BorderMap> {
    let file = File::open(path).map_err(|source| Error::BorderSource {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut borders = BorderMap::new();
    let mut skipped_lines = 0usize;
    for line in reader.lines() {
        let line = line.map_err(|source| Error::BorderSource {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_border_line(&line) {
            Some((country, neighbours)) => {
                borders.entry(country).or_default().extend(neighbours);
            }
            None => skipped_lines += 1,
        }
    }

    if skipped_lines > 0 {
        warn!(skipped_lines, "ignored malformed border lines");
    }
    debug!(countries = borders.len(), "border adjacency loaded");
    Ok(borders)
}

fn parse_border_line(line: &str) -> Option<(String, BTreeSet<String>)> {
    let fields: Vec<&str> = line.split('=').collect();
    if fields.len() != 2 {
        return None;
    }
    let country = fields[0].trim();
    if country.is_empty() {
        return None;
    }

    let mut neighbours = BTreeSet::new();
    for segment in fields[1].split(';') {
        let name = strip_numeric_noise(segment);
        if !name.is_empty() {
            neighbours.insert(name);
        }
    }
    Some((country.to_string(), neighbours))
}
