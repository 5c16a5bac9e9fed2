//! Country identity resolution.
//!
//! The state identity table records one row per historical naming epoch of
//! each state. Only rows whose end date equals the dataset's "still exists"
//! sentinel survive into the canonical set; everything that merged, split,
//! or ceased to exist before the reference date is excluded entirely.
//!
//! The border and distance sources chose their own English renderings for
//! many of those states, so resolution runs a fixed pipeline: a
//! case-insensitive exact match against canonical names, then a fixed alias
//! table, then a retry of both after stripping the numeric/unit noise the
//! border source embeds next to neighbour names.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// The identity dataset's sentinel end date meaning "still exists".
pub static DEFAULT_REFERENCE_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2020, 12, 31).expect("sentinel date is valid"));

/// Minimum Jaro-Winkler similarity before a canonical name is offered as a
/// suggestion for an unresolvable input.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Variant spellings used by the border and distance sources, mapped to the
/// canonical full names used by the identity table. This table is a fixed
/// lookup, not inferred from the data.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Bahamas, The", "Bahamas"),
    ("Belarus", "Belarus (Byelorussia)"),
    ("Bosnia and Herzegovina", "Bosnia-Herzegovina"),
    ("Burkina", "Burkina Faso (Upper Volta)"),
    ("Burkina Faso", "Burkina Faso (Upper Volta)"),
    ("Burma", "Myanmar (Burma)"),
    ("Cabo Verde", "Cape Verde"),
    ("Cambodia", "Cambodia (Kampuchea)"),
    ("Congo, Democratic Republic of the", "Congo, Democratic Republic of (Zaire)"),
    ("Congo, Republic of the", "Congo"),
    ("Czechia", "Czech Republic"),
    ("Democratic Republic of the Congo", "Congo, Democratic Republic of (Zaire)"),
    ("Eswatini", "Swaziland"),
    ("Gambia, The", "Gambia"),
    ("Germany", "German Federal Republic"),
    ("Iran", "Iran (Persia)"),
    ("Italy", "Italy/Sardinia"),
    ("Korea, North", "Korea, People's Republic of"),
    ("Korea, South", "Korea, Republic of"),
    ("Kyrgyzstan", "Kyrgyz Republic"),
    ("Macedonia", "Macedonia (Former Yugoslav Republic of)"),
    ("North Korea", "Korea, People's Republic of"),
    ("North Macedonia", "Macedonia (Former Yugoslav Republic of)"),
    ("Russia", "Russia (Soviet Union)"),
    ("South Korea", "Korea, Republic of"),
    ("Sri Lanka", "Sri Lanka (Ceylon)"),
    ("Surinam", "Suriname"),
    ("Tanzania", "Tanzania/Tanganyika"),
    ("The Gambia", "Gambia"),
    ("Timor-Leste", "East Timor"),
    ("Turkey", "Turkey (Ottoman Empire)"),
    ("UK", "United Kingdom"),
    ("United States", "United States of America"),
    ("Vietnam", "Vietnam, Democratic Republic of"),
    ("Yemen", "Yemen (Arab Republic of Yemen)"),
    ("Zimbabwe", "Zimbabwe (Rhodesia)"),
];

/// A canonical country identity: one full name plus one short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Canonical full name as spelled by the identity table.
    pub name: String,
    /// Short state code, stored upper-case.
    pub code: String,
}

/// Fixed mapping from non-canonical country spellings to canonical names.
///
/// The constructor rejects duplicate alias keys instead of letting a later
/// entry silently overwrite an earlier one; a contradictory table is a bug
/// in the table, not something to guess around.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Build a table from `(alias, canonical)` pairs. Alias keys are matched
    /// case-insensitively and must be unique.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Result<Self> {
        let mut map = HashMap::new();
        for &(alias, canonical) in entries {
            let key = alias.to_ascii_lowercase();
            if let Some(existing) = map.insert(key, canonical.to_string()) {
                return Err(Error::DuplicateAlias {
                    alias: alias.to_string(),
                    existing,
                });
            }
        }
        Ok(Self { map })
    }

    /// The built-in alias table covering the production datasets.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(BUILTIN_ALIASES)
    }

    /// Canonical name registered for an alias, if any.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Number of alias entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Canonical set of countries attested current at the reference date.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    countries: BTreeMap<String, Country>,
    by_lower_name: HashMap<String, String>,
    by_code: HashMap<String, String>,
    aliases: AliasTable,
}

impl CountryRegistry {
    /// Load the registry from a tab-separated identity table, keeping rows
    /// whose end date equals the default reference date.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_at(path, *DEFAULT_REFERENCE_DATE)
    }

    /// Load the registry with an explicit reference date sentinel.
    ///
    /// Rows with a field count other than five or an unparseable end date
    /// are skipped; only failing to read the file at all is fatal.
    pub fn from_path_at(path: &Path, reference_date: NaiveDate) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::IdentitySource {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut countries = Vec::new();
        let mut skipped_rows = 0usize;
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "skipping unreadable identity row");
                    skipped_rows += 1;
                    continue;
                }
            };
            if record.len() != 5 {
                skipped_rows += 1;
                continue;
            }
            let Ok(end) = NaiveDate::parse_from_str(&record[4], "%Y-%m-%d") else {
                skipped_rows += 1;
                continue;
            };
            if end != reference_date {
                continue;
            }
            countries.push(Country {
                name: record[2].to_string(),
                code: record[1].to_ascii_uppercase(),
            });
        }

        if skipped_rows > 0 {
            warn!(skipped_rows, "ignored malformed state identity rows");
        }

        let registry = Self::from_parts(countries, AliasTable::builtin()?);
        debug!(
            countries = registry.len(),
            %reference_date,
            "state identity table loaded"
        );
        Ok(registry)
    }

    /// Assemble a registry from already-parsed countries and an alias table.
    pub fn from_parts(countries: Vec<Country>, aliases: AliasTable) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_lower_name = HashMap::new();
        let mut by_code = HashMap::new();
        for country in countries {
            by_lower_name.insert(country.name.to_ascii_lowercase(), country.name.clone());
            by_code.insert(country.code.clone(), country.name.clone());
            by_name.insert(country.name.clone(), country);
        }
        Self {
            countries: by_name,
            by_lower_name,
            by_code,
            aliases,
        }
    }

    /// Resolve a raw name from any source dataset to a canonical country.
    ///
    /// This is the whole normalization pipeline in one place: (a)
    /// case-insensitive exact match, (b) alias table, (c) numeric/unit
    /// noise stripping followed by a retry of (a) and (b). Unresolvable
    /// names yield `None`; callers treat that as "no edge", never an error.
    pub fn resolve(&self, raw: &str) -> Option<&Country> {
        let trimmed = raw.trim();
        if let Some(country) = self.lookup_exact_or_alias(trimmed) {
            return Some(country);
        }
        let stripped = strip_numeric_noise(trimmed);
        if stripped != trimmed {
            return self.lookup_exact_or_alias(&stripped);
        }
        None
    }

    fn lookup_exact_or_alias(&self, name: &str) -> Option<&Country> {
        if let Some(canonical) = self.by_lower_name.get(&name.to_ascii_lowercase()) {
            return self.countries.get(canonical);
        }
        let canonical = self.aliases.canonical(name)?;
        self.countries.get(canonical)
    }

    /// Short code for a canonical or variant name, case-insensitive.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|country| country.code.as_str())
    }

    /// Canonical full name for a short code, case-insensitive.
    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(&code.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Whether the raw name resolves to a canonical country.
    pub fn contains_name(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Iterate the canonical countries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    /// Number of canonical countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Canonical names similar to `name`, best match first, for error
    /// suggestions. Exact and near-exact spellings score highest.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_ascii_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .countries
            .keys()
            .map(|candidate| {
                (
                    strsim::jaro_winkler(&needle, &candidate.to_ascii_lowercase()),
                    candidate.as_str(),
                )
            })
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(limit);
        scored
            .into_iter()
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Drop the numeric and unit tokens the border source embeds next to
/// neighbour names ("Iran 921 km" becomes "Iran"), preserving multi-word
/// names. Returns an empty string when nothing but noise remains.
pub fn strip_numeric_noise(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|token| !is_distance_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_distance_token(token: &str) -> bool {
    let token = token.to_ascii_lowercase();
    let token = token.trim_matches(|c: char| c == ',' || c == '.');
    let token = token.strip_suffix("km").unwrap_or(token);
    token.is_empty()
        || token
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}
