use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value used on the scatter y axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: i64) -> Result<Self, LoadError> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(LoadError::InvalidClass(other)),
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive [low, high] interval in kg
// ---------------------------------------------------------------------------

/// Inclusive payload interval with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the ends if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, mass: f64) -> bool {
        mass >= self.low && mass <= self.high
    }

    /// Restrict this range to lie inside `bounds`.
    pub fn clamp_to(&self, bounds: &PayloadRange) -> Self {
        let low = self.low.clamp(bounds.low, bounds.high);
        let high = self.high.clamp(bounds.low, bounds.high);
        PayloadRange::new(low, high)
    }
}

// ---------------------------------------------------------------------------
// SiteSelection – the dropdown value
// ---------------------------------------------------------------------------

/// Value of the site selector: the `ALL` sentinel or one catalog site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Label shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(name) => name,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "ALL"),
            SiteSelection::Site(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset plus the observed payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    bounds: PayloadRange,
}

impl LaunchTable {
    /// Build the table; an empty record list has no payload bounds and is rejected.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        let mut iter = records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next().ok_or(LoadError::Empty)?;
        let (min, max) = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Ok(LaunchTable {
            records,
            bounds: PayloadRange::new(min, max),
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Observed `[min, max]` of the payload column.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }
}

// ---------------------------------------------------------------------------
// SiteCatalog – distinct launch sites
// ---------------------------------------------------------------------------

/// Distinct `Launch Site` values, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCatalog {
    sites: Vec<String>,
}

impl SiteCatalog {
    pub fn from_table(table: &LaunchTable) -> Self {
        let mut seen = HashSet::new();
        let sites = table
            .records()
            .iter()
            .filter(|r| seen.insert(r.launch_site.as_str()))
            .map(|r| r.launch_site.clone())
            .collect();
        SiteCatalog { sites }
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Dropdown options: `ALL` first, then every site.
    pub fn options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(self.sites.iter().cloned().map(SiteSelection::Site))
            .collect()
    }

    /// Whether `selection` is a valid dropdown value.
    pub fn contains(&self, selection: &SiteSelection) -> bool {
        match selection {
            SiteSelection::All => true,
            SiteSelection::Site(name) => self.sites.iter().any(|s| s == name),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, mass: f64, success: bool, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome: if success { Outcome::Success } else { Outcome::Failure },
            booster_version_category: booster.to_string(),
        }
    }

    /// Sites A (2 successes, 1 failure) and B (1 failure).
    pub(crate) fn sample_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("A", 500.0, true, "v1.0"),
            record("A", 2500.0, false, "v1.1"),
            record("B", 4000.0, false, "FT"),
            record("A", 9000.0, true, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn bounds_span_observed_payloads() {
        let table = sample_table();
        assert_eq!(table.payload_bounds(), PayloadRange::new(500.0, 9000.0));
        assert_eq!(table.len(), 4);
        assert_eq!(table.success_count(), 2);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            LaunchTable::from_records(Vec::new()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn catalog_keeps_first_seen_order() {
        let catalog = SiteCatalog::from_table(&sample_table());
        assert_eq!(catalog.sites().to_vec(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            catalog.options(),
            vec![
                SiteSelection::All,
                SiteSelection::Site("A".into()),
                SiteSelection::Site("B".into()),
            ]
        );
        assert!(catalog.contains(&SiteSelection::All));
        assert!(!catalog.contains(&SiteSelection::Site("C".into())));
    }

    #[test]
    fn payload_range_is_inclusive_and_ordered() {
        let range = PayloadRange::new(10.0, 2.0);
        assert_eq!(range.low(), 2.0);
        assert_eq!(range.high(), 10.0);
        assert!(range.contains(2.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.5));

        let clamped = PayloadRange::new(-5.0, 50.0).clamp_to(&PayloadRange::new(0.0, 20.0));
        assert_eq!(clamped, PayloadRange::new(0.0, 20.0));
    }

    #[test]
    fn outcome_class_round_trips_only_for_binary_values() {
        assert_eq!(Outcome::from_class(1).unwrap(), Outcome::Success);
        assert_eq!(Outcome::from_class(0).unwrap().class(), 0);
        assert!(matches!(Outcome::from_class(2), Err(LoadError::InvalidClass(2))));
    }
}
