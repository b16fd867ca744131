use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::data::filter;
use crate::data::loader::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS};
use crate::data::model::{LaunchTable, Outcome, PayloadRange, SiteCatalog, SiteSelection};

// ---------------------------------------------------------------------------
// Chart specifications handed to the renderer
// ---------------------------------------------------------------------------

/// Output of an aggregator. Built fresh on every call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Column the slices are keyed by.
    pub names: &'static str,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_version_category: String,
    pub launch_site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Distinct booster categories among the plotted points, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.points
            .iter()
            .map(|p| p.booster_version_category.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pie aggregator
// ---------------------------------------------------------------------------

/// Success counts per site for ALL, or outcome counts for a single site.
///
/// For ALL every site gets a slice, in order of first appearance, even when
/// its success count is zero. For a single site only the outcomes that
/// actually occur there get a slice.
pub fn compute_pie_chart(table: &LaunchTable, site: &SiteSelection) -> ChartSpec {
    match site {
        SiteSelection::All => {
            let mut successes: HashMap<&str, usize> = HashMap::new();
            for record in table.records().iter().filter(|r| r.outcome.is_success()) {
                *successes.entry(record.launch_site.as_str()).or_default() += 1;
            }
            let slices = SiteCatalog::from_table(table)
                .sites()
                .iter()
                .map(|name| PieSlice {
                    label: name.clone(),
                    value: successes.get(name.as_str()).copied().unwrap_or(0),
                })
                .collect();
            ChartSpec::Pie(PieChart {
                title: "Total Success Launches by all sites".to_string(),
                names: COL_LAUNCH_SITE,
                slices,
            })
        }
        SiteSelection::Site(name) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for record in filter::by_site(table, site) {
                *counts.entry(record.outcome).or_default() += 1;
            }
            let slices = counts
                .into_iter()
                .map(|(outcome, value)| PieSlice {
                    label: outcome.to_string(),
                    value,
                })
                .collect();
            ChartSpec::Pie(PieChart {
                title: format!("Total Success Launches for site {name}"),
                names: COL_CLASS,
                slices,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter aggregator
// ---------------------------------------------------------------------------

/// Payload vs. outcome for records matching both `site` and `range`.
/// An empty match yields a chart with no points.
pub fn compute_scatter_chart(
    table: &LaunchTable,
    site: &SiteSelection,
    range: &PayloadRange,
) -> ChartSpec {
    let records = table.records();
    let points = filter::filtered_indices(table, site, range)
        .into_iter()
        .map(|i| &records[i])
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            class: r.outcome.class(),
            booster_version_category: r.booster_version_category.clone(),
            launch_site: r.launch_site.clone(),
        })
        .collect();

    let title = match site {
        SiteSelection::All => {
            "Correlation between Payload and Booster version for all sites".to_string()
        }
        SiteSelection::Site(name) => {
            format!("Correlation between Payload and Booster version for {name}")
        }
    };

    ChartSpec::Scatter(ScatterChart {
        title,
        x_label: COL_PAYLOAD_MASS,
        y_label: COL_CLASS,
        color_label: COL_BOOSTER_CATEGORY,
        points,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::tests::{record, sample_table};

    fn pie(spec: ChartSpec) -> PieChart {
        match spec {
            ChartSpec::Pie(p) => p,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    fn scatter(spec: ChartSpec) -> ScatterChart {
        match spec {
            ChartSpec::Scatter(s) => s,
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    pub(crate) fn slice_value(chart: &PieChart, label: &str) -> Option<usize> {
        chart.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn all_sites_pie_counts_successes_per_site() {
        let table = sample_table();
        let chart = pie(compute_pie_chart(&table, &SiteSelection::All));

        assert_eq!(chart.title, "Total Success Launches by all sites");
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(slice_value(&chart, "A"), Some(2));
        assert_eq!(slice_value(&chart, "B"), Some(0));
        assert_eq!(chart.total(), table.success_count());
    }

    #[test]
    fn all_sites_pie_follows_catalog_order() {
        let table = LaunchTable::from_records(vec![
            record("C", 100.0, false, "v1.0"),
            record("A", 200.0, true, "v1.1"),
            record("C", 300.0, false, "FT"),
            record("B", 400.0, true, "FT"),
            record("A", 500.0, true, "B4"),
        ])
        .unwrap();
        let chart = pie(compute_pie_chart(&table, &SiteSelection::All));

        let slices: Vec<(&str, usize)> = chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(slices, vec![("C", 0), ("A", 2), ("B", 1)]);
    }

    #[test]
    fn single_site_pie_splits_by_outcome() {
        let table = sample_table();
        let chart = pie(compute_pie_chart(&table, &site("A")));

        assert_eq!(chart.title, "Total Success Launches for site A");
        assert_eq!(slice_value(&chart, "Success"), Some(2));
        assert_eq!(slice_value(&chart, "Failure"), Some(1));
        assert_eq!(chart.total(), 3);
    }

    #[test]
    fn single_site_pie_omits_absent_outcomes() {
        let table = sample_table();
        let chart = pie(compute_pie_chart(&table, &site("B")));

        assert_eq!(chart.slices, vec![PieSlice { label: "Failure".into(), value: 1 }]);
    }

    #[test]
    fn scatter_over_full_range_includes_every_record() {
        let table = sample_table();
        let chart = scatter(compute_scatter_chart(
            &table,
            &SiteSelection::All,
            &PayloadRange::new(0.0, 10000.0),
        ));
        assert_eq!(chart.points.len(), table.len());
        assert_eq!(
            chart.title,
            "Correlation between Payload and Booster version for all sites"
        );
        assert_eq!(chart.x_label, "Payload Mass (kg)");
    }

    #[test]
    fn scatter_below_smallest_payload_is_empty() {
        let table = sample_table();
        let chart = scatter(compute_scatter_chart(
            &table,
            &SiteSelection::All,
            &PayloadRange::new(0.0, 400.0),
        ));
        assert!(chart.is_empty());
    }

    #[test]
    fn scatter_boundaries_are_inclusive() {
        let table = sample_table();
        let chart = scatter(compute_scatter_chart(
            &table,
            &SiteSelection::All,
            &PayloadRange::new(2500.0, 4000.0),
        ));
        let masses: Vec<f64> = chart.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(masses, vec![2500.0, 4000.0]);
    }

    #[test]
    fn site_scatter_is_subset_of_all_scatter() {
        let table = LaunchTable::from_records(vec![
            record("A", 100.0, true, "v1.0"),
            record("B", 200.0, false, "v1.1"),
            record("A", 300.0, false, "FT"),
            record("A", 900.0, true, "B4"),
        ])
        .unwrap();
        let range = PayloadRange::new(100.0, 300.0);

        let all = scatter(compute_scatter_chart(&table, &SiteSelection::All, &range));
        let only_a = scatter(compute_scatter_chart(&table, &site("A"), &range));

        assert_eq!(only_a.points.len(), 2);
        assert!(only_a.points.iter().all(|p| all.points.contains(p)));
        assert!(only_a.points.iter().all(|p| p.launch_site == "A"));
        assert_eq!(
            only_a.title,
            "Correlation between Payload and Booster version for A"
        );
        assert_eq!(
            only_a.categories().into_iter().collect::<Vec<_>>(),
            vec!["FT", "v1.0"]
        );
    }

    #[test]
    fn aggregators_are_idempotent() {
        let table = sample_table();
        let range = table.payload_bounds();
        assert_eq!(
            compute_pie_chart(&table, &site("A")),
            compute_pie_chart(&table, &site("A"))
        );
        assert_eq!(
            compute_scatter_chart(&table, &SiteSelection::All, &range),
            compute_scatter_chart(&table, &SiteSelection::All, &range)
        );
    }

    #[test]
    fn chart_spec_serializes_with_type_tag() {
        let table = sample_table();
        let json = serde_json::to_value(compute_pie_chart(&table, &SiteSelection::All)).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["slices"][0]["label"], "A");
        assert_eq!(json["slices"][0]["value"], 2);
    }
}
