use super::model::{LaunchRecord, LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Record predicates
// ---------------------------------------------------------------------------

/// A record passes when its site matches `site` (always, for ALL) and its
/// payload lies in `range`, both ends inclusive.
pub fn matches(record: &LaunchRecord, site: &SiteSelection, range: &PayloadRange) -> bool {
    site.matches(&record.launch_site) && range.contains(record.payload_mass_kg)
}

/// Indices into `table.records()` of the records passing [`matches`], in
/// table order.
pub fn filtered_indices(
    table: &LaunchTable,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, site, range))
        .map(|(i, _)| i)
        .collect()
}

/// Records of `table` passing the site filter only.
pub fn by_site<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table
        .records()
        .iter()
        .filter(move |r| site.matches(&r.launch_site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_table;

    fn passing(table: &LaunchTable, site: &SiteSelection, range: &PayloadRange) -> Vec<f64> {
        filtered_indices(table, site, range)
            .into_iter()
            .map(|i| table.records()[i].payload_mass_kg)
            .collect()
    }

    #[test]
    fn payload_filter_is_inclusive_at_both_ends() {
        let table = sample_table();
        let range = PayloadRange::new(500.0, 4000.0);
        assert_eq!(
            passing(&table, &SiteSelection::All, &range),
            vec![500.0, 2500.0, 4000.0]
        );
    }

    #[test]
    fn site_and_range_are_intersected() {
        let table = sample_table();
        let range = PayloadRange::new(0.0, 5000.0);
        let site = SiteSelection::Site("A".into());
        assert_eq!(passing(&table, &site, &range), vec![500.0, 2500.0]);
    }

    #[test]
    fn indices_keep_table_order() {
        let table = sample_table();
        let range = PayloadRange::new(2000.0, 9000.0);
        assert_eq!(filtered_indices(&table, &SiteSelection::All, &range), vec![1, 2, 3]);
        let site = SiteSelection::Site("B".into());
        assert_eq!(filtered_indices(&table, &site, &range), vec![2]);
        let empty = PayloadRange::new(600.0, 700.0);
        assert!(filtered_indices(&table, &SiteSelection::All, &empty).is_empty());
    }

    #[test]
    fn by_site_ignores_payload() {
        let table = sample_table();
        let site = SiteSelection::Site("A".into());
        assert_eq!(by_site(&table, &site).count(), 3);
        assert_eq!(by_site(&table, &SiteSelection::All).count(), 4);
    }
}
