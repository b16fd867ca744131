use crate::data::model::{LaunchTable, PayloadRange, SiteCatalog};

// ---------------------------------------------------------------------------
// Process-wide read-only context
// ---------------------------------------------------------------------------

/// The loaded table and everything derived from it at startup.
/// Built once, shared behind an `Arc`, never mutated.
#[derive(Debug)]
pub struct DashboardContext {
    table: LaunchTable,
    catalog: SiteCatalog,
    bounds: PayloadRange,
}

impl DashboardContext {
    pub fn new(table: LaunchTable) -> Self {
        let catalog = SiteCatalog::from_table(&table);
        let bounds = table.payload_bounds();
        log::debug!("Site catalog: {:?}", catalog.sites());
        DashboardContext {
            table,
            catalog,
            bounds,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    /// Observed payload `[min, max]`; the slider bounds and default range.
    pub fn bounds(&self) -> PayloadRange {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_table;

    #[test]
    fn derives_catalog_and_bounds_once() {
        let ctx = DashboardContext::new(sample_table());
        assert_eq!(ctx.catalog().sites().to_vec(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ctx.bounds(), PayloadRange::new(500.0, 9000.0));
        assert_eq!(ctx.table().len(), 4);
    }
}
