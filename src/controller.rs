use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::aggregate::{ChartSpec, compute_pie_chart, compute_scatter_chart};
use crate::binding::{BindingError, BindingRegistry, Region, Update};
use crate::context::DashboardContext;
use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{Field, InputValue, SelectionState};

// ---------------------------------------------------------------------------
// Standard dashboard bindings
// ---------------------------------------------------------------------------

/// Binding A: site → pie.  Binding B: site + payload range → scatter.
pub fn dashboard_bindings() -> BindingRegistry {
    let mut registry = BindingRegistry::new();

    registry.register(&[Field::Site], Region::Pie, |ctx, inputs| match inputs {
        [InputValue::Site(site)] => Ok(compute_pie_chart(ctx.table(), site)),
        other => Err(BindingError::UnexpectedInputs(other.to_vec())),
    });

    registry.register(
        &[Field::Site, Field::PayloadRange],
        Region::Scatter,
        |ctx, inputs| match inputs {
            [InputValue::Site(site), InputValue::PayloadRange(range)] => {
                Ok(compute_scatter_chart(ctx.table(), site, range))
            }
            other => Err(BindingError::UnexpectedInputs(other.to_vec())),
        },
    );

    registry
}

// ---------------------------------------------------------------------------
// View controller
// ---------------------------------------------------------------------------

/// Owns the selection and the current content of each chart region.
pub struct ViewController {
    ctx: Arc<DashboardContext>,
    selection: SelectionState,
    registry: BindingRegistry,
    regions: BTreeMap<Region, ChartSpec>,
}

impl ViewController {
    pub fn new(ctx: Arc<DashboardContext>) -> Self {
        Self::with_registry(ctx, dashboard_bindings())
    }

    pub fn with_registry(ctx: Arc<DashboardContext>, registry: BindingRegistry) -> Self {
        let selection = SelectionState::new(&ctx);
        Self {
            ctx,
            selection,
            registry,
            regions: BTreeMap::new(),
        }
    }

    /// Fill every region from the default selection.
    pub fn mount(&mut self) {
        let updates = self.registry.fire_all(&self.ctx, &self.selection);
        self.apply(updates);
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        if let Some(field) = self.selection.set_site(&self.ctx, site) {
            self.changed(field);
        }
    }

    pub fn select_payload_range(&mut self, range: PayloadRange) {
        if let Some(field) = self.selection.set_payload_range(&self.ctx, range) {
            self.changed(field);
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.ctx
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn region(&self, region: Region) -> Option<&ChartSpec> {
        self.regions.get(&region)
    }

    /// Current selection and chart contents, for JSON export.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            site: self.selection.site().to_string(),
            payload_range: self.selection.payload_range(),
            pie: self.region(Region::Pie),
            scatter: self.region(Region::Scatter),
        }
    }

    /// Write [`Self::snapshot`] as pretty JSON.
    pub fn export_json(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &self.snapshot()).context("writing chart JSON")?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }

    fn changed(&mut self, field: Field) {
        let updates = self.registry.fire(&[field], &self.ctx, &self.selection);
        self.apply(updates);
    }

    fn apply(&mut self, updates: Vec<Update>) {
        for update in updates {
            match update.result {
                Ok(spec) => {
                    log::debug!("{:?} now shows '{}'", update.region, spec.title());
                    self.regions.insert(update.region, spec);
                }
                Err(e) => log::error!("Keeping previous {:?} chart: {e}", update.region),
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub site: String,
    pub payload_range: PayloadRange,
    pub pie: Option<&'a ChartSpec>,
    pub scatter: Option<&'a ChartSpec>,
}
