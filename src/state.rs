use crate::context::DashboardContext;
use crate::data::model::{PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Watched fields and their values
// ---------------------------------------------------------------------------

/// A piece of live UI state that bindings can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Site,
    PayloadRange,
}

/// Current value of one [`Field`], as handed to a binding handler.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Site(SiteSelection),
    PayloadRange(PayloadRange),
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// The two user-controlled inputs: selected site and payload range.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    site: SiteSelection,
    payload_range: PayloadRange,
}

impl SelectionState {
    /// Defaults: ALL sites, full observed payload range.
    pub fn new(ctx: &DashboardContext) -> Self {
        Self {
            site: SiteSelection::All,
            payload_range: ctx.bounds(),
        }
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn value_of(&self, field: Field) -> InputValue {
        match field {
            Field::Site => InputValue::Site(self.site.clone()),
            Field::PayloadRange => InputValue::PayloadRange(self.payload_range),
        }
    }

    /// Returns the changed field, or `None` when nothing changed.
    /// Sites outside the catalog are refused.
    pub fn set_site(&mut self, ctx: &DashboardContext, site: SiteSelection) -> Option<Field> {
        if !ctx.catalog().contains(&site) {
            log::error!("Ignoring selection of unknown launch site '{site}'");
            return None;
        }
        if self.site == site {
            return None;
        }
        self.site = site;
        Some(Field::Site)
    }

    /// Returns the changed field, or `None` when nothing changed.
    /// The range is clamped to the dataset's payload bounds.
    pub fn set_payload_range(
        &mut self,
        ctx: &DashboardContext,
        range: PayloadRange,
    ) -> Option<Field> {
        let range = range.clamp_to(&ctx.bounds());
        if self.payload_range == range {
            return None;
        }
        self.payload_range = range;
        Some(Field::PayloadRange)
    }
}

// ---------------------------------------------------------------------------
// Widget-local state
// ---------------------------------------------------------------------------

/// UI state that never reaches the bindings directly.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Search text typed into the site dropdown.
    pub site_search: String,
    /// Slider position while dragging; committed on release.
    pub draft_range: PayloadRange,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl UiState {
    pub fn new(selection: &SelectionState) -> Self {
        Self {
            site_search: String::new(),
            draft_range: selection.payload_range(),
            status_message: None,
        }
    }
}
