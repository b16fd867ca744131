use std::fmt;

use thiserror::Error;

use crate::aggregate::ChartSpec;
use crate::context::DashboardContext;
use crate::state::{Field, InputValue, SelectionState};

// ---------------------------------------------------------------------------
// Output regions
// ---------------------------------------------------------------------------

/// A chart area on the page whose content a binding replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Pie,
    Scatter,
}

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("handler received unexpected inputs: {0:?}")]
    UnexpectedInputs(Vec<InputValue>),
}

/// Computes a region's new content from the values of its watched fields,
/// passed in the order they were declared.
pub type Handler = Box<dyn Fn(&DashboardContext, &[InputValue]) -> Result<ChartSpec, BindingError>>;

struct Binding {
    watches: Vec<Field>,
    output: Region,
    handler: Handler,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("watches", &self.watches)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One handler invocation's outcome.
#[derive(Debug)]
pub struct Update {
    pub region: Region,
    pub result: Result<ChartSpec, BindingError>,
}

/// Maps sets of watched fields to the handler that recomputes one region.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, watches: &[Field], output: Region, handler: F)
    where
        F: Fn(&DashboardContext, &[InputValue]) -> Result<ChartSpec, BindingError> + 'static,
    {
        self.bindings.push(Binding {
            watches: watches.to_vec(),
            output,
            handler: Box::new(handler),
        });
    }

    /// Run every binding watching at least one of `changed`, in registration order.
    pub fn fire(
        &self,
        changed: &[Field],
        ctx: &DashboardContext,
        state: &SelectionState,
    ) -> Vec<Update> {
        self.bindings
            .iter()
            .filter(|b| b.watches.iter().any(|w| changed.contains(w)))
            .map(|b| run(b, ctx, state))
            .collect()
    }

    /// Run every binding; used to fill the regions on mount.
    pub fn fire_all(&self, ctx: &DashboardContext, state: &SelectionState) -> Vec<Update> {
        self.bindings.iter().map(|b| run(b, ctx, state)).collect()
    }
}

fn run(binding: &Binding, ctx: &DashboardContext, state: &SelectionState) -> Update {
    let inputs: Vec<InputValue> = binding.watches.iter().map(|&f| state.value_of(f)).collect();
    log::debug!("Recomputing {:?} from {:?}", binding.output, inputs);
    Update {
        region: binding.output,
        result: (binding.handler)(ctx, &inputs),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::aggregate::compute_pie_chart;
    use crate::data::model::tests::sample_table;
    use crate::data::model::{PayloadRange, SiteSelection};

    /// Registers a pie handler that records the inputs it was given.
    fn recording_registry(watches: &[Field]) -> (BindingRegistry, Rc<RefCell<Vec<Vec<InputValue>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut registry = BindingRegistry::new();
        registry.register(watches, Region::Pie, move |ctx, inputs| {
            sink.borrow_mut().push(inputs.to_vec());
            Ok(compute_pie_chart(ctx.table(), &SiteSelection::All))
        });
        (registry, seen)
    }

    #[test]
    fn handler_gets_exactly_its_declared_inputs_in_order() {
        let ctx = DashboardContext::new(sample_table());
        let state = SelectionState::new(&ctx);
        let (registry, seen) = recording_registry(&[Field::PayloadRange, Field::Site]);

        let updates = registry.fire_all(&ctx, &state);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].region, Region::Pie);
        assert_eq!(
            seen.borrow()[0],
            vec![
                InputValue::PayloadRange(PayloadRange::new(500.0, 9000.0)),
                InputValue::Site(SiteSelection::All),
            ]
        );
    }

    #[test]
    fn unrelated_change_does_not_fire() {
        let ctx = DashboardContext::new(sample_table());
        let state = SelectionState::new(&ctx);
        let (registry, seen) = recording_registry(&[Field::Site]);

        assert!(registry.fire(&[Field::PayloadRange], &ctx, &state).is_empty());
        assert!(seen.borrow().is_empty());

        assert_eq!(registry.fire(&[Field::Site], &ctx, &state).len(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn handler_errors_are_reported_per_region() {
        let ctx = DashboardContext::new(sample_table());
        let state = SelectionState::new(&ctx);
        let mut registry = BindingRegistry::new();
        registry.register(&[Field::Site], Region::Scatter, |_, inputs| {
            Err(BindingError::UnexpectedInputs(inputs.to_vec()))
        });

        let updates = registry.fire(&[Field::Site], &ctx, &state);
        assert_eq!(updates[0].region, Region::Scatter);
        assert!(matches!(
            updates[0].result,
            Err(BindingError::UnexpectedInputs(_))
        ));
    }
}
