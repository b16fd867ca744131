use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::aggregate::ChartSpec;
use crate::binding::Region;
use crate::color::ColorMap;
use crate::context::DashboardContext;
use crate::controller::ViewController;
use crate::state::UiState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub controller: ViewController,
    pub ui_state: UiState,
    /// Booster category colours, fixed for the whole session.
    colors: ColorMap,
    payload_step: f64,
}

impl LaunchDashApp {
    pub fn new(ctx: Arc<DashboardContext>, payload_step: f64) -> Self {
        let colors = ColorMap::new(
            ctx.table()
                .records()
                .iter()
                .map(|r| r.booster_version_category.as_str()),
        );
        let mut controller = ViewController::new(ctx);
        controller.mount();
        let ui_state = UiState::new(controller.selection());
        Self {
            controller,
            ui_state,
            colors,
            payload_step,
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.controller, &mut self.ui_state);
        });

        // ---- Central panel: the dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::header(ui);
                    ui.add_space(12.0);

                    panels::site_selector(ui, &mut self.controller, &mut self.ui_state);
                    ui.add_space(8.0);

                    if let Some(ChartSpec::Pie(pie)) = self.controller.region(Region::Pie) {
                        plot::pie_chart(ui, pie);
                    }
                    ui.add_space(12.0);

                    panels::payload_selector(
                        ui,
                        &mut self.controller,
                        &mut self.ui_state,
                        self.payload_step,
                    );
                    ui.add_space(8.0);

                    if let Some(ChartSpec::Scatter(scatter)) =
                        self.controller.region(Region::Scatter)
                    {
                        let bounds = self.controller.context().bounds();
                        plot::scatter_chart(ui, scatter, &self.colors, bounds);
                    }
                });
        });
    }
}
