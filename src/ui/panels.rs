use eframe::egui::{self, Color32, RichText, Ui};

use crate::aggregate::ChartSpec;
use crate::binding::Region;
use crate::controller::ViewController;
use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::UiState;

// ---------------------------------------------------------------------------
// Page header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
}

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Searchable dropdown of ALL plus every catalog site.
pub fn site_selector(ui: &mut Ui, controller: &mut ViewController, ui_state: &mut UiState) {
    let options = controller.context().catalog().options();
    let current = controller.selection().site().clone();
    let mut picked: Option<SiteSelection> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Select Launch Site:").size(22.0).strong());
        egui::ComboBox::from_id_salt("site-dropdown")
            .selected_text(current.label())
            .width(ui.available_width() * 0.8)
            .show_ui(ui, |ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut ui_state.site_search)
                        .hint_text("Select a Launch site here"),
                );
                let needle = ui_state.site_search.to_lowercase();
                for option in &options {
                    if !needle.is_empty() && !option.label().to_lowercase().contains(&needle) {
                        continue;
                    }
                    if ui
                        .selectable_label(*option == current, option.label())
                        .clicked()
                    {
                        picked = Some(option.clone());
                    }
                }
            });
    });

    if let Some(site) = picked {
        log::debug!("Site selected: {site}");
        ui_state.site_search.clear();
        controller.select_site(site);
    }
}

// ---------------------------------------------------------------------------
// Payload range selector
// ---------------------------------------------------------------------------

/// Two linked sliders bounded by the observed payload range. The selection
/// is committed when a drag is released (or on a keyboard / click change).
pub fn payload_selector(
    ui: &mut Ui,
    controller: &mut ViewController,
    ui_state: &mut UiState,
    step: f64,
) {
    let bounds = controller.context().bounds();
    let mut low = ui_state.draft_range.low();
    let mut high = ui_state.draft_range.high();

    ui.label("Payload range (Kg):");
    let (low_resp, high_resp, reset) = ui
        .horizontal(|ui: &mut Ui| {
            let low_resp = ui.add(payload_slider(&mut low, bounds, "min"));
            let high_resp = ui.add(payload_slider(&mut high, bounds, "max"));
            let reset = ui.button("Full range").clicked();
            (low_resp, high_resp, reset)
        })
        .inner;
    low = snap_to_step(low, step, bounds);
    high = snap_to_step(high, step, bounds);

    // Keep low <= high, moving the end the user did not touch.
    if low > high {
        if low_resp.changed() {
            high = low;
        } else {
            low = high;
        }
    }
    ui_state.draft_range = if reset {
        bounds
    } else {
        PayloadRange::new(low, high)
    };

    let committed = |r: &egui::Response| r.drag_stopped() || (r.changed() && !r.dragged());
    if reset || committed(&low_resp) || committed(&high_resp) {
        controller.select_payload_range(ui_state.draft_range);
        ui_state.draft_range = controller.selection().payload_range();
    }
}

fn payload_slider<'a>(value: &'a mut f64, bounds: PayloadRange, text: &str) -> egui::Slider<'a> {
    egui::Slider::new(value, bounds.low()..=bounds.high())
        .text(text)
        .suffix(" kg")
        .fixed_decimals(0)
}

/// Round `value` to a multiple of `step` counted from zero, so the marks do
/// not depend on the dataset minimum. Both bounds stay reachable even when
/// they are not multiples of `step`. A non-positive `step` disables snapping.
fn snap_to_step(value: f64, step: f64, bounds: PayloadRange) -> f64 {
    if step <= 0.0 || value <= bounds.low() || value >= bounds.high() {
        return value.clamp(bounds.low(), bounds.high());
    }
    ((value / step).round() * step).clamp(bounds.low(), bounds.high())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, controller: &ViewController, ui_state: &mut UiState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export charts…").clicked() {
                export_dialog(controller, ui_state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        let table = controller.context().table();
        let shown = match controller.region(Region::Scatter) {
            Some(ChartSpec::Scatter(s)) => s.points.len(),
            _ => 0,
        };
        ui.label(format!(
            "{} launches loaded ({} successful), {} in scatter",
            table.len(),
            table.success_count(),
            shown
        ));

        if let Some(msg) = &ui_state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub fn export_dialog(controller: &ViewController, ui_state: &mut UiState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("launch_charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match controller.export_json(&path) {
            Ok(()) => ui_state.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                ui_state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
