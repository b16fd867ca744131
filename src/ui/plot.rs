use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::aggregate::{PieChart, ScatterChart};
use crate::color::{ColorMap, generate_palette};
use crate::data::model::PayloadRange;

/// Wedges wider than this are split so every drawn polygon stays convex.
const MAX_WEDGE: f64 = FRAC_PI_2;
/// Angular resolution of the pie rim.
const RIM_STEP: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render a pie chart: one wedge per slice, starting at twelve o'clock and
/// running clockwise, with percentage labels inside each wedge.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    let total = chart.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No successful launches to show");
        });
        return;
    }

    let colors = generate_palette(chart.slices.len());

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .height(340.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.6)
        .include_x(1.6)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for (slice, &color) in chart.slices.iter().zip(colors.iter()) {
                if slice.value == 0 {
                    continue;
                }
                let name = format!("{} ({})", slice.label, slice.value);

                let share = slice.value as f64 / total as f64;
                let end = start - share * TAU;

                let mut a = start;
                while a > end {
                    let b = (a - MAX_WEDGE).max(end);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge(a, b)))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    a = b;
                }

                let mid = (start + end) / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        format!("{:.1}%", share * 100.0),
                    )
                    .color(Color32::WHITE),
                );
                start = end;
            }
        });
}

/// Closed wedge of the unit circle from angle `from` down to `to`.
fn wedge(from: f64, to: f64) -> Vec<[f64; 2]> {
    let mut points = vec![[0.0, 0.0]];
    let mut a = from;
    while a > to {
        points.push([a.cos(), a.sin()]);
        a -= RIM_STEP;
    }
    points.push([to.cos(), to.sin()]);
    points
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass (x) against launch class (y), one series per booster
/// category so the legend doubles as the colour key.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, colors: &ColorMap, bounds: PayloadRange) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    if chart.is_empty() {
        ui.label("No launches in the selected payload range.");
    }

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .height(340.0)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .include_x(bounds.low())
        .include_x(bounds.high())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.0} kg", value.x)
            } else {
                format!("{name}\n{:.0} kg, class {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for category in chart.categories() {
                let points: PlotPoints = chart
                    .points
                    .iter()
                    .filter(|p| p.booster_version_category == category)
                    .map(|p| [p.payload_mass_kg, f64::from(p.class)])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}
