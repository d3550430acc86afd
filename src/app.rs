use eframe::egui;

use crate::color::ChartColors;
use crate::ui::plot::{self, ChartData};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Read-only chart window for one finished run.
pub struct ChartApp {
    pub title: String,
    pub chart: ChartData,
    pub colors: ChartColors,
}

impl ChartApp {
    pub fn new(title: impl Into<String>, chart: ChartData) -> Self {
        Self {
            title: title.into(),
            chart,
            colors: ChartColors::default(),
        }
    }

    /// Open the native window and block until it is closed.
    pub fn run(self) -> anyhow::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 600.0])
                .with_min_inner_size([500.0, 300.0]),
            ..Default::default()
        };

        eframe::run_native(
            "Yearly Stats – Value Over Time",
            options,
            Box::new(|_cc| Ok(Box::new(self))),
        )
        .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: filter summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.heading(self.title.as_str());
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::yearly_plot(ui, &self.chart, &self.colors);
        });
    }
}
