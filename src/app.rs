use std::time::Duration;

use eframe::egui;

use nfhs_dashboard::state::AppState;

use crate::ui::{charts, panels};

/// How often the source file is checked for changes.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    last_poll: std::time::Instant,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            last_poll: std::time::Instant::now(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.last_poll.elapsed() >= POLL_INTERVAL {
            self.state.poll_source();
            self.last_poll = std::time::Instant::now();
        }
        ctx.request_repaint_after(POLL_INTERVAL);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPI, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("National Family Health Survey (NFHS) Dashboard");
                    ui.separator();
                    panels::indicator_selector(ui, &mut self.state);
                    panels::kpi_section(ui, &self.state);
                    ui.separator();
                    charts::comparison_chart(ui, &self.state);
                    ui.separator();
                    charts::trend_chart(ui, &self.state);
                    ui.separator();
                    panels::preview_table(ui, &self.state);
                });
        });
    }
}
