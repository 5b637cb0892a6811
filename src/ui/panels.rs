use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use nfhs_dashboard::data::loader::SUPPORTED_EXTENSIONS;
use nfhs_dashboard::data::model::CellValue;
use nfhs_dashboard::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter selectors
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state while rendering.
    let (Some(table), Some(selection)) = (state.table.clone(), state.selection.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(v) = value_combo(ui, "Select State", &selection.region, table.regions()) {
                state.set_region(v);
            }
            ui.add_space(6.0);
            if let Some(v) = value_combo(ui, "Select Survey", &selection.survey, table.surveys()) {
                state.set_survey(v);
            }
            ui.add_space(6.0);
            if let Some(v) = value_combo(ui, "Select Area", &selection.area, table.areas()) {
                state.set_area(v);
            }
        });
}

/// A labelled combo box over `options`; returns the newly picked value.
fn value_combo(
    ui: &mut Ui,
    label: &str,
    current: &CellValue,
    options: &[CellValue],
) -> Option<CellValue> {
    let mut picked = None;
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(option == current, option.to_string())
                    .clicked()
                    && option != current
                {
                    picked = Some(option.clone());
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Indicator selector + KPI
// ---------------------------------------------------------------------------

pub fn indicator_selector(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey export to begin  (File → Open…)");
        });
        return;
    };

    let current = state.indicator.clone().unwrap_or_default();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Select Indicator");
        egui::ComboBox::from_id_salt("indicator")
            .selected_text(&current)
            .width(420.0)
            .show_ui(ui, |ui: &mut Ui| {
                for col in table.numeric_columns() {
                    if ui.selectable_label(current == *col, col).clicked() && current != *col {
                        state.set_indicator(col.clone());
                    }
                }
            });
    });
    if table.numeric_columns().is_empty() {
        ui.colored_label(Color32::YELLOW, "This dataset has no numeric indicator columns.");
    }
    ui.add_space(8.0);
}

pub fn kpi_section(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        return;
    }
    ui.heading("Key Indicator Value");
    match &state.kpi {
        Some(Ok(kpi)) => {
            ui.label(RichText::new(&kpi.indicator).weak());
            ui.label(RichText::new(kpi.value.to_string()).size(32.0).strong());
            if kpi.is_ambiguous() {
                ui.colored_label(
                    Color32::YELLOW,
                    format!(
                        "{} rows match this selection; showing the first.",
                        kpi.matching_rows
                    ),
                );
            }
        }
        Some(Err(_)) => {
            ui.colored_label(
                Color32::from_rgb(230, 160, 40),
                "No data available for selected filters",
            );
        }
        None => {
            ui.label("Pick an indicator to see its value.");
        }
    }
}

// ---------------------------------------------------------------------------
// Raw data preview
// ---------------------------------------------------------------------------

pub fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };
    ui.heading("Raw Data Preview");

    let rows = state.preview();
    if rows.is_empty() {
        ui.label("No rows match the selected filters.");
        return;
    }
    if state.filtered.len() > rows.len() {
        ui.label(format!(
            "Showing the first {} of {} rows",
            rows.len(),
            state.filtered.len()
        ));
    }

    let columns = table.columns();
    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), columns.len())
                .header(22.0, |mut header| {
                    for col in columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, rows.len(), |mut row| {
                        let record = rows[row.index()];
                        for col in columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(record.value(col).to_string());
                            });
                        }
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                // Failures land in the status message.
                let _ = state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} matching",
                table.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if state.open(&path).is_ok() {
            state.config.data_path = path;
        }
    }
}
