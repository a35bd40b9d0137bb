//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{DataPipeline, Dataset, Record};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;

/// Filter changes re-run the pipeline every frame a slider moves.
fn run_log_level(reload: bool) -> log::Level {
    if reload {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Result of the latest successful run
    dataset: Option<Dataset>,
    filtered: Vec<Record>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(config.data_dir.clone()),
            chart_viewer: ChartViewer::new(),
            config,
            dataset: None,
            filtered: Vec::new(),
        };
        app.refresh(true);
        app
    }

    /// Run the whole pipeline from the source files and apply the current filters.
    /// `reload` is false for runs triggered by a filter change.
    fn refresh(&mut self, reload: bool) {
        let paths = self.config.source_paths();

        match DataPipeline::run(&paths) {
            Ok(dataset) => {
                log::log!(
                    run_log_level(reload),
                    "Loaded {} states ({} on the map) from {}",
                    dataset.unified.len(),
                    dataset.regions.len(),
                    self.config.data_dir.display()
                );
                self.control_panel
                    .update_dataset(&dataset, self.config.income_step);
                self.filtered = dataset.filter(&self.control_panel.constraints);
                self.chart_viewer.set_view(
                    &self.filtered,
                    &dataset.unified,
                    dataset.regions.clone(),
                    self.config.bubble_size_max,
                );
                self.control_panel.export_enabled = true;
                self.control_panel.set_status(&format!(
                    "Showing {} of {} states",
                    self.filtered.len(),
                    dataset.unified.len()
                ));
                self.dataset = Some(dataset);
            }
            Err(e) => {
                log::error!("Failed to load data: {}", e);
                self.dataset = None;
                self.filtered.clear();
                self.chart_viewer.clear();
                self.control_panel.clear_dataset();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle data directory selection
    fn handle_browse_data_dir(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_directory(&self.config.data_dir)
            .pick_folder()
        {
            log::info!("Data directory changed to {}", dir.display());
            self.config.data_dir = dir.clone();
            self.control_panel.data_dir = dir;
            self.refresh(true);
        }
    }

    /// Handle PNG export of the current charts
    fn handle_export_png(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("obesity_dashboard.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::export_png(
            &output_path,
            &self.filtered,
            &dataset.regions,
            self.config.bubble_size_max,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::error!("PNG export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseDataDir => self.handle_browse_data_dir(),
                        ControlPanelAction::Reload => self.refresh(true),
                        ControlPanelAction::FiltersChanged => self.refresh(false),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_runs_log_below_info() {
        assert_eq!(run_log_level(true), log::Level::Info);
        assert_eq!(run_log_level(false), log::Level::Debug);
        assert!(run_log_level(false) > log::Level::Info);
    }
}
