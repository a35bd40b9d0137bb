//! Control Panel Widget
//! Left side panel with the data source, state selection and range filters.

use crate::data::{ColumnDomain, Dataset, FilterConstraints, ValueRange};
use egui::{Color32, RichText, ScrollArea, Slider, TextEdit};
use std::path::PathBuf;

/// Left side control panel with data selection and filter controls.
pub struct ControlPanel {
    pub data_dir: PathBuf,
    pub constraints: FilterConstraints,
    pub states: Vec<String>,
    pub prevalence_domain: Option<ColumnDomain>,
    pub income_domain: Option<ColumnDomain>,
    pub state_search: String,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            constraints: FilterConstraints::default(),
            states: Vec::new(),
            prevalence_domain: None,
            income_domain: None,
            state_search: String::new(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Refresh choices after a pipeline run, keeping selections that still apply.
    pub fn update_dataset(&mut self, dataset: &Dataset, income_step: f64) {
        let prevalence_domain = dataset.prevalence_domain();
        let income_domain = dataset.income_domain(income_step);

        self.constraints.prevalence = Self::carry_range(
            self.constraints.prevalence,
            self.prevalence_domain,
            prevalence_domain,
        );
        self.constraints.income =
            Self::carry_range(self.constraints.income, self.income_domain, income_domain);
        self.prevalence_domain = prevalence_domain;
        self.income_domain = income_domain;

        self.states = dataset.state_names();
        let states = &self.states;
        self.constraints.states.retain(|s| states.contains(s));
    }

    /// Reset to the full range when the domain changed, otherwise clamp.
    fn carry_range(
        current: ValueRange,
        old: Option<ColumnDomain>,
        new: Option<ColumnDomain>,
    ) -> ValueRange {
        match new {
            Some(domain) if old == Some(domain) => domain.clamp(current),
            Some(domain) => domain.full_range(),
            None => ValueRange::UNBOUNDED,
        }
    }

    /// Clear loaded choices after a failed run.
    pub fn clear_dataset(&mut self) {
        self.states.clear();
        self.prevalence_domain = None;
        self.income_domain = None;
        self.export_enabled = false;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 State Obesity Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Obesity · Income · GDP")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(self.data_dir.display().to_string()).size(12.0));
                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseDataDir;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== State Selection Section =====
        ui.label(
            RichText::new("🗺 Select States for Comparison")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        let mut filters_changed = false;

        ui.horizontal(|ui| {
            let selected = self.constraints.states.len();
            let summary = if selected == 0 {
                "All states".to_string()
            } else {
                format!("{} selected", selected)
            };
            ui.label(RichText::new(summary).size(12.0));
            if ui.small_button("Clear").clicked() && selected > 0 {
                self.constraints.states.clear();
                filters_changed = true;
            }
        });

        ui.add(TextEdit::singleline(&mut self.state_search).hint_text("Search states"));

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    let needle = self.state_search.trim().to_lowercase();
                    for state in &self.states {
                        if !needle.is_empty() && !state.to_lowercase().contains(&needle) {
                            continue;
                        }
                        let mut checked = self.constraints.states.contains(state);
                        if ui.checkbox(&mut checked, state).changed() {
                            if checked {
                                self.constraints.states.insert(state.clone());
                            } else {
                                self.constraints.states.remove(state);
                            }
                            filters_changed = true;
                        }
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Range Section =====
        ui.label(
            RichText::new("⚙️ Obesity Prevalence Range (%)")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
        if let Some(domain) = self.prevalence_domain {
            filters_changed |=
                Self::range_sliders(ui, &mut self.constraints.prevalence, &domain, "", "%");
        } else {
            ui.label(RichText::new("No data").color(Color32::GRAY));
        }

        ui.add_space(10.0);
        ui.label(
            RichText::new("💵 Median Household Income Range ($)")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
        if let Some(domain) = self.income_domain {
            filters_changed |=
                Self::range_sliders(ui, &mut self.constraints.income, &domain, "$", "");
        } else {
            ui.label(RichText::new("No data").color(Color32::GRAY));
        }

        if filters_changed {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Low/high slider pair. Returns true when either moved.
    fn range_sliders(
        ui: &mut egui::Ui,
        range: &mut ValueRange,
        domain: &ColumnDomain,
        prefix: &str,
        suffix: &str,
    ) -> bool {
        let mut low = range.low.clamp(domain.min, domain.max);
        let mut high = range.high.clamp(domain.min, domain.max);

        let low_changed = ui
            .add(
                Slider::new(&mut low, domain.min..=domain.max)
                    .step_by(domain.step)
                    .prefix(prefix)
                    .suffix(suffix)
                    .text("from"),
            )
            .changed();
        let high_changed = ui
            .add(
                Slider::new(&mut high, domain.min..=domain.max)
                    .step_by(domain.step)
                    .prefix(prefix)
                    .suffix(suffix)
                    .text("to"),
            )
            .changed();

        if !(low_changed || high_changed) {
            return false;
        }

        let mut low = domain.snap(low);
        let mut high = domain.snap(high);

        // The moved handle pushes the other one along
        if low > high {
            if low_changed {
                high = low;
            } else {
                low = high;
            }
        }
        *range = ValueRange::new(low, high);
        true
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDataDir,
    Reload,
    FiltersChanged,
    ExportPng,
}
