//! Chart Viewer Widget
//! Central scrollable panel: bubble chart, choropleth and narrative text.

use crate::charts::{BubblePoint, ChartPlotter};
use crate::data::{region, Record, RegionRecord};
use egui::{Color32, RichText, ScrollArea};

const BUBBLE_HEIGHT: f32 = 500.0;
const SECTION_SPACING: f32 = 40.0;
const BODY_SIZE: f32 = 16.0;

const BUBBLE_TITLE: &str =
    "Bubble Chart: Obesity Prevalence, Median Household Income, and GDP Across U.S. States";
const BUBBLE_SUBTITLE: &str = "Relationship between State Obesity Prevalence Rates and Median \
     Household Income in 2023 (Bubble Size Represents GDP)";
const MAP_TITLE: &str = "Choropleth Map: State Obesity Prevalence Rates";

const OBSERVATIONS: [(&str, &str); 3] = [
    (
        "General Inverse Relationship",
        "States with higher obesity rates often show lower median household incomes, \
         indicating a possible negative correlation between income and obesity prevalence.",
    ),
    (
        "GDP Variations",
        "The bubble sizes, representing GDP, vary widely, suggesting that a higher GDP does \
         not necessarily correlate with lower obesity or higher incomes.",
    ),
    (
        "Regional Disparities",
        "Some states deviate from the overall trend, implying that additional factors such as \
         regional culture, lifestyle, or urbanization may also influence obesity rates.",
    ),
];

const COLOR_BANDS: [(&str, &str); 4] = [
    ("Dark blue or purple", "lowest obesity prevalence rates, around 25%"),
    ("Blue-green or green", "moderate obesity prevalence rates, typically around 30%-35%"),
    ("Light green or yellow-green", "moderately high obesity prevalence rates, roughly 35%-38%"),
    ("Yellow", "highest obesity prevalence rates, reaching 40% or more"),
];

const DATA_SOURCES: [(&str, &str); 3] = [
    (
        "GDP by State: U.S. Bureau of Economic Analysis (BEA)",
        "https://www.bea.gov/data/gdp/gdp-state",
    ),
    (
        "Obesity Prevalence Rates: Centers for Disease Control and Prevention (CDC)",
        "https://www.cdc.gov/obesity/data-and-statistics/adult-obesity-prevalence-maps.html",
    ),
    (
        "Median Household Income: U.S. Census Bureau",
        "https://www.census.gov/library/publications/2024/demo/p60-282.html",
    ),
];

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    pub points: Vec<BubblePoint>,
    pub regions: Vec<RegionRecord>,
    /// Regions with no unified record, named in the chart subtitles.
    pub missing: Vec<&'static str>,
    /// Highest and lowest prevalence on the map.
    pub extremes: Option<(Record, Record)>,
    pub loaded: bool,
}

/// Map records with the highest and lowest prevalence. Records without a
/// prevalence are skipped; ties keep the first record in table order.
pub fn prevalence_extremes(regions: &[RegionRecord]) -> Option<(Record, Record)> {
    let mut highest: Option<(&Record, f64)> = None;
    let mut lowest: Option<(&Record, f64)> = None;
    for rr in regions {
        let Some(value) = rr.record.prevalence else {
            continue;
        };
        if highest.map_or(true, |(_, v)| value > v) {
            highest = Some((&rr.record, value));
        }
        if lowest.map_or(true, |(_, v)| value < v) {
            lowest = Some((&rr.record, value));
        }
    }
    Some((highest?.0.clone(), lowest?.0.clone()))
}

fn extreme_line(label: &str, record: &Record) -> String {
    let gdp = record
        .gdp_2023
        .map(|g| format!("${:.0}", g))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{} Obesity Prevalence Rate: {} - {:.1}% (GDP: {})",
        label,
        record.state,
        record.prevalence.unwrap_or_default(),
        gdp
    )
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replace the displayed tables.
    pub fn set_view(
        &mut self,
        filtered: &[Record],
        unified: &[Record],
        regions: Vec<RegionRecord>,
        size_max: f32,
    ) {
        self.points = ChartPlotter::bubble_points(filtered, size_max);
        self.missing = region::missing_regions(unified)
            .into_iter()
            .filter(|name| region::lookup(name).is_some_and(|r| !r.is_territory()))
            .collect();
        self.extremes = prevalence_extremes(&regions);
        self.regions = regions;
        self.loaded = true;
    }

    fn missing_note(&self) -> Option<String> {
        match self.missing.as_slice() {
            [] => None,
            [one] => Some(format!("{} data is missing", one)),
            [rest @ .., last] => Some(format!("{} and {} data are missing", rest.join(", "), last)),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if !self.loaded {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let note = self.missing_note();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // ===== Bubble chart =====
                ui.heading(RichText::new(BUBBLE_TITLE).size(24.0).strong());
                ui.add_space(8.0);
                ui.label(RichText::new(BUBBLE_SUBTITLE).size(16.0));
                if let Some(note) = &note {
                    ui.label(RichText::new(format!("*{}*", note)).italics().color(Color32::GRAY));
                }
                ui.add_space(8.0);

                if self.points.is_empty() {
                    ui.label(
                        RichText::new("No states match the current filters")
                            .color(Color32::GRAY),
                    );
                }
                ChartPlotter::draw_bubble_chart(ui, &self.points, BUBBLE_HEIGHT);

                ui.add_space(12.0);
                ui.label(RichText::new("From the Bubble Chart, we can observe:").size(BODY_SIZE));
                for (i, (headline, text)) in OBSERVATIONS.iter().enumerate() {
                    ui.add_space(6.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(format!("{}. {}:", i + 1, headline)).size(BODY_SIZE).strong());
                        ui.label(RichText::new(*text).size(BODY_SIZE));
                    });
                }

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);

                // ===== Choropleth =====
                ui.heading(RichText::new(MAP_TITLE).size(24.0).strong());
                if let Some(note) = &note {
                    ui.label(RichText::new(format!("*{}*", note)).italics().color(Color32::GRAY));
                }
                ui.add_space(8.0);

                let map_width = ui.available_width() * 0.6;
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(map_width);
                        ChartPlotter::draw_choropleth(ui, &self.regions, map_width);
                    });
                    ui.add_space(20.0);
                    ui.vertical(|ui| {
                        ui.label(RichText::new("Color Explanation").size(20.0).strong());
                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(
                                "The closer the color is to yellow, the higher the obesity \
                                 prevalence rate. Conversely, the closer it is to dark blue or \
                                 purple, the lower the obesity prevalence rate.",
                            )
                            .size(BODY_SIZE),
                        );
                        for (band, meaning) in COLOR_BANDS {
                            ui.add_space(4.0);
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(format!("- {}:", band)).size(BODY_SIZE).strong());
                                ui.label(RichText::new(meaning).size(BODY_SIZE));
                            });
                        }
                        if let Some((highest, lowest)) = &self.extremes {
                            ui.add_space(10.0);
                            for line in [
                                extreme_line("Highest", highest),
                                extreme_line("Lowest", lowest),
                            ] {
                                ui.label(RichText::new(line).size(BODY_SIZE).strong());
                            }
                        }
                    });
                });

                ui.add_space(SECTION_SPACING);
                ui.separator();

                // ===== Sources =====
                ui.label(RichText::new("📚 Data Sources:").size(BODY_SIZE).strong());
                for (label, url) in DATA_SOURCES {
                    ui.hyperlink_to(label, url);
                }
                ui.add_space(20.0);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_missing(missing: Vec<&'static str>) -> ChartViewer {
        ChartViewer {
            missing,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_note() {
        assert_eq!(with_missing(vec![]).missing_note(), None);
        assert_eq!(
            with_missing(vec!["Kentucky"]).missing_note().as_deref(),
            Some("Kentucky data is missing")
        );
        assert_eq!(
            with_missing(vec!["Kentucky", "Pennsylvania"])
                .missing_note()
                .as_deref(),
            Some("Kentucky and Pennsylvania data are missing")
        );
    }

    #[test]
    fn test_territories_are_not_reported_missing() {
        let unified: Vec<Record> = region::REGIONS
            .iter()
            .filter(|r| r.code != "KY" && r.code != "GU")
            .map(|r| Record::new(r.name, Some(30.0), Some(60000.0), Some(1.0)))
            .collect();

        let mut viewer = ChartViewer::new();
        viewer.set_view(&unified, &unified, Vec::new(), 60.0);
        assert_eq!(viewer.missing, vec!["Kentucky"]);
        assert!(viewer.loaded);
    }

    fn on_map(records: Vec<Record>) -> Vec<RegionRecord> {
        records
            .into_iter()
            .filter_map(|record| {
                let region = region::lookup(&record.state)?;
                Some(RegionRecord { record, region })
            })
            .collect()
    }

    #[test]
    fn test_prevalence_extremes() {
        let regions = on_map(vec![
            Record::new("Vermont", Some(28.0), Some(67000.0), Some(40000.0)),
            Record::new("West Virginia", Some(41.2), Some(55217.0), Some(102152.0)),
            Record::new("Kentucky", None, Some(60000.0), Some(260000.0)),
            Record::new("District of Columbia", Some(23.5), Some(101027.0), Some(176502.0)),
            Record::new("Alabama", Some(39.0), Some(52000.0), Some(250000.0)),
        ]);

        let (highest, lowest) = prevalence_extremes(&regions).unwrap();
        assert_eq!(highest.state, "West Virginia");
        assert_eq!(lowest.state, "District of Columbia");
        assert_eq!(
            extreme_line("Highest", &highest),
            "Highest Obesity Prevalence Rate: West Virginia - 41.2% (GDP: $102152)"
        );
        assert_eq!(
            extreme_line("Lowest", &lowest),
            "Lowest Obesity Prevalence Rate: District of Columbia - 23.5% (GDP: $176502)"
        );
    }

    #[test]
    fn test_prevalence_extremes_without_values() {
        let regions = on_map(vec![
            Record::new("Kentucky", None, Some(60000.0), Some(260000.0)),
            Record::new("Vermont", None, Some(67000.0), Some(40000.0)),
        ]);
        assert_eq!(prevalence_extremes(&regions), None);
        assert_eq!(prevalence_extremes(&[]), None);

        let single = on_map(vec![
            Record::new("Kentucky", None, Some(60000.0), Some(260000.0)),
            Record::new("Vermont", Some(28.0), Some(67000.0), None),
        ]);
        let (highest, lowest) = prevalence_extremes(&single).unwrap();
        assert_eq!((highest.state.as_str(), lowest.state.as_str()), ("Vermont", "Vermont"));
        assert_eq!(
            extreme_line("Highest", &highest),
            "Highest Obesity Prevalence Rate: Vermont - 28.0% (GDP: n/a)"
        );
    }
}
