//! Data Pipeline Module
//! Runs load → join → coerce → region resolution as one pass.

use crate::data::coerce::coerce_rows;
use crate::data::filter::{self, ColumnDomain, FilterConstraints};
use crate::data::join::join_sources;
use crate::data::loader::{DataLoader, LoaderError};
use crate::data::model::{Record, RegionRecord, SourceKind, SourceTable};
use crate::data::region::resolve_regions;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Locations of the three source files.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub obesity: PathBuf,
    pub household: PathBuf,
    pub gdp: PathBuf,
}

impl SourcePaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            obesity: dir.join(SourceKind::Obesity.default_file_name()),
            household: dir.join(SourceKind::Household.default_file_name()),
            gdp: dir.join(SourceKind::Gdp.default_file_name()),
        }
    }

    pub fn get(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Obesity => &self.obesity,
            SourceKind::Household => &self.household,
            SourceKind::Gdp => &self.gdp,
        }
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Joined and coerced rows, in obesity source order.
    pub unified: Vec<Record>,
    /// Rows of `unified` that map to a region code.
    pub regions: Vec<RegionRecord>,
}

impl Dataset {
    pub fn from_sources(obesity: &SourceTable, household: &SourceTable, gdp: &SourceTable) -> Self {
        let joined = join_sources(obesity, household, gdp);
        let unified = coerce_rows(joined);
        let regions = resolve_regions(&unified);

        log::debug!(
            "Unified {} states ({} obesity, {} household, {} gdp rows), {} on the map",
            unified.len(),
            obesity.len(),
            household.len(),
            gdp.len(),
            regions.len()
        );

        Self { unified, regions }
    }

    /// State names for the selection list, in table order.
    pub fn state_names(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.unified.len());
        self.unified
            .iter()
            .filter(|record| seen.insert(record.state.as_str()))
            .map(|record| record.state.clone())
            .collect()
    }

    pub fn filter(&self, constraints: &FilterConstraints) -> Vec<Record> {
        constraints.apply(&self.unified)
    }

    pub fn prevalence_domain(&self) -> Option<ColumnDomain> {
        filter::prevalence_domain(&self.unified)
    }

    pub fn income_domain(&self, step: f64) -> Option<ColumnDomain> {
        filter::income_domain(&self.unified, step)
    }
}

/// Loads the sources and builds a fresh dataset on every call.
pub struct DataPipeline;

impl DataPipeline {
    pub fn run(paths: &SourcePaths) -> Result<Dataset, LoaderError> {
        let obesity = DataLoader::load_source(SourceKind::Obesity, paths.get(SourceKind::Obesity))?;
        let household =
            DataLoader::load_source(SourceKind::Household, paths.get(SourceKind::Household))?;
        let gdp = DataLoader::load_source(SourceKind::Gdp, paths.get(SourceKind::Gdp))?;

        Ok(Dataset::from_sources(&obesity, &household, &gdp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ValueRange;

    fn read(kind: SourceKind, csv: &str) -> SourceTable {
        DataLoader::read_source(kind, csv.as_bytes().to_vec()).unwrap()
    }

    fn example() -> Dataset {
        let obesity = read(
            SourceKind::Obesity,
            "State,Prevalence\nAlabama,39.0\nVermont,28.0\n",
        );
        let household = read(
            SourceKind::Household,
            "State,Median Household Income\nAlabama,52000\nVermont,67000\n",
        );
        let gdp = read(SourceKind::Gdp, "State,GDP_2023\nAlabama,250000\nVermont,40000\n");
        Dataset::from_sources(&obesity, &household, &gdp)
    }

    #[test]
    fn test_example_scenario() {
        let dataset = example();
        assert_eq!(dataset.unified.len(), 2);

        let constraints = FilterConstraints {
            prevalence: ValueRange::new(35.0, 42.0),
            ..Default::default()
        };
        assert_eq!(
            dataset.filter(&constraints),
            vec![Record::new("Alabama", Some(39.0), Some(52000.0), Some(250000.0))]
        );
    }

    #[test]
    fn test_region_table_is_unfiltered() {
        let dataset = example();
        let constraints = FilterConstraints {
            prevalence: ValueRange::new(35.0, 42.0),
            ..Default::default()
        };

        assert_eq!(dataset.filter(&constraints).len(), 1);
        let codes: Vec<&str> = dataset.regions.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["AL", "VT"]);
    }

    #[test]
    fn test_state_names_are_unique() {
        let obesity = read(SourceKind::Obesity, "State,Prevalence\nGuam,30\nGuam,31\n");
        let household = read(SourceKind::Household, "State,Median Household Income\nGuam,1\n");
        let gdp = read(SourceKind::Gdp, "State,GDP_2023\nGuam,1\n");

        let dataset = Dataset::from_sources(&obesity, &household, &gdp);
        assert_eq!(dataset.unified.len(), 2);
        assert_eq!(dataset.state_names(), vec!["Guam".to_string()]);
    }

    #[test]
    fn test_state_names_keep_first_seen_order() {
        let obesity = read(
            SourceKind::Obesity,
            "State,Prevalence\nVermont,28\nAlabama,39\nVermont,29\nAlabama,40\nGuam,30\n",
        );
        let household = read(
            SourceKind::Household,
            "State,Median Household Income\nAlabama,1\nGuam,1\nVermont,1\n",
        );
        let gdp = read(SourceKind::Gdp, "State,GDP_2023\nGuam,1\nVermont,1\nAlabama,1\n");

        let dataset = Dataset::from_sources(&obesity, &household, &gdp);
        assert_eq!(dataset.unified.len(), 5);
        assert_eq!(dataset.state_names(), vec!["Vermont", "Alabama", "Guam"]);
    }

    #[test]
    fn test_source_paths_in_dir() {
        let paths = SourcePaths::in_dir(Path::new("data"));
        assert_eq!(paths.get(SourceKind::Household), Path::new("data/Household.csv"));
        assert_eq!(paths.gdp, PathBuf::from("data/GDP.csv"));
    }
}
