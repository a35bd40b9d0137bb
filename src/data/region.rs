//! Region Code Resolver
//! Static mapping of state and territory names to postal codes, plus each
//! region's cell in the tile-grid map.

use crate::data::model::{Record, RegionRecord};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// A state, district or territory with a two-letter code.
#[derive(Debug, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub code: &'static str,
    /// Column of the tile-grid map.
    pub col: u8,
    /// Row of the tile-grid map.
    pub row: u8,
}

const fn region(name: &'static str, code: &'static str, col: u8, row: u8) -> Region {
    Region {
        name,
        code,
        col,
        row,
    }
}

impl Region {
    pub fn is_territory(&self) -> bool {
        matches!(self.code, "GU" | "PR" | "VI")
    }
}

/// Tile grid dimensions (columns, rows).
pub const GRID_SIZE: (u8, u8) = (11, 9);

/// 50 states, DC, Guam, Puerto Rico and the Virgin Islands.
pub static REGIONS: [Region; 54] = [
    region("Alabama", "AL", 6, 6),
    region("Alaska", "AK", 0, 0),
    region("Arizona", "AZ", 1, 5),
    region("Arkansas", "AR", 4, 5),
    region("California", "CA", 0, 4),
    region("Colorado", "CO", 2, 4),
    region("Connecticut", "CT", 9, 3),
    region("Delaware", "DE", 9, 4),
    region("District of Columbia", "DC", 8, 5),
    region("Florida", "FL", 8, 7),
    region("Georgia", "GA", 7, 6),
    region("Guam", "GU", 0, 8),
    region("Hawaii", "HI", 0, 7),
    region("Idaho", "ID", 1, 2),
    region("Illinois", "IL", 5, 2),
    region("Indiana", "IN", 5, 3),
    region("Iowa", "IA", 4, 3),
    region("Kansas", "KS", 3, 5),
    region("Kentucky", "KY", 5, 4),
    region("Louisiana", "LA", 4, 6),
    region("Maine", "ME", 10, 0),
    region("Maryland", "MD", 8, 4),
    region("Massachusetts", "MA", 10, 2),
    region("Michigan", "MI", 7, 2),
    region("Minnesota", "MN", 4, 2),
    region("Mississippi", "MS", 5, 6),
    region("Missouri", "MO", 4, 4),
    region("Montana", "MT", 2, 2),
    region("Nebraska", "NE", 3, 4),
    region("Nevada", "NV", 1, 3),
    region("New Hampshire", "NH", 10, 1),
    region("New Jersey", "NJ", 8, 3),
    region("New Mexico", "NM", 2, 5),
    region("New York", "NY", 8, 2),
    region("North Carolina", "NC", 6, 5),
    region("North Dakota", "ND", 3, 2),
    region("Ohio", "OH", 6, 3),
    region("Oklahoma", "OK", 3, 6),
    region("Oregon", "OR", 0, 3),
    region("Pennsylvania", "PA", 7, 3),
    region("Puerto Rico", "PR", 9, 8),
    region("Rhode Island", "RI", 9, 2),
    region("South Carolina", "SC", 7, 5),
    region("South Dakota", "SD", 3, 3),
    region("Tennessee", "TN", 5, 5),
    region("Texas", "TX", 3, 7),
    region("Utah", "UT", 1, 4),
    region("Vermont", "VT", 9, 1),
    region("Virgin Islands", "VI", 10, 8),
    region("Virginia", "VA", 7, 4),
    region("Washington", "WA", 0, 2),
    region("West Virginia", "WV", 6, 4),
    region("Wisconsin", "WI", 6, 2),
    region("Wyoming", "WY", 2, 3),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static Region>> =
    LazyLock::new(|| REGIONS.iter().map(|r| (r.name, r)).collect());

/// Look up a region by its full name.
pub fn lookup(name: &str) -> Option<&'static Region> {
    BY_NAME.get(name).copied()
}

pub fn is_region_code(code: &str) -> bool {
    REGIONS.iter().any(|r| r.code == code)
}

/// Attach region codes, dropping records whose state is not in the table.
pub fn resolve_regions(records: &[Record]) -> Vec<RegionRecord> {
    let resolved: Vec<RegionRecord> = records
        .iter()
        .filter_map(|record| {
            lookup(&record.state).map(|region| RegionRecord {
                record: record.clone(),
                region,
            })
        })
        .collect();

    let dropped = records.len() - resolved.len();
    if dropped > 0 {
        log::debug!("{} records have no region code and are left off the map", dropped);
    }
    resolved
}

/// Regions with no record in the table, in table order.
pub fn missing_regions(records: &[Record]) -> Vec<&'static str> {
    let present: HashSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    REGIONS
        .iter()
        .filter(|r| !present.contains(r.name))
        .map(|r| r.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Alabama").map(|r| r.code), Some("AL"));
        assert_eq!(lookup("District of Columbia").map(|r| r.code), Some("DC"));
        assert_eq!(lookup("Virgin Islands").map(|r| r.code), Some("VI"));
        assert!(lookup("United States").is_none());
        assert!(lookup("alabama").is_none());
    }

    #[test]
    fn test_table_is_consistent() {
        let codes: HashSet<&str> = REGIONS.iter().map(|r| r.code).collect();
        let names: HashSet<&str> = REGIONS.iter().map(|r| r.name).collect();
        assert_eq!(codes.len(), REGIONS.len());
        assert_eq!(names.len(), REGIONS.len());

        for r in &REGIONS {
            assert_eq!(r.code.len(), 2);
            assert!(r.code.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_tiles_do_not_overlap() {
        let cells: HashSet<(u8, u8)> = REGIONS.iter().map(|r| (r.col, r.row)).collect();
        assert_eq!(cells.len(), REGIONS.len());
        for r in &REGIONS {
            assert!(r.col < GRID_SIZE.0 && r.row < GRID_SIZE.1, "{} off grid", r.code);
        }
    }

    #[test]
    fn test_resolve_drops_unmapped() {
        let records = vec![
            Record::new("Alabama", Some(39.0), None, None),
            Record::new("United States", Some(33.0), None, None),
            Record::new("Guam", None, None, None),
        ];

        let resolved = resolve_regions(&records);
        let codes: Vec<&str> = resolved.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["AL", "GU"]);
        assert!(resolved.iter().all(|r| is_region_code(r.code())));
    }

    #[test]
    fn test_missing_regions() {
        let records: Vec<Record> = REGIONS
            .iter()
            .filter(|r| r.code != "KY" && r.code != "PA")
            .map(|r| Record::new(r.name, None, None, None))
            .collect();

        assert_eq!(missing_regions(&records), vec!["Kentucky", "Pennsylvania"]);
    }
}
