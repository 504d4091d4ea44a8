//! The static trek dataset: per-day route feature collections, the
//! precomputed bounds table and the marker list.
//!
//! The data ships inside the binary and is parsed once at startup into an
//! immutable [`TrekDataset`], shared read-only for the life of the process.

use crate::constants::OVERVIEW_DAY;
use crate::error::{AppError, Result};
use crate::models::{Bounds, DayCollection, DayProperties, DeviceMode, Marker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DAYS_JSON: &str = include_str!("../../data/days.json");
const BOUNDS_JSON: &str = include_str!("../../data/bounds.json");
const MARKERS_JSON: &str = include_str!("../../data/markers.json");

/// Precomputed frames for one day. Entries are kept as raw JSON so a
/// malformed corner pair degrades to the geometry fallback instead of
/// failing the whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoundsEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<serde_json::Value>,
}

impl BoundsEntry {
    pub fn new(desktop: Bounds, mobile: Bounds) -> Self {
        BoundsEntry {
            desktop: Some(serde_json::json!(desktop)),
            mobile: Some(serde_json::json!(mobile)),
        }
    }

    pub fn for_mode(&self, mode: DeviceMode) -> Option<&serde_json::Value> {
        match mode {
            DeviceMode::Desktop => self.desktop.as_ref(),
            DeviceMode::Mobile => self.mobile.as_ref(),
        }
    }
}

/// Bounds table keyed by day identifier.
pub type BoundsTable = BTreeMap<String, BoundsEntry>;

/// Parse a day identifier. Only canonical non-negative integers are day
/// keys: `"7"` is, `"07"`, `"-1"` and `"seven"` are not.
pub fn parse_day_key(day: &str) -> Option<u32> {
    let n: u32 = day.parse().ok()?;
    (n.to_string() == day).then_some(n)
}

#[derive(Debug, Clone)]
pub struct TrekDataset {
    days: BTreeMap<u32, DayCollection>,
    bounds: BoundsTable,
    markers: Vec<Marker>,
}

impl TrekDataset {
    /// Load the dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let raw_days: serde_json::Map<String, serde_json::Value> = serde_json::from_str(DAYS_JSON)?;
        let mut days = Vec::with_capacity(raw_days.len());
        for (day, value) in raw_days {
            let source = geojson::FeatureCollection::try_from(value)?;
            days.push(DayCollection::from_geojson(&day, source));
        }

        let bounds: BoundsTable = serde_json::from_str(BOUNDS_JSON)?;
        let markers: Vec<Marker> = serde_json::from_str(MARKERS_JSON)?;

        let dataset = Self::from_parts(days, bounds, markers)?;
        tracing::info!(
            days = dataset.days.len(),
            bounds_entries = dataset.bounds.len(),
            markers = dataset.markers.len(),
            "Loaded embedded trek dataset"
        );
        Ok(dataset)
    }

    /// Assemble a dataset from already-parsed parts, checking the day
    /// invariants: numeric unique identifiers, a non-empty collection whose
    /// first feature carries matching properties, and a point geometry for
    /// the overview day.
    pub fn from_parts(
        collections: Vec<DayCollection>,
        bounds: BoundsTable,
        markers: Vec<Marker>,
    ) -> Result<Self> {
        let mut days = BTreeMap::new();

        for collection in collections {
            let key = parse_day_key(&collection.day).ok_or_else(|| {
                AppError::Dataset(format!("Invalid day identifier: '{}'", collection.day))
            })?;

            let properties = collection.properties().ok_or_else(|| {
                AppError::Dataset(format!(
                    "Day {} has no feature carrying day properties",
                    collection.day
                ))
            })?;
            if properties.day != collection.day {
                return Err(AppError::Dataset(format!(
                    "Day {} first feature is labelled as day {}",
                    collection.day, properties.day
                )));
            }
            if collection.day == OVERVIEW_DAY && !collection.is_point_day() {
                return Err(AppError::Dataset(
                    "Overview day must use a point geometry".to_string(),
                ));
            }

            if days.insert(key, collection).is_some() {
                return Err(AppError::Dataset(format!("Duplicate day identifier: {}", key)));
            }
        }

        if days.is_empty() {
            return Err(AppError::Dataset("Dataset has no days".to_string()));
        }

        Ok(TrekDataset {
            days,
            bounds,
            markers,
        })
    }

    pub fn day(&self, day: &str) -> Option<&DayCollection> {
        self.days.get(&parse_day_key(day)?)
    }

    /// All days in ascending numeric order.
    pub fn days(&self) -> impl Iterator<Item = &DayCollection> {
        self.days.values()
    }

    /// Sorted numeric day keys. Never empty.
    pub fn day_keys(&self) -> Vec<u32> {
        self.days.keys().copied().collect()
    }

    pub fn properties(&self, day: &str) -> Option<&DayProperties> {
        self.day(day)?.properties()
    }

    pub fn bounds_entry(&self, day: &str) -> Option<&BoundsEntry> {
        self.bounds.get(day)
    }

    pub fn bounds_table(&self) -> &BoundsTable {
        &self.bounds
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers associated with a day; the overview day shows every marker.
    pub fn markers_for_day(&self, day: &str) -> Vec<&Marker> {
        if day == OVERVIEW_DAY {
            return self.markers.iter().collect();
        }
        self.markers.iter().filter(|m| m.belongs_to(day)).collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(day: &str, geometry: serde_json::Value) -> DayCollection {
        let source: geojson::FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": geometry, "properties": {"day": day}}]
        }))
        .unwrap();
        DayCollection::from_geojson(day, source)
    }

    fn point() -> serde_json::Value {
        json!({"type": "Point", "coordinates": [86.7314, 27.687, 2860]})
    }

    #[test]
    fn day_keys_are_canonical_integers() {
        assert_eq!(parse_day_key("0"), Some(0));
        assert_eq!(parse_day_key("20"), Some(20));
        assert_eq!(parse_day_key("07"), None);
        assert_eq!(parse_day_key("-1"), None);
        assert_eq!(parse_day_key(""), None);
        assert_eq!(parse_day_key("overview"), None);
    }

    #[test]
    fn days_iterate_in_numeric_order() {
        let dataset = TrekDataset::from_parts(
            vec![collection("10", point()), collection("2", point()), collection("0", point())],
            BoundsTable::new(),
            vec![],
        )
        .unwrap();

        assert_eq!(dataset.day_keys(), vec![0, 2, 10]);
        let order: Vec<&str> = dataset.days().map(|d| d.day.as_str()).collect();
        assert_eq!(order, vec!["0", "2", "10"]);
        assert!(dataset.day("2").is_some());
        assert!(dataset.day("02").is_none());
    }

    #[test]
    fn rejects_duplicate_and_invalid_days() {
        let duplicate = TrekDataset::from_parts(
            vec![collection("1", point()), collection("1", point())],
            BoundsTable::new(),
            vec![],
        );
        assert!(matches!(duplicate, Err(AppError::Dataset(_))));

        let invalid = TrekDataset::from_parts(vec![collection("x", point())], BoundsTable::new(), vec![]);
        assert!(matches!(invalid, Err(AppError::Dataset(_))));

        let empty = TrekDataset::from_parts(vec![], BoundsTable::new(), vec![]);
        assert!(matches!(empty, Err(AppError::Dataset(_))));
    }

    #[test]
    fn overview_day_must_be_a_point() {
        let line = json!({"type": "LineString", "coordinates": [[86.7, 27.6, 2800], [86.8, 27.7, 2900]]});
        let result = TrekDataset::from_parts(vec![collection("0", line)], BoundsTable::new(), vec![]);
        assert!(matches!(result, Err(AppError::Dataset(_))));
    }

    #[test]
    fn bounds_entry_selects_mode() {
        let desktop = Bounds::from_corners([27.0, 86.0], [28.0, 87.0]);
        let mobile = desktop.pad(0.25);
        let entry = BoundsEntry::new(desktop, mobile);
        assert_eq!(
            entry.for_mode(DeviceMode::Desktop),
            Some(&json!([[27.0, 86.0], [28.0, 87.0]]))
        );
        assert_eq!(
            Bounds::from_corner_pairs(entry.for_mode(DeviceMode::Mobile).unwrap()),
            Some(mobile)
        );
    }
}
