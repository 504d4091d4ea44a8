use trekmap::dataset::TrekDataset;
use trekmap::models::{Bounds, DeviceMode, Unit};
use trekmap::services::bounds_resolver::{geometry_bounds, resolve_bounds_with_source};
use trekmap::services::controller::{KeyInput, TrekController, ViewCommand};
use trekmap::services::labels::visible_labels;
use trekmap::services::preferences::MemoryStore;
use trekmap::services::segments::segments_for_day;
use trekmap::services::store::ViewStore;
use trekmap::services::validation::{check_bounds_table, derive_bounds_table};
use trekmap::services::{BoundsSource, DayMetrics, DayNavigator};

fn dataset() -> TrekDataset {
    TrekDataset::embedded().expect("Embedded dataset should load")
}

#[test]
fn test_embedded_dataset_loads() {
    let dataset = dataset();
    assert_eq!(dataset.len(), 21);
    assert_eq!(dataset.day_keys(), (0..=20).collect::<Vec<u32>>());
    assert_eq!(dataset.markers().len(), 21);

    for day in ["0", "3", "8", "16"] {
        assert!(dataset.day(day).unwrap().is_point_day(), "day {}", day);
    }
    assert!(!dataset.day("12").unwrap().is_point_day());
}

#[test]
fn test_bounds_table_matches_geometry() {
    let dataset = dataset();
    let issues = check_bounds_table(&dataset);
    assert!(issues.is_empty(), "{:?}", issues);
}

#[test]
fn test_derived_table_matches_embedded_table() {
    let dataset = dataset();
    let derived = derive_bounds_table(&dataset);
    assert!(derived.keys().eq(dataset.bounds_table().keys()));
    for (day, entry) in &derived {
        for mode in [DeviceMode::Desktop, DeviceMode::Mobile] {
            let fresh = Bounds::from_corner_pairs(entry.for_mode(mode).unwrap()).unwrap();
            let stored = dataset.bounds_entry(day).and_then(|e| e.for_mode(mode)).unwrap();
            let stored = Bounds::from_corner_pairs(stored).unwrap();
            assert!(fresh.max_edge_difference(&stored) < 1e-6, "day {} {}", day, mode);
        }
    }
}

#[test]
fn test_precomputed_bounds_for_day_one() {
    let dataset = dataset();
    let resolved = resolve_bounds_with_source(&dataset, "1", DeviceMode::Desktop).unwrap();
    assert_eq!(resolved.source, BoundsSource::Precomputed);
    assert_eq!(resolved.bounds.south, 27.68167);
    assert_eq!(resolved.bounds.west, 86.7116);
    assert_eq!(resolved.bounds.north, 27.74563);
    assert_eq!(resolved.bounds.east, 86.7332);

    // The fallback agrees with the table
    let fallback = geometry_bounds(dataset.day("1").unwrap(), DeviceMode::Desktop).unwrap();
    assert!(fallback.max_edge_difference(&resolved.bounds) < 1e-6);
}

#[test]
fn test_rest_day_has_no_bounds() {
    let dataset = dataset();
    assert!(resolve_bounds_with_source(&dataset, "3", DeviceMode::Mobile).is_none());
    assert!(resolve_bounds_with_source(&dataset, "42", DeviceMode::Mobile).is_none());
}

#[test]
fn test_day_one_dashboard() {
    let dataset = dataset();
    let metrics = DayMetrics::for_day(dataset.properties("1").unwrap(), Unit::Km);
    assert_eq!(metrics.ascent, "↑ 152 m");
    assert_eq!(metrics.descent, "↓ 248 m");
    assert_eq!(metrics.distance, "7.7 km");
    assert_eq!(metrics.time, "3-4 hours");
}

#[test]
fn test_navigation_visits_every_day() {
    let dataset = dataset();
    let mut navigator = DayNavigator::new(&dataset);

    let mut day = "0".to_string();
    let mut visited = Vec::new();
    for _ in 0..21 {
        day = navigator.next(&day, |_| {}).day;
        visited.push(day.clone());
    }
    assert_eq!(visited.first().map(String::as_str), Some("1"));
    assert_eq!(visited.last().map(String::as_str), Some("0"));
    assert_eq!(navigator.next("20", |_| {}).day, "0");
}

#[test]
fn test_segments_skip_points_of_interest() {
    let dataset = dataset();
    // Day 6 carries a point of interest besides its route line
    let day = dataset.day("6").unwrap();
    assert_eq!(day.features.len(), 2);

    let segments = segments_for_day(day);
    let points: usize = day
        .line_features()
        .filter_map(|f| f.geometry.as_ref())
        .flat_map(|g| g.line_parts())
        .map(|part| part.len() - 1)
        .sum();
    assert_eq!(segments.len(), points);

    assert!(segments_for_day(dataset.day("3").unwrap()).is_empty());
}

#[test]
fn test_overview_shows_every_label_group_once() {
    let dataset = dataset();
    let markers = visible_labels(&dataset, "0");
    let shown_in_khumbu = markers
        .iter()
        .filter(|m| m.marker.conflict_group.as_deref() == Some("khumbu-head") && m.show_label)
        .count();
    assert_eq!(shown_in_khumbu, 1);
}

#[test]
fn test_keyboard_walk_through_trek() {
    let dataset = dataset();
    let store = ViewStore::new(MemoryStore::new(), DeviceMode::Desktop);
    let mut controller = TrekController::new(&dataset, store, DeviceMode::Desktop, 500);

    // Day 2 is a walking day
    match controller.handle_key(KeyInput::ArrowRight) {
        ViewCommand::FitBounds { duration_ms, .. } => assert_eq!(duration_ms, 500),
        other => panic!("expected fit_bounds, got {:?}", other),
    }
    assert_eq!(controller.state().day, "2");
    assert!(controller.state().single_day);

    // Day 3 is a rest day
    assert!(matches!(
        controller.handle_key(KeyInput::ArrowRight),
        ViewCommand::FlyTo { .. }
    ));
    assert_eq!(controller.state().day, "3");

    controller.handle_key(KeyInput::Char('u'));
    assert_eq!(controller.state().unit, Unit::Ft);

    let store = controller.into_store();
    assert_eq!(
        store.preferences().values().get("unit").map(String::as_str),
        Some("ft")
    );
}
