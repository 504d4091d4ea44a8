//! Marker label collision avoidance.

use crate::dataset::TrekDataset;
use crate::models::Marker;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    #[serde(flatten)]
    pub marker: Marker,
    pub icon_size: u32,
    pub show_label: bool,
}

/// Resolve which labels to draw among `markers`. Within a conflict group
/// only the highest `label_priority` keeps its label, the first listed on a
/// tie. Markers outside any group always show their label.
pub fn resolve_labels(markers: &[&Marker]) -> Vec<MarkerView> {
    let mut winners: HashMap<&str, usize> = HashMap::new();
    for (i, marker) in markers.iter().enumerate() {
        if let Some(group) = marker.conflict_group.as_deref() {
            let current = winners.entry(group).or_insert(i);
            if marker.label_priority > markers[*current].label_priority {
                *current = i;
            }
        }
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let show_label = match marker.conflict_group.as_deref() {
                Some(group) => winners.get(group) == Some(&i),
                None => true,
            };
            MarkerView {
                marker: (*marker).clone(),
                icon_size: marker.size.pixels(),
                show_label,
            }
        })
        .collect()
}

/// Markers for a day with their label visibility resolved.
pub fn visible_labels(dataset: &TrekDataset, day: &str) -> Vec<MarkerView> {
    resolve_labels(&dataset.markers_for_day(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, MarkerCategory, MarkerSize};

    fn marker(id: &str, priority: u8, group: Option<&str>) -> Marker {
        Marker {
            id: id.to_string(),
            name: id.to_string(),
            position: Coordinates { lat: 27.98, lng: 86.83 },
            category: MarkerCategory::Tent,
            size: MarkerSize::Small,
            days: vec!["12".to_string()],
            label_priority: priority,
            conflict_group: group.map(str::to_string),
        }
    }

    #[test]
    fn highest_priority_wins_within_group() {
        let gorak = marker("gorak-shep", 4, Some("khumbu-head"));
        let ebc = marker("ebc", 10, Some("khumbu-head"));
        let lobuche = marker("lobuche", 5, None);
        let views = resolve_labels(&[&gorak, &ebc, &lobuche]);

        let shown: Vec<&str> = views
            .iter()
            .filter(|v| v.show_label)
            .map(|v| v.marker.id.as_str())
            .collect();
        assert_eq!(shown, vec!["ebc", "lobuche"]);
        assert_eq!(views.len(), 3);
    }

    #[test]
    fn ties_keep_first_listed() {
        let a = marker("a", 3, Some("g"));
        let b = marker("b", 3, Some("g"));
        let views = resolve_labels(&[&a, &b]);
        assert!(views[0].show_label);
        assert!(!views[1].show_label);
    }

    #[test]
    fn groups_are_independent() {
        let a = marker("a", 1, Some("g1"));
        let b = marker("b", 1, Some("g2"));
        let views = resolve_labels(&[&a, &b]);
        assert!(views.iter().all(|v| v.show_label));
        assert_eq!(views[0].icon_size, 20);
    }
}
