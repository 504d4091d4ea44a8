use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Icon category of a point of interest along the trek.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerCategory {
    /// Overnight stop (tea house village)
    Tent,
    Summit,
    Pass,
    Airport,
    BaseCamp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl MarkerSize {
    /// Icon edge length in CSS pixels.
    pub fn pixels(self) -> u32 {
        match self {
            MarkerSize::Small => 20,
            MarkerSize::Medium => 28,
            MarkerSize::Large => 36,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub position: Coordinates,
    pub category: MarkerCategory,
    #[serde(default)]
    pub size: MarkerSize,
    /// Days this marker belongs to
    #[serde(default)]
    pub days: Vec<String>,
    /// Higher wins when labels in the same conflict group collide
    #[serde(default)]
    pub label_priority: u8,
    /// Markers sharing a group overlap on screen; only one label is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_group: Option<String>,
}

impl Marker {
    pub fn belongs_to(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_marker_deserialization_defaults() {
        let marker: Marker = serde_json::from_value(json!({
            "id": "cho-la",
            "name": "Cho La",
            "position": {"lat": 27.962, "lng": 86.767},
            "category": "pass",
            "days": ["10"]
        }))
        .unwrap();

        assert_eq!(marker.size, MarkerSize::Small);
        assert_eq!(marker.label_priority, 0);
        assert!(marker.conflict_group.is_none());
        assert!(marker.belongs_to("10"));
        assert!(!marker.belongs_to("1"));
    }

    #[test]
    fn test_base_camp_wire_name() {
        let value = serde_json::to_value(MarkerCategory::BaseCamp).unwrap();
        assert_eq!(value, json!("base-camp"));
        assert_eq!(MarkerSize::Large.pixels(), 36);
    }
}
