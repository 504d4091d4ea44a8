//! Consistency checks between the precomputed bounds table and the route
//! geometry, so drift is caught before it reaches a user.

use crate::constants::BOUNDS_DRIFT_TOLERANCE_DEG;
use crate::dataset::{BoundsEntry, BoundsTable, TrekDataset};
use crate::models::{Bounds, DeviceMode};
use crate::services::bounds_resolver::geometry_bounds;
use serde::Serialize;
use std::fmt;

const MODES: [DeviceMode; 2] = [DeviceMode::Desktop, DeviceMode::Mobile];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundsIssue {
    /// A day with line geometry has no usable entry for a mode
    Missing { day: String, mode: DeviceMode },
    /// A point-only day (rest day, overview) has an entry
    Unexpected { day: String },
    /// The entry is present but not two well-formed corners
    Malformed { day: String, mode: DeviceMode },
    /// The entry no longer matches the padded route envelope
    Drift {
        day: String,
        mode: DeviceMode,
        max_difference_deg: f64,
    },
    /// The table names a day the dataset does not have
    UnknownDay { day: String },
}

impl fmt::Display for BoundsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsIssue::Missing { day, mode } => {
                write!(f, "day {}: missing {} bounds", day, mode)
            }
            BoundsIssue::Unexpected { day } => {
                write!(f, "day {}: bounds entry for a day without line geometry", day)
            }
            BoundsIssue::Malformed { day, mode } => {
                write!(f, "day {}: malformed {} bounds", day, mode)
            }
            BoundsIssue::Drift {
                day,
                mode,
                max_difference_deg,
            } => write!(
                f,
                "day {}: {} bounds drift by {:.6} degrees from the route geometry",
                day, mode, max_difference_deg
            ),
            BoundsIssue::UnknownDay { day } => {
                write!(f, "day {}: bounds entry for unknown day", day)
            }
        }
    }
}

/// Compare every table entry with the geometry it was derived from.
pub fn check_bounds_table(dataset: &TrekDataset) -> Vec<BoundsIssue> {
    let mut issues = Vec::new();

    for collection in dataset.days() {
        let day = collection.day.as_str();
        let entry = dataset.bounds_entry(day);

        for mode in MODES {
            let expected = geometry_bounds(collection, mode);
            let stored = entry.and_then(|e| e.for_mode(mode));

            match (expected, stored) {
                (None, Some(_)) => {
                    issues.push(BoundsIssue::Unexpected {
                        day: day.to_string(),
                    });
                    break;
                }
                (None, None) => {}
                (Some(_), None) => issues.push(BoundsIssue::Missing {
                    day: day.to_string(),
                    mode,
                }),
                (Some(expected), Some(value)) => match Bounds::from_corner_pairs(value) {
                    None => issues.push(BoundsIssue::Malformed {
                        day: day.to_string(),
                        mode,
                    }),
                    Some(stored) => {
                        let difference = stored.max_edge_difference(&expected);
                        if difference > BOUNDS_DRIFT_TOLERANCE_DEG {
                            issues.push(BoundsIssue::Drift {
                                day: day.to_string(),
                                mode,
                                max_difference_deg: difference,
                            });
                        }
                    }
                },
            }
        }
    }

    for day in dataset.bounds_table().keys() {
        if dataset.day(day).is_none() {
            issues.push(BoundsIssue::UnknownDay { day: day.clone() });
        }
    }

    for issue in &issues {
        tracing::warn!("Bounds table issue: {}", issue);
    }
    issues
}

/// Derive a fresh table from the route geometry, rounded to six decimals.
pub fn derive_bounds_table(dataset: &TrekDataset) -> BoundsTable {
    dataset
        .days()
        .filter_map(|collection| {
            let desktop = geometry_bounds(collection, DeviceMode::Desktop)?.round(6);
            let mobile = geometry_bounds(collection, DeviceMode::Mobile)?.round(6);
            Some((collection.day.clone(), BoundsEntry::new(desktop, mobile)))
        })
        .collect()
}
