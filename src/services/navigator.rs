//! Circular day-to-day navigation.

use crate::dataset::{parse_day_key, TrekDataset};
use crate::models::{DayProperties, RouteFeature};
use serde::Serialize;

/// Where a navigation step lands: the target day's first feature and its
/// properties.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationTarget<'a> {
    pub day: String,
    #[serde(skip)]
    pub feature: &'a RouteFeature,
    pub properties: &'a DayProperties,
}

#[derive(Debug, Clone, Copy)]
struct Stop<'a> {
    key: u32,
    feature: &'a RouteFeature,
    properties: &'a DayProperties,
}

/// Index over the dataset's ascending day keys, stepping with wraparound.
///
/// The index is resynchronized with the caller's current day before every
/// step, so a day changed elsewhere (a marker click, say) is respected.
#[derive(Debug, Clone)]
pub struct DayNavigator<'a> {
    // Never empty: a dataset has at least one day and every day's first
    // feature carries properties.
    stops: Vec<Stop<'a>>,
    index: usize,
}

impl<'a> DayNavigator<'a> {
    pub fn new(dataset: &'a TrekDataset) -> Self {
        let stops = dataset
            .days()
            .filter_map(|collection| {
                let feature = collection.first_feature()?;
                Some(Stop {
                    key: parse_day_key(&collection.day)?,
                    feature,
                    properties: feature.properties.as_ref()?,
                })
            })
            .collect();

        DayNavigator { stops, index: 0 }
    }

    /// Day the navigator currently points at.
    pub fn current_day(&self) -> String {
        self.stops[self.index].key.to_string()
    }

    /// Point the index at `day`. Unknown or malformed days reset to the
    /// first day.
    pub fn sync(&mut self, day: &str) {
        let found = parse_day_key(day)
            .and_then(|key| self.stops.binary_search_by_key(&key, |s| s.key).ok());
        match found {
            Some(index) => self.index = index,
            None => {
                tracing::debug!(day, "Unknown current day; navigator reset to first day");
                self.index = 0;
            }
        }
    }

    /// Step to the day after `current_day`, wrapping past the last day.
    pub fn next<F>(&mut self, current_day: &str, dispatch: F) -> NavigationTarget<'a>
    where
        F: FnOnce(&DayProperties),
    {
        self.sync(current_day);
        self.index = (self.index + 1) % self.stops.len();
        self.land(dispatch)
    }

    /// Step to the day before `current_day`, wrapping before the first day.
    pub fn previous<F>(&mut self, current_day: &str, dispatch: F) -> NavigationTarget<'a>
    where
        F: FnOnce(&DayProperties),
    {
        self.sync(current_day);
        self.index = (self.index + self.stops.len() - 1) % self.stops.len();
        self.land(dispatch)
    }

    fn land<F>(&self, dispatch: F) -> NavigationTarget<'a>
    where
        F: FnOnce(&DayProperties),
    {
        let stop = self.stops[self.index];
        tracing::debug!(day = stop.key, name = ?stop.properties.name, "Navigated to day");
        dispatch(stop.properties);

        NavigationTarget {
            day: stop.key.to_string(),
            feature: stop.feature,
            properties: stop.properties,
        }
    }
}
