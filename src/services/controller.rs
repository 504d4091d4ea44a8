//! Turns UI events into view-state transitions and a viewport command for
//! the map.
//!
//! Each event is a state-transition request: the controller dispatches the
//! transitions and returns what the map should do, but draws nothing
//! itself. Animations are fire-and-forget; a newer command simply
//! supersedes an older one still in flight.

use crate::constants::{
    DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_ZOOM, OVERVIEW_DAY, POINT_DAY_ZOOM,
};
use crate::dataset::TrekDataset;
use crate::models::{Bounds, Coordinates, DeviceMode, Transition, ViewState};
use crate::services::bounds_resolver::resolve_bounds;
use crate::services::navigator::DayNavigator;
use crate::services::preferences::KeyValueStore;
use crate::services::store::ViewStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    ArrowRight,
    ArrowLeft,
    Escape,
    Char(char),
}

impl KeyInput {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" => Some(KeyInput::ArrowRight),
            "ArrowLeft" => Some(KeyInput::ArrowLeft),
            "Escape" | "Esc" => Some(KeyInput::Escape),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyInput::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }
}

/// What the map should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewCommand {
    FitBounds { bounds: Bounds, duration_ms: u64 },
    FlyTo { center: Coordinates, zoom: f64, duration_ms: u64 },
    /// Leave the viewport as it is
    KeepViewport,
}

pub struct TrekController<'a, S: KeyValueStore> {
    dataset: &'a TrekDataset,
    store: ViewStore<S>,
    navigator: DayNavigator<'a>,
    mode: DeviceMode,
    animation_duration_ms: u64,
}

impl<'a, S: KeyValueStore> TrekController<'a, S> {
    pub fn new(
        dataset: &'a TrekDataset,
        store: ViewStore<S>,
        mode: DeviceMode,
        animation_duration_ms: u64,
    ) -> Self {
        TrekController {
            dataset,
            store,
            navigator: DayNavigator::new(dataset),
            mode,
            animation_duration_ms,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    pub fn into_store(self) -> ViewStore<S> {
        self.store
    }

    pub fn handle_key(&mut self, key: KeyInput) -> ViewCommand {
        match key {
            KeyInput::ArrowRight => self.next_day(),
            KeyInput::ArrowLeft => self.previous_day(),
            KeyInput::Escape => self.show_overview(),
            KeyInput::Char('u') => self.toggle(Transition::ToggleUnit),
            KeyInput::Char('l') => self.toggle(Transition::ToggleLegend),
            KeyInput::Char('i') => self.toggle(Transition::ToggleInfo),
            KeyInput::Char(_) => ViewCommand::KeepViewport,
        }
    }

    pub fn next_day(&mut self) -> ViewCommand {
        let current = self.store.state().day.clone();
        let store = &mut self.store;
        let target = self.navigator.next(&current, |props| {
            store.dispatch(Transition::SetDay {
                day: props.day.clone(),
            });
        });
        let day = target.day;
        self.enter_day(&day)
    }

    pub fn previous_day(&mut self) -> ViewCommand {
        let current = self.store.state().day.clone();
        let store = &mut self.store;
        let target = self.navigator.previous(&current, |props| {
            store.dispatch(Transition::SetDay {
                day: props.day.clone(),
            });
        });
        let day = target.day;
        self.enter_day(&day)
    }

    /// Apply a transition requested by the UI and work out how the map
    /// should follow. Day and mode changes reframe the map; everything
    /// else leaves the viewport alone.
    pub fn request(&mut self, transition: Transition) -> ViewCommand {
        match transition {
            Transition::SetDay { day } => {
                if self.store.state().single_day {
                    self.select_day(&day)
                } else {
                    self.toggle(Transition::SetDay { day })
                }
            }
            Transition::SetSingleDayView { enabled: true } => {
                let day = self.store.state().day.clone();
                self.enter_day(&day)
            }
            Transition::SetSingleDayView { enabled: false } => self.show_overview(),
            other => self.toggle(other),
        }
    }

    /// A marker or list click selecting a day directly.
    pub fn select_day(&mut self, day: &str) -> ViewCommand {
        self.store.dispatch(Transition::SetDay {
            day: day.to_string(),
        });
        self.enter_day(day)
    }

    pub fn show_overview(&mut self) -> ViewCommand {
        self.store
            .dispatch(Transition::SetSingleDayView { enabled: false });
        ViewCommand::FlyTo {
            center: Coordinates {
                lat: DEFAULT_CENTER_LAT,
                lng: DEFAULT_CENTER_LNG,
            },
            zoom: DEFAULT_ZOOM,
            duration_ms: self.animation_duration_ms,
        }
    }

    /// The map finished a zoom or move.
    pub fn viewport_changed(&mut self, zoom: f64, center: Coordinates) {
        self.store.dispatch(Transition::SetViewport { zoom, center });
    }

    /// Viewport command framing `day`: fly to the point of a rest day, fit
    /// the bounds of a walking day, or stay put when neither resolves.
    pub fn frame_day(&self, day: &str) -> ViewCommand {
        if let Some(point) = self.dataset.day(day).and_then(|d| d.point()) {
            return ViewCommand::FlyTo {
                center: point.coordinates(),
                zoom: POINT_DAY_ZOOM,
                duration_ms: self.animation_duration_ms,
            };
        }

        match resolve_bounds(self.dataset, day, self.mode) {
            Some(bounds) => ViewCommand::FitBounds {
                bounds,
                duration_ms: self.animation_duration_ms,
            },
            None => ViewCommand::KeepViewport,
        }
    }

    /// The overview day is the landing state, not a single day.
    fn enter_day(&mut self, day: &str) -> ViewCommand {
        if day == OVERVIEW_DAY {
            return self.show_overview();
        }
        self.store
            .dispatch(Transition::SetSingleDayView { enabled: true });
        self.frame_day(day)
    }

    fn toggle(&mut self, transition: Transition) -> ViewCommand {
        self.store.dispatch(transition);
        ViewCommand::KeepViewport
    }
}
