use crate::constants::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_DAY, DEFAULT_ZOOM};
use crate::models::{Coordinates, Unit};
use serde::{Deserialize, Serialize};

/// Everything the rendering layer reads to draw the map and dashboard.
///
/// The state is only ever changed through [`ViewState::apply`]; rendering
/// code gets a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewState {
    pub day: String,
    pub zoom: f64,
    pub center: Coordinates,
    pub unit: Unit,
    pub legend_visible: bool,
    pub info_visible: bool,
    /// `false` shows the whole trek (overview mode)
    pub single_day: bool,
}

/// Named state transitions. Each one other than `SetDay` and `SetViewport`
/// touches exactly one axis of the state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    SetDay { day: String },
    ToggleUnit,
    ToggleLegend,
    ToggleInfo,
    SetSingleDayView { enabled: bool },
    /// Reported by the map after a zoom or move ends
    SetViewport { zoom: f64, center: Coordinates },
}

impl ViewState {
    /// Initial state: overview mode on the default day, default frame, info
    /// panel hidden. Unit and legend come from restored preferences.
    pub fn new(unit: Unit, legend_visible: bool) -> Self {
        ViewState {
            day: DEFAULT_DAY.to_string(),
            zoom: DEFAULT_ZOOM,
            center: Coordinates {
                lat: DEFAULT_CENTER_LAT,
                lng: DEFAULT_CENTER_LNG,
            },
            unit,
            legend_visible,
            info_visible: false,
            single_day: false,
        }
    }

    /// Pure transition function. Never rejects a transition; a viewport
    /// report with non-finite numbers leaves the viewport unchanged.
    pub fn apply(&self, transition: &Transition) -> ViewState {
        let mut next = self.clone();
        match transition {
            Transition::SetDay { day } => next.day = day.clone(),
            Transition::ToggleUnit => next.unit = self.unit.toggled(),
            Transition::ToggleLegend => next.legend_visible = !self.legend_visible,
            Transition::ToggleInfo => next.info_visible = !self.info_visible,
            Transition::SetSingleDayView { enabled } => next.single_day = *enabled,
            Transition::SetViewport { zoom, center } => {
                if zoom.is_finite() && center.is_finite() {
                    next.zoom = *zoom;
                    next.center = *center;
                }
            }
        }
        next
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Unit::Km, true)
    }
}
