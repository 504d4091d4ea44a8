pub mod bounds;
pub mod coordinates;
pub mod day;
pub mod marker;
pub mod units;
pub mod view_state;

pub use bounds::{Bounds, DeviceMode};
pub use coordinates::Coordinates;
pub use day::{DayCollection, DayProperties, RouteFeature, TrackGeometry, TrackPoint};
pub use marker::{Marker, MarkerCategory, MarkerSize};
pub use units::{Feet, Meters, Unit};
pub use view_state::{Transition, ViewState};
