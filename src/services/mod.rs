pub mod bounds_resolver;
pub mod color;
pub mod controller;
pub mod dashboard;
pub mod labels;
pub mod navigator;
pub mod preferences;
pub mod profile;
pub mod segments;
pub mod store;
pub mod validation;

pub use bounds_resolver::{resolve_bounds, BoundsSource, ResolvedBounds};
pub use color::color_for;
pub use controller::{KeyInput, TrekController, ViewCommand};
pub use dashboard::DayMetrics;
pub use navigator::{DayNavigator, NavigationTarget};
pub use preferences::{CookieStore, KeyValueStore, MemoryStore, Preferences};
pub use segments::{build_segments, ColoredSegment};
pub use store::{SubscriptionId, ViewStore};
