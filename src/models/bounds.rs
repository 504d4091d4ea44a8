use crate::constants::{DESKTOP_BOUNDS_PADDING, MOBILE_BOUNDS_PADDING};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Viewport class the frame is computed for. Mobile frames carry more
/// padding so the dashboard overlay does not hide the route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceMode {
    pub fn padding_ratio(self) -> f64 {
        match self {
            DeviceMode::Desktop => DESKTOP_BOUNDS_PADDING,
            DeviceMode::Mobile => MOBILE_BOUNDS_PADDING,
        }
    }

    pub fn from_mobile_flag(is_mobile: bool) -> Self {
        if is_mobile {
            DeviceMode::Mobile
        } else {
            DeviceMode::Desktop
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMode::Desktop => write!(f, "desktop"),
            DeviceMode::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for DeviceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(DeviceMode::Desktop),
            "mobile" => Ok(DeviceMode::Mobile),
            _ => Err(format!("Invalid device mode: '{}'", s)),
        }
    }
}

/// Axis-aligned bounding box in geographic coordinates.
///
/// Serialized the way Leaflet's `fitBounds` expects it:
/// `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[[f64; 2]; 2]")]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl From<Bounds> for [[f64; 2]; 2] {
    fn from(b: Bounds) -> Self {
        [[b.south, b.west], [b.north, b.east]]
    }
}

impl Bounds {
    /// Build bounds from two `[lat, lng]` corners in any order.
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Self {
        Bounds {
            south: a[0].min(b[0]),
            west: a[1].min(b[1]),
            north: a[0].max(b[0]),
            east: a[1].max(b[1]),
        }
    }

    /// Parse a `[[lat, lng], [lat, lng]]` value. Returns `None` unless the
    /// value holds exactly two corners of two finite, in-range numbers.
    pub fn from_corner_pairs(value: &serde_json::Value) -> Option<Self> {
        let corners = value.as_array()?;
        if corners.len() != 2 {
            return None;
        }

        let corner = |v: &serde_json::Value| -> Option<[f64; 2]> {
            let pair = v.as_array()?;
            if pair.len() != 2 {
                return None;
            }
            let lat = pair[0].as_f64()?;
            let lng = pair[1].as_f64()?;
            let valid = lat.is_finite()
                && lng.is_finite()
                && (-90.0..=90.0).contains(&lat)
                && (-180.0..=180.0).contains(&lng);
            valid.then_some([lat, lng])
        };

        Some(Bounds::from_corners(corner(&corners[0])?, corner(&corners[1])?))
    }

    /// Envelope of a `geo` rectangle (x = longitude, y = latitude).
    pub fn from_rect(rect: geo::Rect<f64>) -> Self {
        Bounds {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }

    /// Grow every side by `ratio` of the corresponding span, as
    /// Leaflet's `LatLngBounds.pad` does.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lng_buffer = (self.east - self.west).abs() * ratio;

        Bounds {
            south: self.south - lat_buffer,
            west: self.west - lng_buffer,
            north: self.north + lat_buffer,
            east: self.east + lng_buffer,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lng)
    }

    /// Largest absolute difference between matching edges.
    pub fn max_edge_difference(&self, other: &Bounds) -> f64 {
        [
            (self.south - other.south).abs(),
            (self.west - other.west).abs(),
            (self.north - other.north).abs(),
            (self.east - other.east).abs(),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    /// Round every edge to `decimal_places`, for writing the offline table.
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        let r = |v: f64| (v * multiplier).round() / multiplier;
        Bounds {
            south: r(self.south),
            west: r(self.west),
            north: r(self.north),
            east: r(self.east),
        }
    }
}
