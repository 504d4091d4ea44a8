use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// One `[longitude, latitude, elevation]` position of a route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrackPoint {
    pub lon: f64,
    pub lat: f64,
    /// Elevation in meters
    pub ele: f64,
}

impl TrackPoint {
    pub fn new(lon: f64, lat: f64, ele: f64) -> Self {
        TrackPoint { lon, lat, ele }
    }

    /// Build from a GeoJSON position. A missing third ordinate reads as sea
    /// level; fewer than two ordinates is not a position.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat] => Some(TrackPoint::new(*lon, *lat, 0.0)),
            [lon, lat, ele, ..] => Some(TrackPoint::new(*lon, *lat, *ele)),
            _ => None,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lon,
        }
    }
}

/// Geometry of one feature of a day.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackGeometry {
    /// Rest days, the overview day and in-day points of interest
    Point(TrackPoint),
    /// One or more disjoint line parts (LineString or MultiLineString)
    Line(Vec<Vec<TrackPoint>>),
}

impl TrackGeometry {
    /// Convert a GeoJSON geometry. Geometry kinds a trek route never uses
    /// (polygons, collections) and malformed positions yield `None`.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Option<Self> {
        match &geometry.value {
            geojson::Value::Point(position) => {
                TrackPoint::from_position(position).map(TrackGeometry::Point)
            }
            geojson::Value::LineString(line) => {
                let part = Self::convert_part(line)?;
                Some(TrackGeometry::Line(vec![part]))
            }
            geojson::Value::MultiLineString(lines) => {
                let parts = lines
                    .iter()
                    .map(|line| Self::convert_part(line))
                    .collect::<Option<Vec<_>>>()?;
                Some(TrackGeometry::Line(parts))
            }
            _ => None,
        }
    }

    fn convert_part(line: &[Vec<f64>]) -> Option<Vec<TrackPoint>> {
        line.iter()
            .map(|position| TrackPoint::from_position(position))
            .collect()
    }

    pub fn is_line(&self) -> bool {
        matches!(self, TrackGeometry::Line(_))
    }

    pub fn line_parts(&self) -> &[Vec<TrackPoint>] {
        match self {
            TrackGeometry::Line(parts) => parts,
            TrackGeometry::Point(_) => &[],
        }
    }
}

/// Per-day metadata shown on the dashboard. Altitudes, climb and descent
/// are comma-formatted feet (`"9,383"`); distance carries both forms
/// (`"4.8 mi / 7.7 km"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DayProperties {
    pub day: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub start_alt: Option<String>,
    #[serde(default)]
    pub end_alt: Option<String>,
    #[serde(default)]
    pub peak_alt: Option<String>,
    #[serde(default)]
    pub total_climb: Option<String>,
    #[serde(default)]
    pub total_descent: Option<String>,
}

impl DayProperties {
    /// Read day properties from a GeoJSON property map. Features without
    /// a `day` key (in-day points of interest) have none.
    pub fn from_json_object(properties: &geojson::JsonObject) -> Option<Self> {
        if !properties.contains_key("day") {
            return None;
        }
        serde_json::from_value(serde_json::Value::Object(properties.clone())).ok()
    }
}

/// One feature of a day's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFeature {
    /// `None` when the source geometry is absent or unusable
    pub geometry: Option<TrackGeometry>,
    pub properties: Option<DayProperties>,
}

impl RouteFeature {
    pub fn from_geojson(feature: &geojson::Feature) -> Self {
        let geometry = feature.geometry.as_ref().and_then(|g| {
            let converted = TrackGeometry::from_geojson(g);
            if converted.is_none() {
                tracing::warn!("Ignoring unsupported or malformed feature geometry");
            }
            converted
        });
        let properties = feature
            .properties
            .as_ref()
            .and_then(DayProperties::from_json_object);

        RouteFeature {
            geometry,
            properties,
        }
    }

    pub fn is_line(&self) -> bool {
        self.geometry.as_ref().is_some_and(TrackGeometry::is_line)
    }
}

/// One day of the itinerary: its identifier and feature collection.
/// The first feature carries the day's properties.
#[derive(Debug, Clone)]
pub struct DayCollection {
    pub day: String,
    pub features: Vec<RouteFeature>,
    /// Source collection, handed to the map as-is
    pub source: geojson::FeatureCollection,
}

impl DayCollection {
    pub fn from_geojson(day: &str, source: geojson::FeatureCollection) -> Self {
        let features = source.features.iter().map(RouteFeature::from_geojson).collect();
        DayCollection {
            day: day.to_string(),
            features,
            source,
        }
    }

    pub fn first_feature(&self) -> Option<&RouteFeature> {
        self.features.first()
    }

    pub fn properties(&self) -> Option<&DayProperties> {
        self.first_feature().and_then(|f| f.properties.as_ref())
    }

    /// Features drawn as route lines, excluding points of interest.
    pub fn line_features(&self) -> impl Iterator<Item = &RouteFeature> {
        self.features.iter().filter(|f| f.is_line())
    }

    /// Rest days and the overview are a single point rather than a line.
    pub fn is_point_day(&self) -> bool {
        matches!(
            self.first_feature().and_then(|f| f.geometry.as_ref()),
            Some(TrackGeometry::Point(_))
        )
    }

    /// Position of the day's point geometry, if it is a point day.
    pub fn point(&self) -> Option<TrackPoint> {
        match self.first_feature().and_then(|f| f.geometry.as_ref()) {
            Some(TrackGeometry::Point(p)) => Some(*p),
            _ => None,
        }
    }
}
