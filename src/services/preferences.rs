//! Durable user preferences: display unit and legend visibility.
//!
//! Preferences live in a small key/value store. In the browser that store is
//! the cookie jar; [`CookieStore`] reads the request's `Cookie` header and
//! records the `Set-Cookie` values a change needs.

use crate::constants::{LEGEND_COOKIE, UNIT_COOKIE};
use crate::models::{DeviceMode, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::format_description;
use time::{Duration, OffsetDateTime};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously saved values only.
    pub fn from_values(values: HashMap<String, String>) -> Self {
        MemoryStore { values }
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Cookie-backed store for one request/response exchange.
#[derive(Debug, Clone)]
pub struct CookieStore {
    values: HashMap<String, String>,
    max_age: Duration,
    set_cookies: Vec<String>,
}

impl CookieStore {
    /// Parse a `Cookie` request header (`a=1; b=2`). Pairs without `=` are
    /// skipped.
    pub fn from_header(header: Option<&str>, max_age_days: i64) -> Self {
        let values = header
            .unwrap_or_default()
            .split(';')
            .filter_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();

        CookieStore {
            values,
            max_age: Duration::days(max_age_days),
            set_cookies: Vec::new(),
        }
    }

    /// `Set-Cookie` header values produced by writes, in write order.
    pub fn set_cookie_headers(&self) -> &[String] {
        &self.set_cookies
    }

    fn set_cookie_value(&self, key: &str, value: &str) -> String {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; SameSite=Lax",
            key,
            value,
            self.max_age.whole_seconds()
        );
        match http_date(OffsetDateTime::now_utc() + self.max_age) {
            Some(expires) => cookie.push_str(&format!("; Expires={}", expires)),
            None => tracing::warn!(key, "Could not format cookie expiry; sending Max-Age only"),
        }
        cookie
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let cookie = self.set_cookie_value(key, value);
        self.values.insert(key.to_string(), value.to_string());
        self.set_cookies.push(cookie);
    }
}

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
fn http_date(at: OffsetDateTime) -> Option<String> {
    let format = format_description::parse(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT",
    )
    .ok()?;
    at.to_offset(time::UtcOffset::UTC).format(&format).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub unit: Unit,
    pub legend_visible: bool,
}

impl Preferences {
    /// Device defaults: km, legend shown on desktop and hidden on mobile.
    pub fn defaults(mode: DeviceMode) -> Self {
        Preferences {
            unit: Unit::Km,
            legend_visible: mode == DeviceMode::Desktop,
        }
    }

    /// Restore from `store`. Absent values take the device defaults;
    /// present but unrecognized values fall back to km and a visible
    /// legend.
    pub fn load(store: &impl KeyValueStore, mode: DeviceMode) -> Self {
        let defaults = Self::defaults(mode);

        let unit = match store.get(UNIT_COOKIE) {
            None => defaults.unit,
            Some(raw) => parse_unit(&raw).unwrap_or_else(|| {
                tracing::debug!(value = %raw, "Unrecognized unit preference; using km");
                Unit::Km
            }),
        };

        let legend_visible = match store.get(LEGEND_COOKIE) {
            None => defaults.legend_visible,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::debug!(value = %raw, "Unrecognized legend preference; showing legend");
                true
            }),
        };

        Preferences {
            unit,
            legend_visible,
        }
    }
}

pub fn save_unit(store: &mut impl KeyValueStore, unit: Unit) {
    store.set(UNIT_COOKIE, &unit.to_string());
}

pub fn save_legend(store: &mut impl KeyValueStore, legend_visible: bool) {
    store.set(LEGEND_COOKIE, if legend_visible { "true" } else { "false" });
}

/// Stored values are exactly what `save_unit` writes.
fn parse_unit(raw: &str) -> Option<Unit> {
    match raw {
        "km" => Some(Unit::Km),
        "ft" => Some(Unit::Ft),
        _ => None,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
