//! Place records shared by the place source and the wheel engine.

use serde::{Deserialize, Serialize};

/// A point in the upstream provider's convention: `x` is longitude, `y` is
/// latitude, both in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parses the string pair the provider returns (`"127.1"`, `"37.4"`).
    ///
    /// Returns `None` when either half is not a finite number.
    #[must_use]
    pub fn parse(x: &str, y: &str) -> Option<Self> {
        let x = x.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let y = y.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { x, y })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.y, self.x)
    }
}

/// A named place returned by a location or category search, or produced by
/// the synthetic generator.
///
/// Never mutated after construction; the builder-style `with_*` methods
/// consume and return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Provider category group code, e.g. `FD6` (restaurant) or `CE7` (cafe).
    pub category_code: Option<String>,
    /// Stable provider id. `None` for synthetic places, which are never
    /// considered duplicates of one another.
    pub identity: Option<String>,
    pub coordinate: Option<Coordinate>,
    /// Road address when known, otherwise the lot-number address.
    pub address: Option<String>,
    /// The provider's record, preserved as-is.
    pub raw: serde_json::Value,
}

impl Place {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_code: None,
            identity: None,
            coordinate: None,
            address: None,
            raw: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, code: impl Into<String>) -> Self {
        self.category_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }

    #[must_use]
    pub fn has_category(&self, code: &str) -> bool {
        self.category_code.as_deref() == Some(code)
    }

    /// The first `max_chars` characters of the name.
    ///
    /// Counts `char`s rather than bytes so Hangul names are cut on a
    /// character boundary.
    #[must_use]
    pub fn label(&self, max_chars: usize) -> String {
        self.name.chars().take(max_chars).collect()
    }
}
