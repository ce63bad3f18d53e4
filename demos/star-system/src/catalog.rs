//! Body catalog: the descriptive data the star system is built from.
//!
//! The catalog is plain serde data so the host can receive it as JSON
//! (one slider per body, tooltip labels) and so alternative systems can be
//! loaded from JSON instead of the built-in default.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable description of one orbiting body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    /// Visual radius in world units (also the picking sphere radius).
    pub radius: f32,
    /// Radius of the circular orbit around the origin.
    pub distance: f32,
    /// Initial angular speed in radians per second.
    pub speed: f64,
    /// Packed `0xRRGGBB`.
    pub color: u32,
}

impl BodyDescriptor {
    pub fn new(name: &str, radius: f32, distance: f32, speed: f64, color: u32) -> Self {
        Self {
            name: name.to_string(),
            radius,
            distance,
            speed,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunDescriptor {
    pub radius: f32,
    pub color: u32,
}

/// Slider bounds the host uses for every speed control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub sun: SunDescriptor,
    pub speed_range: SpeedRange,
    pub bodies: Vec<BodyDescriptor>,
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self {
            sun: SunDescriptor { radius: 3.0, color: 0xffff00 },
            speed_range: SpeedRange { min: 0.0, max: 0.05, step: 0.001 },
            bodies: vec![
                BodyDescriptor::new("Mercury", 0.5, 6.0, 0.02, 0xa9a9a9),
                BodyDescriptor::new("Venus", 0.9, 9.0, 0.015, 0xffcc99),
                BodyDescriptor::new("Earth", 1.0, 12.0, 0.01, 0x3399ff),
                BodyDescriptor::new("Mars", 0.8, 15.0, 0.008, 0xff5533),
                BodyDescriptor::new("Jupiter", 2.0, 22.0, 0.005, 0xffaa77),
                BodyDescriptor::new("Saturn", 1.8, 28.0, 0.004, 0xffcc00),
                BodyDescriptor::new("Uranus", 1.5, 34.0, 0.003, 0x66ffff),
                BodyDescriptor::new("Neptune", 1.3, 40.0, 0.002, 0x3366ff),
            ],
        }
    }
}

impl BodyCatalog {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: BodyCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the invariants the integrator and picking rely on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.bodies.is_empty() {
            return Err(CatalogError::Empty);
        }
        if !(self.sun.radius > 0.0 && self.sun.radius.is_finite()) {
            return Err(CatalogError::Invalid {
                name: "sun".to_string(),
                reason: "radius must be positive",
            });
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            let invalid = |reason| CatalogError::Invalid { name: body.name.clone(), reason };
            if !(body.radius > 0.0 && body.radius.is_finite()) {
                return Err(invalid("radius must be positive"));
            }
            if !(body.distance > 0.0 && body.distance.is_finite()) {
                return Err(invalid("distance must be positive"));
            }
            if !body.speed.is_finite() {
                return Err(invalid("speed must be finite"));
            }
            if !seen.insert(body.name.as_str()) {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Invalid { name: String, reason: &'static str },
    DuplicateName(String),
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "catalog JSON error: {}", e),
            CatalogError::Invalid { name, reason } => write!(f, "body '{}': {}", name, reason),
            CatalogError::DuplicateName(name) => write!(f, "duplicate body name '{}'", name),
            CatalogError::Empty => write!(f, "catalog has no bodies"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = BodyCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.bodies.len(), 8);
        assert_eq!(catalog.bodies[3].name, "Mars");
        assert_eq!(catalog.bodies[2].distance, 12.0);
    }

    #[test]
    fn json_survives_host_round_trip() {
        let catalog = BodyCatalog::default();
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"Neptune\""));
        assert_eq!(BodyCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BodyCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn rejects_bad_bodies() {
        let mut catalog = BodyCatalog::default();
        catalog.bodies[0].distance = 0.0;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::Invalid { ref name, .. }) if name == "Mercury"
        ));

        let mut catalog = BodyCatalog::default();
        catalog.bodies[1].speed = f64::NAN;
        assert!(matches!(catalog.validate(), Err(CatalogError::Invalid { .. })));

        let mut catalog = BodyCatalog::default();
        catalog.bodies[1].name = "Mercury".to_string();
        assert!(matches!(catalog.validate(), Err(CatalogError::DuplicateName(_))));

        let mut catalog = BodyCatalog::default();
        catalog.bodies.clear();
        assert!(matches!(catalog.validate(), Err(CatalogError::Empty)));
    }

    #[test]
    fn error_messages_name_the_body() {
        let err = CatalogError::Invalid { name: "Venus".to_string(), reason: "radius must be positive" };
        assert_eq!(err.to_string(), "body 'Venus': radius must be positive");
    }
}
