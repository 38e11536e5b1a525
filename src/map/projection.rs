//! Forward map projections for the named views.
//!
//! Only what the view presets need: an equirectangular pass-through in
//! degrees and a spherical Lambert azimuthal equal-area projection in
//! metres. Inverse projection is out of scope.

use std::str::FromStr;

use crate::error::{Result, VisplotError};

/// Mean Earth radius in metres, used by the azimuthal projection.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Forward projection from (lon, lat) in degrees to map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Plate carrée: map coordinates are degrees, unchanged.
    Equirectangular,
    /// Spherical Lambert azimuthal equal-area centred on the given point,
    /// map coordinates in metres.
    LambertAzimuthalEqualArea { center_lon: f64, center_lat: f64 },
}

impl Projection {
    /// Project a (lon, lat) pair in degrees.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::Equirectangular => (lon, lat),
            Projection::LambertAzimuthalEqualArea {
                center_lon,
                center_lat,
            } => {
                let lam = (lon - center_lon).to_radians();
                let phi = lat.to_radians();
                let phi0 = center_lat.to_radians();
                // k = R * sqrt(2 / (1 + sin φ0 sin φ + cos φ0 cos φ cos λ)).
                let denom =
                    1.0 + phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * lam.cos();
                // The denominator vanishes at the antipode of the centre,
                // where the projection has no single image. Place that
                // point far outside any plausible extent so clipping
                // drops it.
                if denom < 1e-9 {
                    return (4.0 * EARTH_RADIUS_M, 4.0 * EARTH_RADIUS_M);
                }
                let k = (2.0 / denom).sqrt() * EARTH_RADIUS_M;
                let x = k * phi.cos() * lam.sin();
                let y = k * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * lam.cos());
                (x, y)
            }
        }
    }

    /// Create a Projection from a string
    pub fn parse_projection(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "equirectangular" | "platecarree" => Ok(Projection::Equirectangular),
            lower if lower.starts_with("laea:") => {
                // Custom azimuthal centre as "laea:<lon>,<lat>"
                let parts: Vec<&str> = lower
                    .trim_start_matches("laea:")
                    .split(',')
                    .collect();
                if parts.len() == 2 {
                    if let (Ok(center_lon), Ok(center_lat)) =
                        (parts[0].parse::<f64>(), parts[1].parse::<f64>())
                    {
                        return Ok(Projection::LambertAzimuthalEqualArea {
                            center_lon,
                            center_lat,
                        });
                    }
                }
                Err(VisplotError::InvalidParameter {
                    param: "projection".to_string(),
                    message: format!("Invalid azimuthal projection format: {}", s),
                })
            }
            _ => Err(VisplotError::InvalidParameter {
                param: "projection".to_string(),
                message: format!("Unknown projection: {}", s),
            }),
        }
    }
}

impl FromStr for Projection {
    type Err = VisplotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Projection::parse_projection(s)
    }
}
