//! Colormap lookup and color parsing utilities.
//!
//! Gradients are resolved by name so configurations can carry plain
//! strings. Unknown names are rejected with the supported set in the
//! error message.

use plotters::style::RGBColor;

use crate::error::{Result, VisplotError};

/// Names accepted by [`get_colormap`].
pub const COLORMAP_NAMES: [&str; 10] = [
    "bupu", "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "blues", "greys",
    "spectral",
];

/// A named color gradient.
pub struct Colormap {
    name: String,
    gradient: colorgrad::Gradient,
}

impl Colormap {
    /// Color at a normalized position, clamped to [0, 1].
    pub fn sample(&self, t: f64) -> RGBColor {
        let [r, g, b, _] = self.gradient.at(t.clamp(0.0, 1.0)).to_rgba8();
        RGBColor(r, g, b)
    }

    /// Map a value to a color given the data range.
    ///
    /// A degenerate range (max <= min) maps everything to the midpoint
    /// color.
    pub fn map(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.sample(t)
    }

    /// Get the name of this colormap
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colormap").field("name", &self.name).finish()
    }
}

/// Get a colormap by name (case-insensitive).
pub fn get_colormap(name: &str) -> Result<Colormap> {
    let key = name.to_lowercase();
    let gradient = match key.as_str() {
        "bupu" => colorgrad::bu_pu(),
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),
        "blues" => colorgrad::blues(),
        "greys" => colorgrad::greys(),
        "spectral" => colorgrad::spectral(),
        _ => {
            return Err(VisplotError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!(
                    "Unknown colormap: {} (supported: {})",
                    name,
                    COLORMAP_NAMES.join(", ")
                ),
            })
        }
    };
    Ok(Colormap {
        name: key,
        gradient,
    })
}

/// Parse a `#rrggbb` hex string into a plotters color.
pub fn parse_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // from_str_radix also accepts a sign, so check the digits ourselves.
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(VisplotError::InvalidParameter {
            param: "color".to_string(),
            message: format!("expected #rrggbb, got '{}'", hex),
        });
    }
    let v = u32::from_str_radix(digits, 16).map_err(|_| VisplotError::InvalidParameter {
        param: "color".to_string(),
        message: format!("expected #rrggbb, got '{}'", hex),
    })?;
    Ok(RGBColor((v >> 16) as u8, (v >> 8) as u8, v as u8))
}
