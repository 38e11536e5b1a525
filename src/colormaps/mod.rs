//! Colormaps and flat colors for scatter coloring.
//!
//! Palette data comes from `colorgrad`; this module wraps it behind a
//! name-keyed registry and converts samples into plotters colors.

pub mod colormap;

pub use colormap::{get_colormap, parse_color, Colormap, COLORMAP_NAMES};
