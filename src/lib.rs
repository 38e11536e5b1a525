//! # visplot
//!
//! Publication-style statistical and map figures, rendered natively.
//!
//! This library provides the building blocks for the figure layouts our
//! analysis pipelines produce: pairwise parameter grids with optional
//! density colouring, and multi-panel base maps in fixed projections.
//!
//! ## Key Features
//!
//! - **Pair grids**: Scatter matrices over column-normalized parameters,
//!   with optional mirrored raw-value panels below the diagonal
//! - **Density colouring**: Gaussian kernel density estimates colour each
//!   point cloud, with a logged flat-colour fallback
//! - **Matplotlib-inspired colormaps**: Named gradients with data-range
//!   mapping and a shared colour scale for colorbars
//! - **Map panels**: Global and north-polar views with land polygons,
//!   dashed graticules and caption boxes
//!
//! ## Architecture
//!
//! - **Parameters**: Validated name/sample tables with per-column
//!   normalization
//! - **Layout**: Pure cell and tick-placement rules, kept separate from
//!   drawing so they stay testable
//! - **Rendering**: plotters-based drawing onto any backend, plus PNG
//!   file convenience wrappers

pub mod colormaps;
pub mod config;
pub mod density;
pub mod error;
pub mod logging;
pub mod map;
pub mod pairgrid;
pub mod params;

pub use colormaps::{get_colormap, parse_color, Colormap, COLORMAP_NAMES};
pub use config::{Args, MapStyle, PairGridConfig, PlotConfig};
pub use density::GaussianKde2;
pub use error::{Result, VisplotError};
pub use logging::{init_tracing, log_error, log_timed_operation};
pub use map::{draw_base_map, get_view, map_grid, text_box, MapView, Projection};
pub use pairgrid::{pair_plot, render_pair_grid, ColorScale, PairGridHandles, PairGridReport};
pub use params::ParameterSet;
