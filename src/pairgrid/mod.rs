//! Pairwise-parameter grid rendering.
//!
//! [`render_pair_grid`] splits a drawing area into an n×n grid: the upper
//! triangle holds scatter plots of each parameter pair rescaled to [0, 1],
//! the diagonal holds parameter-name labels, and the lower triangle either
//! stays blank or (in mirror mode) repeats each pair as a scatter of the
//! raw values. Tick labels appear only along grid edges, following the
//! pure rules in [`ticks`].
//!
//! Point coloring precedence: a caller-supplied per-sample array wins,
//! then the density flag (Gaussian KDE, falling back to a flat color with
//! a logged warning when the estimate fails), then the configured flat
//! color. Mirrored cells always use the flat color.

pub mod layout;
pub mod ticks;

pub use layout::{plan_cells, CellKind, CellPlan};
pub use ticks::{mirror_tick_policy, upper_tick_policy, TickPolicy, TICK_VALUES};

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, warn};

use crate::colormaps::{get_colormap, parse_color, Colormap};
use crate::config::PairGridConfig;
use crate::density::GaussianKde2;
use crate::error::{Result, VisplotError};
use crate::params::ParameterSet;

/// Padding beyond the [0, 1] range of normalized cells.
const NORM_PAD: f64 = 0.05;
/// Fraction of the raw span used to pad mirrored cells.
const RAW_PAD: f64 = 0.05;

/// Color range of the last color-mapped scatter, for colorbar attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
    pub colormap: String,
}

/// Handles returned by [`render_pair_grid`].
///
/// `root` is the figure-level area, `last_cell` the most recently
/// populated cell (the bottom-right diagonal label), and `color_scale`
/// the range of the last color-mapped scatter. Together these give a
/// caller what it needs to attach a colorbar next to the grid, typically
/// via [`draw_colorbar`].
pub struct PairGridHandles<DB: DrawingBackend> {
    pub root: DrawingArea<DB, Shift>,
    pub last_cell: Option<DrawingArea<DB, Shift>>,
    pub color_scale: Option<ColorScale>,
    pub cells_drawn: usize,
}

/// Summary returned by the file-writing convenience [`pair_plot`].
#[derive(Debug, Clone)]
pub struct PairGridReport {
    pub cells_drawn: usize,
    pub color_scale: Option<ColorScale>,
}

enum PointColors {
    Mapped {
        values: Vec<f64>,
        vmin: f64,
        vmax: f64,
    },
    Flat(RGBColor),
}

/// Render a pair grid onto `root`.
///
/// `data`, when present, colors every scatter point by the corresponding
/// per-sample value; its length must match the sample count. The area is
/// drawn as-is, so callers normally fill it with a background color
/// first.
pub fn render_pair_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    params: &ParameterSet,
    data: Option<&[f64]>,
    config: &PairGridConfig,
) -> Result<PairGridHandles<DB>> {
    config.validate()?;

    let n = params.len();
    if n == 0 {
        return Err(VisplotError::InvalidParameter {
            param: "param_names".to_string(),
            message: "parameter set is empty".to_string(),
        });
    }
    if let Some(values) = data {
        if values.len() != params.samples() {
            return Err(VisplotError::InvalidParameter {
                param: "data".to_string(),
                message: format!(
                    "coloring array has {} values but there are {} samples",
                    values.len(),
                    params.samples()
                ),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VisplotError::InvalidParameter {
                param: "data".to_string(),
                message: "coloring array contains non-finite values".to_string(),
            });
        }
    }

    let normalized = params.normalized()?;
    let colormap = get_colormap(&config.colormap)?;
    let flat = parse_color(&config.flat_color)?;
    let fallback = parse_color(&config.fallback_color)?;

    // External coloring shares one scale across all cells.
    let data_scale = data.map(|values| {
        let (lo, hi) = slice_extent(values);
        (config.vmin.unwrap_or(lo), config.vmax.unwrap_or(hi))
    });

    let cells = root.split_evenly((n, n));
    let plan = plan_cells(n, config.mirror);

    let mut last_cell = None;
    let mut color_scale = None;
    let mut cells_drawn = 0usize;

    for cell_plan in &plan {
        let cell = &cells[cell_plan.row * n + cell_plan.col];
        let (a, b) = cell_plan.pair;
        match cell_plan.kind {
            CellKind::Diagonal => {
                draw_label_cell(cell, &params.names()[a], config)?;
            }
            CellKind::Upper => {
                let x = normalized.column(b).to_vec();
                let y = normalized.column(a).to_vec();
                let colors = if let (Some(values), Some((vmin, vmax))) = (data, data_scale) {
                    PointColors::Mapped {
                        values: values.to_vec(),
                        vmin,
                        vmax,
                    }
                } else if config.density {
                    match GaussianKde2::fit(&x, &y) {
                        Ok(kde) => {
                            let values = kde.evaluate_many(&x, &y);
                            let (vmin, vmax) = slice_extent(&values);
                            PointColors::Mapped { values, vmin, vmax }
                        }
                        Err(err) => {
                            warn!(
                                pair = ?cell_plan.pair,
                                error = %err,
                                "density estimate failed, falling back to flat color"
                            );
                            PointColors::Flat(fallback)
                        }
                    }
                } else {
                    PointColors::Flat(flat)
                };
                if let PointColors::Mapped { vmin, vmax, .. } = &colors {
                    color_scale = Some(ColorScale {
                        vmin: *vmin,
                        vmax: *vmax,
                        colormap: colormap.name().to_string(),
                    });
                }
                let policy = upper_tick_policy(cell_plan.row, cell_plan.col, n);
                let range = -NORM_PAD..1.0 + NORM_PAD;
                draw_scatter_cell(
                    cell,
                    &x,
                    &y,
                    range.clone(),
                    range,
                    &colors,
                    &colormap,
                    policy,
                    config,
                )?;
            }
            CellKind::Mirror => {
                let x = params.column(a).to_vec();
                let y = params.column(b).to_vec();
                let policy = mirror_tick_policy(cell_plan.row, cell_plan.col, n);
                draw_scatter_cell(
                    cell,
                    &x,
                    &y,
                    padded_range(params.column_extent(a)),
                    padded_range(params.column_extent(b)),
                    &PointColors::Flat(flat),
                    &colormap,
                    policy,
                    config,
                )?;
            }
        }
        last_cell = Some(cell.clone());
        cells_drawn += 1;
    }

    debug!(
        cells = cells_drawn,
        n,
        mirror = config.mirror,
        "pair grid rendered"
    );

    Ok(PairGridHandles {
        root: root.clone(),
        last_cell,
        color_scale,
        cells_drawn,
    })
}

/// Render a pair grid into a PNG file and return a summary.
pub fn pair_plot<P: AsRef<Path>>(
    path: P,
    params: &ParameterSet,
    data: Option<&[f64]>,
    config: &PairGridConfig,
) -> Result<PairGridReport> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(VisplotError::render)?;

    let handles = render_pair_grid(&root, params, data, config)?;
    root.present().map_err(VisplotError::render)?;

    debug!(path = %path.display(), cells = handles.cells_drawn, "pair grid written");
    Ok(PairGridReport {
        cells_drawn: handles.cells_drawn,
        color_scale: handles.color_scale,
    })
}

/// Draw a vertical colorbar for `scale` onto `area`.
///
/// Meant for the area a caller reserves next to the grid; labels sit on
/// the right edge.
pub fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: &ColorScale,
) -> Result<()> {
    let cmap = get_colormap(&scale.colormap)?;
    // Guard against a flat scale so the chart keeps a nonzero span.
    let (vmin, vmax) = if scale.vmax > scale.vmin {
        (scale.vmin, scale.vmax)
    } else {
        (scale.vmin - 0.5, scale.vmin + 0.5)
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Right, 48)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(VisplotError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(6)
        .label_style(("sans-serif", 12))
        .axis_style(BLACK.mix(0.5))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()
        .map_err(VisplotError::render)?;

    let steps = 128;
    let span = (vmax - vmin) / steps as f64;
    chart
        .draw_series((0..steps).map(|i| {
            let lo = vmin + i as f64 * span;
            Rectangle::new(
                [(0.0, lo), (1.0, lo + span)],
                cmap.map(lo + span * 0.5, vmin, vmax).filled(),
            )
        }))
        .map_err(VisplotError::render)?;

    Ok(())
}

fn padded_range((lo, hi): (f64, f64)) -> Range<f64> {
    let pad = (hi - lo) * RAW_PAD;
    (lo - pad)..(hi + pad)
}

fn slice_extent(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    (lo, hi)
}

#[allow(clippy::too_many_arguments)]
fn draw_scatter_cell<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    x_range: Range<f64>,
    y_range: Range<f64>,
    colors: &PointColors,
    colormap: &Colormap,
    policy: TickPolicy,
    config: &PairGridConfig,
) -> Result<()> {
    let mut builder = ChartBuilder::on(cell);
    builder.margin(2);
    if policy.shows_top() {
        builder.set_label_area_size(LabelAreaPosition::Top, 18);
    }
    if policy.shows_bottom() {
        builder.set_label_area_size(LabelAreaPosition::Bottom, 18);
    }
    if policy.shows_left() {
        builder.set_label_area_size(LabelAreaPosition::Left, 30);
    }
    if policy.shows_right() {
        builder.set_label_area_size(LabelAreaPosition::Right, 30);
    }

    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(VisplotError::render)?;

    let x_labels = if policy.has_x_labels() {
        TICK_VALUES.len()
    } else {
        0
    };
    let y_labels = if policy.has_y_labels() {
        TICK_VALUES.len()
    } else {
        0
    };
    let fmt = |v: &f64| format!("{:.1}", v);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(x_labels)
        .y_labels(y_labels)
        .x_label_formatter(&fmt)
        .y_label_formatter(&fmt)
        .label_style(("sans-serif", 11))
        .axis_style(BLACK.mix(0.5))
        .draw()
        .map_err(VisplotError::render)?;

    // Cell frame; the mesh only draws axis lines along labelled edges.
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [
                (x_range.start, y_range.start),
                (x_range.end, y_range.end),
            ],
            BLACK.mix(0.35),
        )))
        .map_err(VisplotError::render)?;

    let marker = config.marker_size as i32;
    match colors {
        PointColors::Mapped { values, vmin, vmax } => {
            chart
                .draw_series(x.iter().zip(y.iter()).zip(values.iter()).map(
                    |((&px, &py), &v)| {
                        Circle::new((px, py), marker, colormap.map(v, *vmin, *vmax).filled())
                    },
                ))
                .map_err(VisplotError::render)?;
        }
        PointColors::Flat(color) => {
            let style = color.filled();
            chart
                .draw_series(
                    x.iter()
                        .zip(y.iter())
                        .map(|(&px, &py)| Circle::new((px, py), marker, style)),
                )
                .map_err(VisplotError::render)?;
        }
    }

    Ok(())
}

fn draw_label_cell<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    name: &str,
    config: &PairGridConfig,
) -> Result<()> {
    let (w, h) = cell.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", config.label_font as i32).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    cell.draw(&Text::new(
        name.to_string(),
        (w as i32 / 2, h as i32 / 2),
        style,
    ))
    .map_err(VisplotError::render)?;
    Ok(())
}
