//! visplot - render sample statistical and map figures
//!
//! This is the main entry point for the visplot demo renderer. It
//! generates a seeded synthetic parameter table, renders a pair grid
//! with a colorbar, and renders a two-panel map figure.

use std::path::Path;

use ndarray::Array2;
use plotters::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use visplot::logging::{init_tracing, log_error, log_timed_operation};
use visplot::map::{draw_markers, get_view, map_grid, text_box};
use visplot::pairgrid::{draw_colorbar, render_pair_grid};
use visplot::{ParameterSet, PlotConfig, Result, VisplotError};

/// Names given to the first demo parameters; extras fall back to p<i>.
const PARAM_NAMES: [&str; 8] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
];

/// Width in pixels of the colorbar strip beside the pair grid.
const COLORBAR_WIDTH: u32 = 120;

fn main() -> Result<()> {
    // Initialize tracing with default level first
    init_tracing("info");

    info!("Starting visplot v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let (config, args) = PlotConfig::load().map_err(|e| {
        log_error(&e, "loading configuration");
        e
    })?;

    // Validate configuration
    config.validate().map_err(|e| {
        log_error(&e, "validating configuration");
        e
    })?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &args.log_level);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    info!(
        params = args.params,
        samples = args.samples,
        seed = args.seed,
        "Generating synthetic samples"
    );
    let params = synthetic_parameters(args.params, args.samples, args.seed)?;
    let metric = sample_metric(&params);

    // When density coloring is on, the metric stays out of the figure so
    // the estimated density drives the colors instead.
    let data = if config.pair_grid.density {
        None
    } else {
        Some(metric.as_slice())
    };

    let grid_path = args.output_dir.join("pair_grid.png");
    log_timed_operation("pair_grid", || {
        render_grid_figure(&grid_path, &params, data, &config)
    })?;
    info!(path = %grid_path.display(), "Pair grid written");

    let map_path = args.output_dir.join("map_panels.png");
    log_timed_operation("map_panels", || {
        render_map_figure(&map_path, &args.view, &config)
    })?;
    info!(path = %map_path.display(), "Map figure written");

    info!("All figures rendered");
    Ok(())
}

/// Build a seeded parameter table with visible cross-correlations.
fn synthetic_parameters(n: usize, m: usize, seed: u64) -> Result<ParameterSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = Array2::zeros((m, n));
    for i in 0..m {
        // A shared latent draw keeps the columns correlated.
        let latent: f64 = rng.gen_range(0.0..1.0);
        for j in 0..n {
            let weight = (j + 1) as f64 / n as f64;
            let noise: f64 = rng.gen_range(-0.5..0.5);
            values[[i, j]] = j as f64 + latent * weight + noise * (1.0 - 0.5 * weight);
        }
    }
    let names = (0..n)
        .map(|j| match PARAM_NAMES.get(j) {
            Some(name) => name.to_string(),
            None => format!("p{}", j),
        })
        .collect();
    ParameterSet::new(names, values)
}

/// A per-sample score to color the scatters by: distance from the
/// column means.
fn sample_metric(params: &ParameterSet) -> Vec<f64> {
    let values = params.values();
    let m = values.nrows() as f64;
    let means: Vec<f64> = (0..values.ncols())
        .map(|j| values.column(j).sum() / m)
        .collect();
    (0..values.nrows())
        .map(|i| {
            means
                .iter()
                .enumerate()
                .map(|(j, mean)| (values[[i, j]] - mean).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// Render the pair grid with a colorbar strip on the right.
fn render_grid_figure(
    path: &Path,
    params: &ParameterSet,
    data: Option<&[f64]>,
    config: &PlotConfig,
) -> Result<()> {
    let width = config.pair_grid.width + COLORBAR_WIDTH;
    let height = config.pair_grid.height;

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(VisplotError::render)?;
    let (grid_area, bar_area) = root.split_horizontally(config.pair_grid.width as i32);

    let handles = render_pair_grid(&grid_area, params, data, &config.pair_grid)?;
    if let Some(scale) = handles.color_scale.as_ref() {
        draw_colorbar(&bar_area, scale)?;
    }

    root.present().map_err(VisplotError::render)?;
    Ok(())
}

/// Render a two-panel map figure with demo sites and a caption.
fn render_map_figure(path: &Path, view_name: &str, config: &PlotConfig) -> Result<()> {
    let view = get_view(view_name)?;
    let land = demo_land();
    // A few northern observatories, as (lon, lat).
    let sites = [
        (37.6, 55.7),
        (11.3, 47.3),
        (-21.9, 64.1),
        (139.7, 35.7),
        (-105.3, 40.0),
    ];

    let root =
        BitMapBackend::new(path, (config.map.width, config.map.height)).into_drawing_area();
    root.fill(&WHITE).map_err(VisplotError::render)?;

    let panels = map_grid(&root, 1, 2, &view, &config.map, &land)?;
    for panel in &panels {
        draw_markers(panel, &view, &sites, RGBColor(0x00, 0x5f, 0x73), 4)?;
    }
    text_box(
        &panels[0],
        "demo sites",
        (0.5, 0.95),
        config.map.caption_font,
    )?;

    root.present().map_err(VisplotError::render)?;
    Ok(())
}

/// Coarse stand-in rings for the demo; real callers pass their own
/// coastline geometry.
fn demo_land() -> Vec<Vec<(f64, f64)>> {
    vec![
        // Eurasia, very roughly.
        vec![
            (-10.0, 36.0),
            (3.0, 43.0),
            (30.0, 45.0),
            (60.0, 40.0),
            (100.0, 35.0),
            (122.0, 40.0),
            (140.0, 50.0),
            (170.0, 65.0),
            (140.0, 72.0),
            (80.0, 73.0),
            (40.0, 68.0),
            (10.0, 60.0),
            (-5.0, 48.0),
        ],
        // Northern Africa.
        vec![
            (-15.0, 12.0),
            (10.0, 5.0),
            (42.0, 12.0),
            (35.0, 30.0),
            (10.0, 34.0),
            (-8.0, 32.0),
        ],
    ]
}
