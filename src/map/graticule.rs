//! Graticule polylines for map panels.
//!
//! Meridians and parallels are sampled in lon/lat, projected, and
//! clipped to the view extent. A line leaving and re-entering the
//! window is split into separate polylines.

use super::projection::Projection;
use super::views::MapView;

/// Sampling step along each meridian and parallel, in degrees.
const SAMPLE_STEP: f64 = 1.0;

/// Candidate spacings in degrees, largest first. These are the spacings
/// the axis labeller also lands on, so labels line up with the lines.
const STEP_MENU: [f64; 7] = [100.0, 50.0, 20.0, 10.0, 5.0, 2.0, 1.0];

/// Choose (meridian, parallel) spacing in degrees for a view.
pub fn graticule_steps(view: &MapView) -> (f64, f64) {
    match view.projection {
        Projection::Equirectangular => {
            let lon_span = view.extent[1] - view.extent[0];
            let lat_span = view.extent[3] - view.extent[2];
            (pick_step(lon_span), pick_step(lat_span))
        }
        // Metric extents say nothing about degrees; use a fixed spacing
        // suited to the polar views.
        Projection::LambertAzimuthalEqualArea { .. } => (30.0, 15.0),
    }
}

fn pick_step(span: f64) -> f64 {
    for step in STEP_MENU {
        if span / step >= 4.0 {
            return step;
        }
    }
    1.0
}

/// Multiples of `step` inside [lo, hi], inclusive of the endpoints.
pub fn multiples_within(step: f64, lo: f64, hi: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut v = (lo / step).ceil() * step;
    while v <= hi + 1e-9 {
        out.push(v);
        v += step;
    }
    out
}

/// Build the graticule for `view` as projected, clipped polylines.
pub fn graticule(view: &MapView, lon_step: f64, lat_step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut lines = Vec::new();

    for lon in multiples_within(lon_step, -180.0, 180.0) {
        let meridian: Vec<(f64, f64)> = sample_range(-90.0, 90.0)
            .map(|lat| view.projection.project(lon, lat))
            .collect();
        lines.extend(clip_polyline(view, meridian));
    }

    for lat in multiples_within(lat_step, -90.0, 90.0) {
        // The poles are points, not lines.
        if lat.abs() >= 90.0 - 1e-9 {
            continue;
        }
        let parallel: Vec<(f64, f64)> = sample_range(-180.0, 180.0)
            .map(|lon| view.projection.project(lon, lat))
            .collect();
        lines.extend(clip_polyline(view, parallel));
    }

    lines
}

fn sample_range(lo: f64, hi: f64) -> impl Iterator<Item = f64> {
    let count = ((hi - lo) / SAMPLE_STEP).round() as usize;
    (0..=count).map(move |i| lo + i as f64 * SAMPLE_STEP)
}

/// Keep the runs of consecutive in-window points, dropping single
/// stranded vertices.
fn clip_polyline(view: &MapView, points: Vec<(f64, f64)>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for point in points {
        if view.contains(point) {
            current.push(point);
        } else if current.len() >= 2 {
            runs.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}
