//! Map-figure helpers.
//!
//! Splits a drawing area into panels and draws a base map on each:
//! caller-supplied land polygons, a dashed graticule, and degree labels
//! on the bottom and left edges where the projection is geographic.
//! Nothing here loads coastline datasets; land geometry comes in as
//! lon/lat rings.

pub mod graticule;
pub mod projection;
pub mod views;

pub use graticule::{graticule, graticule_steps, multiples_within};
pub use projection::{Projection, EARTH_RADIUS_M};
pub use views::{get_view, MapView, VIEW_NAMES};

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::config::MapStyle;
use crate::error::{Result, VisplotError};

/// Build a chart over the view extent with the panel geometry every
/// overlay must share. Geographic views reserve bottom and left label
/// areas; metric views get the full panel.
fn build_panel_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    view: &MapView,
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(8);
    if view.projection == Projection::Equirectangular {
        builder.x_label_area_size(24).y_label_area_size(44);
    }
    builder
        .build_cartesian_2d(view.x_range(), view.y_range())
        .map_err(VisplotError::render)
}

/// Draw the base map for `view` onto one panel area.
pub fn draw_base_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &MapView,
    style: &MapStyle,
    land: &[Vec<(f64, f64)>],
) -> Result<()> {
    style.validate()?;
    let mut chart = build_panel_chart(area, view)?;

    let (lon_step, lat_step) = graticule_steps(view);
    let (x_labels, y_labels) = if view.projection == Projection::Equirectangular {
        (
            multiples_within(lon_step, view.extent[0], view.extent[1]).len(),
            multiples_within(lat_step, view.extent[2], view.extent[3]).len(),
        )
    } else {
        (0, 0)
    };

    let degrees = |v: &f64| format!("{:.0}°", v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(x_labels)
        .y_labels(y_labels)
        .x_label_formatter(&degrees)
        .y_label_formatter(&degrees)
        .label_style(("sans-serif", 12))
        .axis_style(BLACK.stroke_width(1))
        .draw()
        .map_err(VisplotError::render)?;

    for ring in land {
        if ring.len() < 3 {
            return Err(VisplotError::InvalidParameter {
                param: "land".to_string(),
                message: format!("polygon ring needs at least 3 vertices, got {}", ring.len()),
            });
        }
        let projected: Vec<(f64, f64)> = ring
            .iter()
            .map(|&(lon, lat)| view.projection.project(lon, lat))
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(
                projected.clone(),
                BLACK.mix(style.land_fill_alpha),
            )))
            .map_err(VisplotError::render)?;
        let mut outline = projected;
        outline.push(outline[0]);
        chart
            .draw_series(std::iter::once(PathElement::new(
                outline,
                BLACK.mix(style.land_stroke_alpha),
            )))
            .map_err(VisplotError::render)?;
    }

    if style.gridlines {
        for line in graticule(view, lon_step, lat_step) {
            chart
                .draw_series(DashedLineSeries::new(
                    line,
                    4,
                    3,
                    BLACK.mix(0.4).stroke_width(1),
                ))
                .map_err(VisplotError::render)?;
        }
    }

    // Panel frame.
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [
                (view.extent[0], view.extent[2]),
                (view.extent[1], view.extent[3]),
            ],
            BLACK.stroke_width(1),
        )))
        .map_err(VisplotError::render)?;

    Ok(())
}

/// Split `root` into rows x cols panels, draw the base map on each, and
/// return the panel areas for caller overlays.
pub fn map_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    rows: usize,
    cols: usize,
    view: &MapView,
    style: &MapStyle,
    land: &[Vec<(f64, f64)>],
) -> Result<Vec<DrawingArea<DB, Shift>>> {
    if rows == 0 || cols == 0 {
        return Err(VisplotError::InvalidParameter {
            param: "grid".to_string(),
            message: "map grid needs at least one row and one column".to_string(),
        });
    }
    let panels = root.split_evenly((rows, cols));
    for panel in &panels {
        draw_base_map(panel, view, style, land)?;
    }
    debug!(rows, cols, view = %view.name, "map panels drawn");
    Ok(panels)
}

/// Chart over a panel with the same geometry [`draw_base_map`] used, so
/// overlays drawn through it line up with the base map.
pub fn panel_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    view: &MapView,
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>> {
    build_panel_chart(area, view)
}

/// Scatter (lon, lat) markers onto a panel. Points that project outside
/// the view extent are dropped.
pub fn draw_markers<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &MapView,
    points: &[(f64, f64)],
    color: RGBColor,
    size: u32,
) -> Result<()> {
    let mut chart = build_panel_chart(area, view)?;
    let style = color.filled();
    chart
        .draw_series(
            points
                .iter()
                .map(|&(lon, lat)| view.projection.project(lon, lat))
                .filter(|&p| view.contains(p))
                .map(|p| Circle::new(p, size as i32, style)),
        )
        .map_err(VisplotError::render)?;
    Ok(())
}

/// Draw a bold white caption in a black box, centred at a relative
/// position within `area` (both axes in 0..1, y measured upward).
pub fn text_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    rel_pos: (f64, f64),
    font_size: u32,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let cx = (w as f64 * rel_pos.0).round() as i32;
    let cy = (h as f64 * (1.0 - rel_pos.1)).round() as i32;
    let style = TextStyle::from(
        ("sans-serif", font_size as i32)
            .into_font()
            .style(FontStyle::Bold),
    )
    .color(&WHITE)
    .pos(Pos::new(HPos::Center, VPos::Center));

    let (tw, th) = area
        .estimate_text_size(text, &style)
        .map_err(VisplotError::render)?;
    let pad = font_size as i32 / 2;
    let half_w = tw as i32 / 2 + pad;
    let half_h = th as i32 / 2 + pad;

    area.draw(&Rectangle::new(
        [(cx - half_w, cy - half_h), (cx + half_w, cy + half_h)],
        BLACK.filled(),
    ))
    .map_err(VisplotError::render)?;
    area.draw(&Text::new(text.to_string(), (cx, cy), style))
        .map_err(VisplotError::render)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapStyle;

    fn demo_land() -> Vec<Vec<(f64, f64)>> {
        vec![vec![
            (-10.0, 35.0),
            (40.0, 35.0),
            (60.0, 70.0),
            (-5.0, 60.0),
        ]]
    }

    #[test]
    fn test_base_map_draws_on_global_view() {
        let mut buf = vec![0u8; 800 * 400 * 3];
        {
            let backend = BitMapBackend::with_buffer(&mut buf, (800, 400));
            let root = backend.into_drawing_area();
            root.fill(&WHITE).unwrap();
            let view = get_view("global").unwrap();
            draw_base_map(&root, &view, &MapStyle::default(), &demo_land()).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|&b| b != 255));
    }

    #[test]
    fn test_base_map_draws_on_azimuthal_view() {
        let mut buf = vec![0u8; 600 * 600 * 3];
        {
            let backend = BitMapBackend::with_buffer(&mut buf, (600, 600));
            let root = backend.into_drawing_area();
            root.fill(&WHITE).unwrap();
            let view = get_view("eurasia").unwrap();
            draw_base_map(&root, &view, &MapStyle::default(), &demo_land()).unwrap();
        }
        assert!(buf.iter().any(|&b| b != 255));
    }

    #[test]
    fn test_map_grid_panel_count() {
        let mut buf = vec![0u8; 800 * 400 * 3];
        let backend = BitMapBackend::with_buffer(&mut buf, (800, 400));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).unwrap();
        let view = get_view("global").unwrap();
        let panels = map_grid(&root, 1, 2, &view, &MapStyle::default(), &[]).unwrap();
        assert_eq!(panels.len(), 2);
    }

    #[test]
    fn test_map_grid_rejects_empty_grid() {
        let mut buf = vec![0u8; 100 * 100 * 3];
        let backend = BitMapBackend::with_buffer(&mut buf, (100, 100));
        let root = backend.into_drawing_area();
        let view = get_view("global").unwrap();
        // Result::unwrap_err needs a Debug Ok type, which the panel areas
        // are not.
        for (rows, cols) in [(0, 2), (2, 0)] {
            let err = map_grid(&root, rows, cols, &view, &MapStyle::default(), &[])
                .err()
                .unwrap();
            assert!(matches!(
                err,
                crate::error::VisplotError::InvalidParameter { .. }
            ));
        }
    }

    #[test]
    fn test_degenerate_land_ring_is_rejected() {
        let mut buf = vec![0u8; 200 * 200 * 3];
        let backend = BitMapBackend::with_buffer(&mut buf, (200, 200));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).unwrap();
        let view = get_view("global").unwrap();
        let ring = vec![vec![(0.0, 0.0), (10.0, 10.0)]];
        let err = draw_base_map(&root, &view, &MapStyle::default(), &ring).unwrap_err();
        assert!(err.to_string().contains("at least 3 vertices"));
    }

    #[test]
    fn test_markers_drop_points_outside_extent() {
        let mut buf = vec![0u8; 400 * 400 * 3];
        let backend = BitMapBackend::with_buffer(&mut buf, (400, 400));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).unwrap();
        let view = get_view("eurasia").unwrap();
        // Sydney projects far outside the north-polar window.
        let points = vec![(37.6, 55.7), (151.2, -33.9)];
        draw_markers(&root, &view, &points, RGBColor(200, 30, 30), 4).unwrap();
    }

    #[test]
    fn test_text_box_renders() {
        let mut buf = vec![0u8; 400 * 200 * 3];
        {
            let backend = BitMapBackend::with_buffer(&mut buf, (400, 200));
            let root = backend.into_drawing_area();
            root.fill(&WHITE).unwrap();
            text_box(&root, "2020-01-01", (0.5, 0.95), 14).unwrap();
        }
        // The black box must have produced dark pixels near the top.
        let top_rows = &buf[0..400 * 40 * 3];
        assert!(top_rows.iter().any(|&b| b < 64));
    }
}
