//! Resort point map
//!
//! Equirectangular world grid with one marker per resort. Marker area is
//! proportional to `marker_size`, so the radius scales with its square root.

use plotters::prelude::*;

use super::{format_signed, ChartTheme, RenderError, RenderResult};
use crate::data::{max_marker_size, ResortPoint};

pub const SIZE: (u32, u32) = (800, 460);

pub const CAPTION: &str = "※ 지도 위의 점 크기는 이용자 규모를 나타냅니다.";

const MARKER: RGBColor = RGBColor(0x00, 0x00, 0xFF);
const OCEAN: RGBColor = RGBColor(0xEA, 0xF2, 0xF8);

const MAX_RADIUS: f64 = 24.0;
const MIN_RADIUS: f64 = 3.0;

/// Marker radius in pixels for `size` relative to the largest marker
pub fn marker_radius(size: u64, max_size: u64) -> u32 {
    if max_size == 0 {
        return MIN_RADIUS as u32;
    }
    let ratio = size as f64 / max_size as f64;
    (ratio.sqrt() * MAX_RADIUS).round().max(MIN_RADIUS) as u32
}

pub fn render(resorts: &[ResortPoint], theme: &ChartTheme) -> RenderResult<String> {
    if resorts.is_empty() {
        return Err(RenderError::EmptyDataset("resort"));
    }

    let max_size = max_marker_size(resorts);

    let family = theme.font_family.as_str();
    let ascii_minus = theme.ascii_minus;
    let degrees = move |v: &f64| format_signed(*v, ascii_minus);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(-180f64..180f64, -90f64..90f64)?;

        chart.plotting_area().fill(&OCEAN)?;

        chart
            .configure_mesh()
            .x_labels(13)
            .y_labels(7)
            .x_label_formatter(&degrees)
            .y_label_formatter(&degrees)
            .bold_line_style(WHITE.mix(0.9).stroke_width(1))
            .light_line_style(WHITE.mix(0.4).stroke_width(1))
            .label_style((family, theme.label_size * 0.85))
            .draw()?;

        let name_style = (family, theme.label_size * 0.85).into_font().color(&BLACK);

        chart.draw_series(resorts.iter().map(|r| {
            let radius = marker_radius(r.marker_size, max_size);
            EmptyElement::at((r.longitude, r.latitude))
                + Circle::new((0, 0), radius, MARKER.mix(0.55).filled())
                + Text::new(r.name.clone(), (radius as i32 + 3, -7), name_style.clone())
        }))?;

        root.present()?;
    }

    Ok(svg)
}
