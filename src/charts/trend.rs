//! Accident trend chart
//!
//! Injury bars on the left axis, fatality line on the right axis,
//! both keyed by year.

use plotters::prelude::*;

use super::{format_signed, headroom, ChartTheme, RenderError, RenderResult};
use crate::data::TrendRow;

pub const SIZE: (u32, u32) = (1000, 500);

pub const INJURY_LABEL: &str = "부상자 수";
pub const FATALITY_LABEL: &str = "사망자 수";

const INJURY_BAR: RGBColor = RGBColor(0xAE, 0xD6, 0xF1);
const FATALITY_LINE: RGBColor = RGBColor(0xE7, 0x4C, 0x3C);

fn year_label(value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(year) => year.to_string(),
        _ => String::new(),
    }
}

pub fn render(rows: &[TrendRow], theme: &ChartTheme) -> RenderResult<String> {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (first.year, last.year),
        _ => return Err(RenderError::EmptyDataset("trend")),
    };

    let max_injuries = rows.iter().map(|r| r.injuries).max().unwrap_or(0);
    let max_fatalities = rows.iter().map(|r| r.fatalities).max().unwrap_or(0);

    let family = theme.font_family.as_str();
    let ascii_minus = theme.ascii_minus;
    let value_label = move |v: &f64| format_signed(*v, ascii_minus);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .right_y_label_area_size(70)
            .build_cartesian_2d(
                (first..last).into_segmented(),
                0f64..headroom(f64::from(max_injuries)),
            )?
            .set_secondary_coord(
                (first..last).into_segmented(),
                0f64..headroom(f64::from(max_fatalities)),
            );

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(INJURY_LABEL)
            .x_label_formatter(&year_label)
            .y_label_formatter(&value_label)
            .label_style((family, theme.label_size))
            .y_label_style((family, theme.label_size).into_font().color(&BLUE))
            .axis_desc_style((family, theme.desc_size).into_font().color(&BLUE))
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc(FATALITY_LABEL)
            .x_label_formatter(&year_label)
            .y_label_formatter(&value_label)
            .label_style((family, theme.label_size).into_font().color(&RED))
            .axis_desc_style((family, theme.desc_size).into_font().color(&RED))
            .draw()?;

        let bars = Histogram::vertical(&*chart)
            .style(INJURY_BAR.filled())
            .margin(12)
            .data(rows.iter().map(|r| (r.year, f64::from(r.injuries))));
        chart.draw_series(bars)?;

        chart.draw_secondary_series(LineSeries::new(
            rows.iter()
                .map(|r| (SegmentValue::CenterOf(r.year), f64::from(r.fatalities))),
            FATALITY_LINE.stroke_width(3),
        ))?;

        chart.draw_secondary_series(rows.iter().map(|r| {
            Circle::new(
                (SegmentValue::CenterOf(r.year), f64::from(r.fatalities)),
                6u32,
                FATALITY_LINE.filled(),
            )
        }))?;

        root.present()?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BuiltinDatasets, DatasetSource};

    #[test]
    fn test_renders_both_axes() {
        let data = BuiltinDatasets.load();
        let svg = render(&data.trend, &ChartTheme::default()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(INJURY_LABEL));
        assert!(svg.contains(FATALITY_LABEL));
        assert!(svg.contains("2019"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_empty_trend_is_an_error() {
        let err = render(&[], &ChartTheme::default()).unwrap_err();
        assert!(matches!(err, RenderError::EmptyDataset("trend")));
    }
}
