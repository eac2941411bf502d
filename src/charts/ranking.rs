//! Country ranking chart
//!
//! Horizontal bars in ascending score order, lowest score on the top row,
//! each annotated with its integer score.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{format_signed, ChartTheme, RenderError, RenderResult};
use crate::data::CountryScore;

pub const SIZE: (u32, u32) = (1000, 600);

pub const SCORE_LABEL: &str = "랭킹 점수";
pub const SCORE_UNIT: &str = "점";

/// Flat bar color (matplotlib's `skyblue`)
const BAR: RGBColor = RGBColor(0x87, 0xCE, 0xEB);

/// Annotation text for a bar, e.g. `95점`
pub fn score_label(score: f64) -> String {
    format!("{}{}", score.trunc() as i64, SCORE_UNIT)
}

pub fn render(ranking: &[CountryScore], theme: &ChartTheme) -> RenderResult<String> {
    if ranking.is_empty() {
        return Err(RenderError::EmptyDataset("ranking"));
    }

    let rows = ranking.len() as i32;
    // Row 0 is the bottom of the chart
    let row_of = |index: usize| rows - 1 - index as i32;
    let names_by_row: Vec<&str> = ranking.iter().rev().map(|c| c.country.as_str()).collect();

    let max_score = ranking.iter().map(|c| c.score).fold(0.0, f64::max);

    let family = theme.font_family.as_str();
    let ascii_minus = theme.ascii_minus;
    let score_axis = move |v: &f64| format_signed(*v, ascii_minus);
    let country_axis = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(row) => usize::try_from(*row)
            .ok()
            .and_then(|row| names_by_row.get(row))
            .map(|name| name.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(110)
            .build_cartesian_2d(
                0f64..(max_score * 1.12).max(1.0),
                (0..rows - 1).into_segmented(),
            )?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(ranking.len())
            .x_desc(SCORE_LABEL)
            .x_label_formatter(&score_axis)
            .y_label_formatter(&country_axis)
            .label_style((family, theme.label_size))
            .axis_desc_style((family, theme.desc_size))
            .draw()?;

        let bars = Histogram::horizontal(&chart)
            .style(BAR.filled())
            .margin(10)
            .data(
                ranking
                    .iter()
                    .enumerate()
                    .map(|(index, c)| (row_of(index), c.score)),
            );
        chart.draw_series(bars)?;

        let value_style = TextStyle::from((family, theme.label_size).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));

        chart.draw_series(ranking.iter().enumerate().map(|(index, c)| {
            Text::new(
                score_label(c.score),
                (c.score + 1.0, SegmentValue::CenterOf(row_of(index))),
                value_style.clone(),
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
    fn test_score_label_truncates() {
        assert_eq!(score_label(95.0), "95점");
        assert_eq!(score_label(82.7), "82점");
    }

    #[test]
    fn test_every_bar_is_annotated() {
        let data = BuiltinDatasets.load();
        let svg = render(&data.ranking, &ChartTheme::default()).unwrap();

        for country in &data.ranking {
            assert!(svg.contains(&score_label(country.score)));
        }
        assert!(svg.contains(SCORE_LABEL));
    }

    #[test]
    fn test_empty_ranking_is_an_error() {
        assert!(matches!(
            render(&[], &ChartTheme::default()),
            Err(RenderError::EmptyDataset("ranking"))
        ));
    }
}
