//! Charts
//!
//! Server-side SVG rendering of the three dashboard charts with plotters.
//! Text is emitted as SVG `<text>` in the registered font family, so the
//! browser draws it with the `@font-face` the page declares.
//!
//! - **trend**: injury bars + fatality line on twin y axes
//! - **map**: resort markers sized by user count
//! - **ranking**: horizontal score bars with value labels

mod error;
pub mod map;
pub mod ranking;
pub mod trend;

pub use error::{RenderError, RenderResult};

use crate::data::Datasets;
use crate::font::FontHandle;

/// Drawing settings shared by every chart
#[derive(Debug, Clone)]
pub struct ChartTheme {
    /// CSS font-family list used for all chart text
    pub font_family: String,
    /// Write negative numbers with '-' instead of U+2212
    pub ascii_minus: bool,
    /// Tick label size in px
    pub label_size: f64,
    /// Axis description size in px
    pub desc_size: f64,
}

impl ChartTheme {
    /// Theme whose text uses the registered font
    pub fn new(font: &FontHandle) -> Self {
        Self {
            font_family: font.css_family(),
            ..Default::default()
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_family: crate::font::SYSTEM_FAMILY.to_string(),
            ascii_minus: true,
            label_size: 15.0,
            desc_size: 17.0,
        }
    }
}

/// The charts the dashboard can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Trend,
    Map,
    Ranking,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Trend, ChartKind::Map, ChartKind::Ranking];

    /// URL-safe name
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Trend => "trend",
            ChartKind::Map => "map",
            ChartKind::Ranking => "ranking",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix(".svg").unwrap_or(s);
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == name)
            .ok_or_else(|| RenderError::UnknownChart(s.to_string()))
    }
}

/// Draw one chart from its dataset
pub fn render_chart(
    kind: ChartKind,
    datasets: &Datasets,
    theme: &ChartTheme,
) -> RenderResult<String> {
    let svg = match kind {
        ChartKind::Trend => trend::render(&datasets.trend, theme),
        ChartKind::Map => map::render(&datasets.resorts, theme),
        ChartKind::Ranking => ranking::render(&datasets.ranking, theme),
    }?;

    tracing::debug!(chart = %kind, bytes = svg.len(), "Chart rendered");
    Ok(svg)
}

/// Whole-number axis label; negative values use '-' or U+2212
pub fn format_signed(value: f64, ascii_minus: bool) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let text = format!("{:.0}", rounded);
    if ascii_minus {
        text
    } else {
        text.replacen('-', "\u{2212}", 1)
    }
}

/// Axis upper bound with some room above the tallest value
pub(crate) fn headroom(max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        max * 1.15
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BuiltinDatasets, DatasetSource};

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(-120.0, true), "-120");
        assert_eq!(format_signed(-120.0, false), "\u{2212}120");
        assert_eq!(format_signed(45.4, false), "45");
        assert_eq!(format_signed(-0.3, true), "0");
    }

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!("trend".parse::<ChartKind>().unwrap(), ChartKind::Trend);
        assert_eq!("map.svg".parse::<ChartKind>().unwrap(), ChartKind::Map);
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(RenderError::UnknownChart(name)) if name == "pie"
        ));
    }

    #[test]
    fn test_theme_uses_registered_font() {
        let font = FontHandle::from_bytes(
            "NanumGothic",
            "NanumGothic.ttf",
            b"\x00\x01\x00\x00font".to_vec(),
        )
        .unwrap();
        let theme = ChartTheme::new(&font);
        let data = BuiltinDatasets.load();

        for kind in ChartKind::ALL {
            let svg = render_chart(kind, &data, &theme).unwrap();
            assert!(svg.contains("NanumGothic"), "{} lacks the font family", kind);
        }
    }

    #[test]
    fn test_headroom() {
        assert_eq!(headroom(0.0), 1.0);
        assert!(headroom(100.0) > 100.0);
    }
}
