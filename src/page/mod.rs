//! Dashboard Page
//!
//! Lays out the title, divider and three tabs, and binds each dataset to
//! its chart. Tabs switch with CSS radio inputs, so the page needs no
//! JavaScript.

use askama::Template;
use reqwest::Url;
use std::path::Path;

use crate::charts::{self, ChartKind, ChartTheme, RenderResult};
use crate::data::{Datasets, ResortPoint};
use crate::font::FontHandle;

pub const PAGE_TITLE: &str = "스노보드 대시보드";
pub const PAGE_ICON: &str = "🏂";
pub const HEADING: &str = "🏂 Snowboard Extreme Data";

pub const TREND_SUBHEADER: &str = "연도별 사망자 및 부상자 추이";
pub const MAP_SUBHEADER: &str = "🌍 전세계 스키장 위치 및 이용자 순위";
pub const RANKING_SUBHEADER: &str = "🏂 스노보드 강국 랭킹";
pub const TABLE_TITLE: &str = "📊 스키장 이용자 순위";

/// A tab header
#[derive(Debug, Clone, Copy)]
pub struct Tab {
    pub id: &'static str,
    pub label: &'static str,
}

pub const TABS: [Tab; 3] = [
    Tab {
        id: "trend",
        label: "📉 1. 사고 추이",
    },
    Tab {
        id: "map",
        label: "🗺️ 2. 스키장 지도",
    },
    Tab {
        id: "ranking",
        label: "🏆 3. 국가 순위",
    },
];

/// One row of the resort ranking table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResortTableRow {
    pub rank: u32,
    pub name: String,
    pub user_count: u32,
}

/// Resort table rows ordered by rank
pub fn resort_table(resorts: &[ResortPoint]) -> Vec<ResortTableRow> {
    let mut rows: Vec<ResortTableRow> = resorts
        .iter()
        .map(|r| ResortTableRow {
            rank: r.rank,
            name: r.name.clone(),
            user_count: r.user_count,
        })
        .collect();
    rows.sort_by_key(|row| row.rank);
    rows
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    page_title: &'a str,
    icon: &'a str,
    heading: &'a str,
    font_family: &'a str,
    css_family: &'a str,
    font_url: Option<&'a str>,
    tabs: &'a [Tab],
    trend_subheader: &'a str,
    trend_svg: String,
    map_subheader: &'a str,
    map_svg: String,
    map_caption: &'a str,
    table_title: &'a str,
    resort_rows: Vec<ResortTableRow>,
    ranking_subheader: &'a str,
    ranking_svg: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    page_title: &'a str,
    title: &'a str,
    message: &'a str,
    request_id: &'a str,
}

/// Render the HTML error display shown when a page render fails
pub fn render_error_page(message: &str, request_id: &str) -> RenderResult<String> {
    let page = ErrorTemplate {
        page_title: PAGE_TITLE,
        title: "페이지를 표시할 수 없습니다",
        message,
        request_id,
    };
    Ok(page.render()?)
}

/// `file://` URL of a local font, percent-encoded, for pages opened from disk
pub fn font_file_url(path: &Path) -> Option<String> {
    let absolute = match std::fs::canonicalize(path) {
        Ok(absolute) => absolute,
        Err(_) => std::env::current_dir().ok()?.join(path),
    };
    Url::from_file_path(absolute).ok().map(String::from)
}

/// Renders the full dashboard with a fixed font and theme
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    theme: ChartTheme,
    font_family: String,
    font_url: Option<String>,
}

impl DashboardRenderer {
    /// `font_url` is where the page loads the font bytes from.
    /// It is ignored when the handle has no embedded font.
    pub fn new(font: &FontHandle, font_url: impl Into<String>) -> Self {
        Self {
            theme: ChartTheme::new(font),
            font_family: font.family().to_string(),
            font_url: font.is_embedded().then(|| font_url.into()),
        }
    }

    pub fn font_url(&self) -> Option<&str> {
        self.font_url.as_deref()
    }

    pub fn render_chart(&self, kind: ChartKind, datasets: &Datasets) -> RenderResult<String> {
        charts::render_chart(kind, datasets, &self.theme)
    }

    /// One full render pass: every chart, the table and the layout
    pub fn render(&self, datasets: &Datasets) -> RenderResult<String> {
        let page = DashboardTemplate {
            page_title: PAGE_TITLE,
            icon: PAGE_ICON,
            heading: HEADING,
            font_family: &self.font_family,
            css_family: &self.theme.font_family,
            font_url: self.font_url.as_deref(),
            tabs: &TABS,
            trend_subheader: TREND_SUBHEADER,
            trend_svg: self.render_chart(ChartKind::Trend, datasets)?,
            map_subheader: MAP_SUBHEADER,
            map_svg: self.render_chart(ChartKind::Map, datasets)?,
            map_caption: charts::map::CAPTION,
            table_title: TABLE_TITLE,
            resort_rows: resort_table(&datasets.resorts),
            ranking_subheader: RANKING_SUBHEADER,
            ranking_svg: self.render_chart(ChartKind::Ranking, datasets)?,
        };

        Ok(page.render()?)
    }
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new(&FontHandle::system_default(), "")
    }
}
