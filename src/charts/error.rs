//! Render error types

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors raised while drawing a chart or laying out the page
#[derive(Error, Debug)]
pub enum RenderError {
    /// The plotting backend rejected a drawing operation
    #[error("Chart error: {0}")]
    Chart(String),

    /// A chart was asked to draw an empty dataset
    #[error("Nothing to plot: the {0} dataset is empty")]
    EmptyDataset(&'static str),

    /// No chart with this name
    #[error("Unknown chart: {0}")]
    UnknownChart(String),

    /// HTML template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Chart(err.to_string())
    }
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
