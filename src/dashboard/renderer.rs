//! Renderers draw counters and growth indicators
//!
//! The dashboard pushes values into a [`Renderer`] by element id. A renderer
//! that does not know an id answers [`RenderError::MissingTarget`]; the
//! dashboard logs that and moves on.

use super::indicator::{DisplayTargets, IndicatorView, Tone};
use crate::analytics::{format_amount, Metric};
use std::io::Write;

/// Errors raised while drawing
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Display element not found: {0}")]
    MissingTarget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sink for dashboard output
pub trait Renderer {
    /// Show `value` in the counter element `counter_id`
    fn update_counter(&mut self, counter_id: &str, value: f64) -> Result<(), RenderError>;

    /// Draw a growth indicator into `container_id`, with the signed
    /// percentage in the nested `span_id`
    fn update_indicator(
        &mut self,
        container_id: &str,
        span_id: &str,
        view: &IndicatorView,
    ) -> Result<(), RenderError>;

    /// Called once after every element of a refresh has been updated
    fn flush(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct Row {
    counter: Option<f64>,
    indicator: Option<IndicatorView>,
}

/// Prints the dashboard as a plain-text table
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    rows: Vec<(Metric, DisplayTargets, Row)>,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: Metric::all()
                .iter()
                .map(|&m| (m, DisplayTargets::for_metric(m), Row::default()))
                .collect(),
        }
    }

    /// Consume the renderer, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn row_mut(
        &mut self,
        matches: impl Fn(&DisplayTargets) -> bool,
        id: &str,
    ) -> Result<&mut Row, RenderError> {
        self.rows
            .iter_mut()
            .find(|(_, targets, _)| matches(targets))
            .map(|(_, _, row)| row)
            .ok_or_else(|| RenderError::MissingTarget(id.to_string()))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn update_counter(&mut self, counter_id: &str, value: f64) -> Result<(), RenderError> {
        let row = self.row_mut(|t| t.counter_id == counter_id, counter_id)?;
        row.counter = Some(value);
        Ok(())
    }

    fn update_indicator(
        &mut self,
        container_id: &str,
        span_id: &str,
        view: &IndicatorView,
    ) -> Result<(), RenderError> {
        let row = self.row_mut(
            |t| t.container_id == container_id && t.span_id == span_id,
            container_id,
        )?;
        row.indicator = Some(view.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        writeln!(self.out, "{:<12} {:>16} {:>10}", "METRIC", "TOTAL", "GROWTH")?;
        for (metric, _, row) in &mut self.rows {
            let total = row.counter.map(format_amount).unwrap_or_else(|| "—".to_string());
            let growth = row
                .indicator
                .as_ref()
                .map(|v| {
                    let arrow = match v.tone {
                        Tone::Success => '↑',
                        Tone::Danger => '↓',
                    };
                    format!("{} {}", arrow, v.label())
                })
                .unwrap_or_else(|| "—".to_string());
            writeln!(self.out, "{:<12} {:>16} {:>10}", metric.to_string(), total, growth)?;
            *row = Row::default();
        }
        self.out.flush()?;
        Ok(())
    }
}
