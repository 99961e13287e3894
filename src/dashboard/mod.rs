use serde::Serialize;
use tracing::debug;

use crate::cluster::DataContext;

mod distribution;
mod map;
mod palette;
mod plotly;
mod selection;

use distribution::{DistributionFigure, render_distribution};
use map::{MapFigure, render_map};
use selection::Selection;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryStat {
    pub label: String,
    pub value: String,
}

/// Everything the page swaps in after the dropdown changes.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    /// The leader the figures are scoped to; `null` for the whole country.
    pub selection: Option<String>,
    pub map: MapFigure,
    pub distribution: DistributionFigure,
    pub summary: Vec<SummaryStat>,
}

/// Recompute both figures for the raw dropdown value.
pub fn update(ctx: &DataContext, raw: Option<&str>) -> DashboardView {
    let selection = Selection::resolve(raw, ctx);
    match &selection {
        Selection::Unrecognized(value) => {
            debug!(value = %value, "unknown leader; rendering whole dataset");
        }
        other => debug!(selection = ?other, "rendering dashboard"),
    }

    let summary = selection
        .leader()
        .and_then(|leader| ctx.summary_for(leader))
        .map(|row| {
            row.stats
                .iter()
                .map(|(label, value)| SummaryStat {
                    label: label.clone(),
                    value: value.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DashboardView {
        selection: selection.leader().map(str::to_string),
        map: render_map(ctx, &selection),
        distribution: render_distribution(ctx, &selection),
        summary,
    }
}
