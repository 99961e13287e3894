//! Plotly.js `{ data, layout }` encoding of the dashboard figures.
//!
//! The browser hands these objects straight to `Plotly.react`, so field names
//! follow Plotly's schema rather than Rust conventions.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use super::distribution::{DistributionFigure, ModelCount};
use super::map::{LEGEND_TITLE, LayerKind, MapFigure, MapLayer, MarkerSymbol};
use super::palette::{BAR_COLOR, CENTROID_OUTLINE, COAST_COLOR, COUNTRY_COLOR, LAND_COLOR};

const EQUIPMENT_HOVER: &str = "<b>Serial:</b> %{text}<br>Model: %{customdata}<extra></extra>";

impl MapFigure {
    pub fn to_plotly(&self) -> Value {
        let data = self.layers.iter().map(layer_trace).collect::<Vec<_>>();

        json!({
            "data": data,
            "layout": {
                "title": null,
                "legend": { "title": { "text": LEGEND_TITLE } },
                "geo": {
                    "scope": "south america",
                    "showland": true,
                    "landcolor": LAND_COLOR,
                    "showcountries": true,
                    "countrycolor": COUNTRY_COLOR,
                    "coastlinecolor": COAST_COLOR,
                    "bgcolor": "white",
                    "lataxis": { "range": self.viewport.lat },
                    "lonaxis": { "range": self.viewport.lon },
                },
                "paper_bgcolor": "white",
                "plot_bgcolor": "white",
                "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            },
        })
    }
}

fn layer_trace(layer: &MapLayer) -> Value {
    let lat = layer
        .markers
        .iter()
        .map(|m| m.position.lat)
        .collect::<Vec<_>>();
    let lon = layer
        .markers
        .iter()
        .map(|m| m.position.lon)
        .collect::<Vec<_>>();
    let text = layer
        .markers
        .iter()
        .map(|m| m.text.clone().unwrap_or_default())
        .collect::<Vec<_>>();

    let mut marker = json!({
        "size": layer.style.size,
        "color": layer.style.color,
    });

    let mut trace = json!({
        "type": "scattergeo",
        "name": layer.name,
        "lat": lat,
        "lon": lon,
        "mode": "markers",
    });

    match &layer.kind {
        LayerKind::References => {
            trace["text"] = json!(text);
        }
        LayerKind::Cluster { leader } => {
            let models = layer
                .markers
                .iter()
                .map(|m| json!([m.model.as_deref().unwrap_or("")]))
                .collect::<Vec<_>>();
            trace["text"] = json!(text);
            trace["customdata"] = json!(models);
            trace["hovertemplate"] = json!(EQUIPMENT_HOVER);
            trace["legendgroup"] = json!(leader);
        }
        LayerKind::Centroid { leader } => {
            trace["mode"] = json!("markers+text");
            trace["text"] = json!(text);
            trace["textposition"] = json!("top center");
            marker["line"] = json!({ "color": CENTROID_OUTLINE, "width": 1 });
            trace["legendgroup"] = json!(leader);
        }
    }

    if layer.style.symbol == MarkerSymbol::Star {
        marker["symbol"] = json!("star");
    }
    trace["marker"] = marker;
    trace
}

impl DistributionFigure {
    pub fn to_plotly(&self) -> Value {
        let (bar_x, bar_y) = split_counts(&self.bars);
        let (labels, values) = split_counts(&self.slices);

        json!({
            "data": [
                {
                    "type": "bar",
                    "name": "Top 5 models",
                    "x": bar_x,
                    "y": bar_y,
                    "marker": { "color": BAR_COLOR },
                },
                {
                    "type": "pie",
                    "name": "Model mix",
                    "labels": labels,
                    "values": values,
                    "domain": { "x": [0.52, 1.0], "y": [0.0, 1.0] },
                },
            ],
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "domain": [0.0, 0.48], "title": { "text": "Models (Top 5)" } },
                "yaxis": { "domain": [0.0, 1.0], "title": { "text": "Count" } },
                "xaxis2": { "domain": [0.52, 1.0] },
                "yaxis2": { "domain": [0.0, 1.0] },
                "paper_bgcolor": "white",
                "plot_bgcolor": "white",
                "margin": { "l": 20, "r": 20, "t": 60, "b": 20 },
            },
        })
    }
}

fn split_counts(entries: &[ModelCount]) -> (Vec<&str>, Vec<usize>) {
    entries
        .iter()
        .map(|entry| (entry.model.as_str(), entry.count))
        .unzip()
}

impl Serialize for MapFigure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plotly().serialize(serializer)
    }
}

impl Serialize for DistributionFigure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plotly().serialize(serializer)
    }
}
