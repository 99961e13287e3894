use crate::cluster::{Coordinate, DataContext, EquipmentPoint};

use super::palette::{CENTROID_COLOR, REFERENCE_COLOR, leader_color};
use super::selection::Selection;

/// Latitude range of the whole-country view (South America scope).
pub const COUNTRY_LAT_RANGE: [f64; 2] = [-34.0, 6.0];
pub const COUNTRY_LON_RANGE: [f64; 2] = [-75.0, -34.0];

const PAD_FRACTION: f64 = 0.20;
const MIN_PAD_DEGREES: f64 = 2.0;

pub const LEGEND_TITLE: &str = "Clusters (leader ATA)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub lat: [f64; 2],
    pub lon: [f64; 2],
}

impl Viewport {
    pub fn country() -> Self {
        Self {
            lat: COUNTRY_LAT_RANGE,
            lon: COUNTRY_LON_RANGE,
        }
    }

    /// Bounding box of `points`, padded by 20% of its extent on each axis and
    /// never by less than two degrees.
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut lat = [first.lat, first.lat];
        let mut lon = [first.lon, first.lon];
        for point in points {
            lat = [lat[0].min(point.lat), lat[1].max(point.lat)];
            lon = [lon[0].min(point.lon), lon[1].max(point.lon)];
        }

        Some(Self {
            lat: pad(lat),
            lon: pad(lon),
        })
    }
}

fn pad([min, max]: [f64; 2]) -> [f64; 2] {
    let pad = ((max - min) * PAD_FRACTION).max(MIN_PAD_DEGREES);
    [min - pad, max + pad]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerSymbol {
    Circle,
    Star,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub size: f64,
    pub color: &'static str,
    pub symbol: MarkerSymbol,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    References,
    Cluster { leader: String },
    Centroid { leader: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapMarker {
    pub position: Coordinate,
    /// Hover or label text.
    pub text: Option<String>,
    pub model: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapLayer {
    pub name: String,
    pub kind: LayerKind,
    pub style: MarkerStyle,
    pub markers: Vec<MapMarker>,
}

/// Renderable description of the map; layers are drawn in order.
#[derive(Clone, Debug, PartialEq)]
pub struct MapFigure {
    pub layers: Vec<MapLayer>,
    pub viewport: Viewport,
}

pub fn render_map(ctx: &DataContext, selection: &Selection) -> MapFigure {
    let mut layers = Vec::with_capacity(ctx.leaders().len() + 2);

    if !ctx.references.is_empty() {
        layers.push(MapLayer {
            name: "Reference ATAs (all)".to_string(),
            kind: LayerKind::References,
            style: MarkerStyle {
                size: 5.0,
                color: REFERENCE_COLOR,
                symbol: MarkerSymbol::Circle,
            },
            markers: ctx
                .references
                .iter()
                .map(|point| MapMarker {
                    position: point.position,
                    text: Some(point.id.clone()),
                    model: None,
                })
                .collect(),
        });
    }

    for (rank, leader) in ctx.leaders().iter().enumerate() {
        let markers = ctx
            .equipment_for(leader)
            .map(equipment_marker)
            .collect::<Vec<_>>();
        if markers.is_empty() {
            continue;
        }

        layers.push(MapLayer {
            name: format!("Equipment – {leader}"),
            kind: LayerKind::Cluster {
                leader: leader.clone(),
            },
            style: MarkerStyle {
                size: 6.0,
                color: leader_color(rank),
                symbol: MarkerSymbol::Circle,
            },
            markers,
        });
    }

    let mut viewport = Viewport::country();

    if let Some(leader) = selection.leader()
        && let Some(centroid) = ctx.centroid(leader)
    {
        layers.push(MapLayer {
            name: "Leader ATA (centroid)".to_string(),
            kind: LayerKind::Centroid {
                leader: leader.to_string(),
            },
            style: MarkerStyle {
                size: 12.0,
                color: CENTROID_COLOR,
                symbol: MarkerSymbol::Star,
            },
            markers: vec![MapMarker {
                position: centroid,
                text: Some(leader.to_string()),
                model: None,
            }],
        });

        if let Some(cluster) = Viewport::around(ctx.equipment_for(leader).map(|p| &p.position)) {
            viewport = cluster;
        }
    }

    MapFigure { layers, viewport }
}

fn equipment_marker(point: &EquipmentPoint) -> MapMarker {
    MapMarker {
        position: point.position,
        text: Some(point.serial.clone()),
        model: point.model.clone(),
    }
}
