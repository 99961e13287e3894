use std::collections::BTreeMap;

use super::centroid::compute_centroids;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSummaryRow {
    pub leader: String,
    /// Remaining summary columns as `(header, display text)` in sheet order.
    pub stats: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferencePoint {
    pub id: String,
    pub position: Coordinate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentPoint {
    pub serial: String,
    pub model: Option<String>,
    pub leader: Option<String>,
    pub position: Coordinate,
}

impl EquipmentPoint {
    pub fn belongs_to(&self, leader: &str) -> bool {
        self.leader.as_deref() == Some(leader)
    }
}

pub type Centroid = Coordinate;

/// Immutable view over one loaded workbook.
///
/// Built once before the server starts and shared read-only by every
/// request afterwards.
#[derive(Clone, Debug)]
pub struct DataContext {
    pub summary: Vec<ClusterSummaryRow>,
    pub references: Vec<ReferencePoint>,
    pub equipment: Vec<EquipmentPoint>,
    leaders: Vec<String>,
    centroids: BTreeMap<String, Centroid>,
}

impl DataContext {
    pub fn new(
        summary: Vec<ClusterSummaryRow>,
        references: Vec<ReferencePoint>,
        equipment: Vec<EquipmentPoint>,
    ) -> Self {
        let mut leaders = summary
            .iter()
            .map(|row| row.leader.trim())
            .filter(|leader| !leader.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        leaders.sort();
        leaders.dedup();

        let centroids = compute_centroids(&equipment);

        Self {
            summary,
            references,
            equipment,
            leaders,
            centroids,
        }
    }

    pub fn leaders(&self) -> &[String] {
        &self.leaders
    }

    pub fn has_leader(&self, leader: &str) -> bool {
        self.leaders
            .binary_search_by(|probe| probe.as_str().cmp(leader))
            .is_ok()
    }

    pub fn centroid(&self, leader: &str) -> Option<Centroid> {
        self.centroids.get(leader).copied()
    }

    pub fn equipment_for<'a>(
        &'a self,
        leader: &'a str,
    ) -> impl Iterator<Item = &'a EquipmentPoint> + 'a {
        self.equipment
            .iter()
            .filter(move |point| point.belongs_to(leader))
    }

    pub fn summary_for(&self, leader: &str) -> Option<&ClusterSummaryRow> {
        self.summary.iter().find(|row| row.leader.trim() == leader)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn equipment(
        serial: &str,
        model: &str,
        leader: &str,
        lat: f64,
        lon: f64,
    ) -> EquipmentPoint {
        EquipmentPoint {
            serial: serial.to_string(),
            model: Some(model.to_string()),
            leader: Some(leader.to_string()),
            position: Coordinate { lat, lon },
        }
    }

    pub(crate) fn summary(leader: &str) -> ClusterSummaryRow {
        ClusterSummaryRow {
            leader: leader.to_string(),
            stats: Vec::new(),
        }
    }

    pub(crate) fn reference(id: &str, lat: f64, lon: f64) -> ReferencePoint {
        ReferencePoint {
            id: id.to_string(),
            position: Coordinate { lat, lon },
        }
    }

    /// Leaders A and B; A owns two points, B owns one, C has no equipment.
    pub(crate) fn two_clusters() -> DataContext {
        DataContext::new(
            vec![summary("B"), summary("A"), summary("C")],
            vec![reference("R1", -15.0, -47.0), reference("R2", -23.5, -46.6)],
            vec![
                equipment("S1", "M-100", "A", -10.0, -50.0),
                equipment("S2", "M-200", "A", -12.0, -52.0),
                equipment("S3", "M-100", "B", -20.0, -60.0),
            ],
        )
    }
}
