use std::collections::BTreeMap;

use super::model::{Centroid, Coordinate, EquipmentPoint};

/// Mean position of every leader's equipment.
///
/// Points without a leader are ignored, and leaders that own no points never
/// appear in the result.
pub fn compute_centroids(equipment: &[EquipmentPoint]) -> BTreeMap<String, Centroid> {
    let mut sums: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();

    for point in equipment {
        let Some(leader) = point.leader.as_deref() else {
            continue;
        };

        let entry = sums.entry(leader).or_insert((0.0, 0.0, 0));
        entry.0 += point.position.lat;
        entry.1 += point.position.lon;
        entry.2 += 1;
    }

    sums.into_iter()
        .map(|(leader, (lat_sum, lon_sum, count))| {
            let count = count as f64;
            (
                leader.to_string(),
                Coordinate {
                    lat: lat_sum / count,
                    lon: lon_sum / count,
                },
            )
        })
        .collect()
}
