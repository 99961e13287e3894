use std::collections::HashMap;

use crate::cluster::{DataContext, EquipmentPoint};

use super::selection::Selection;

pub const BAR_LIMIT: usize = 5;
pub const PIE_LIMIT: usize = 8;
pub const OTHER_LABEL: &str = "Other";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelCount {
    pub model: String,
    pub count: usize,
}

/// Bar + pie breakdown of the equipment model mix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionFigure {
    pub title: String,
    pub bars: Vec<ModelCount>,
    pub slices: Vec<ModelCount>,
}

/// Count equipment per model, most common first.
///
/// Equal counts are ordered by model name so the ranking never depends on
/// sheet row order. Points without a model are not counted.
pub fn rank_models<'a>(points: impl IntoIterator<Item = &'a EquipmentPoint>) -> Vec<ModelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for model in points.into_iter().filter_map(|point| point.model.as_deref()) {
        *counts.entry(model).or_default() += 1;
    }

    let mut ranked = counts
        .into_iter()
        .map(|(model, count)| ModelCount {
            model: model.to_string(),
            count,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.model.cmp(&b.model)));
    ranked
}

/// Top [`PIE_LIMIT`] slices; everything past them is folded into one
/// [`OTHER_LABEL`] slice.
///
/// Pie slices are keyed by label, so a ranked model literally named
/// [`OTHER_LABEL`] absorbs the remainder instead of getting a twin slice.
fn pie_slices(ranked: &[ModelCount]) -> Vec<ModelCount> {
    if ranked.len() <= PIE_LIMIT {
        return ranked.to_vec();
    }

    let (head, tail) = ranked.split_at(PIE_LIMIT);
    let rest = tail.iter().map(|entry| entry.count).sum();
    let mut slices = head.to_vec();
    match slices.iter_mut().find(|slice| slice.model == OTHER_LABEL) {
        Some(other) => other.count += rest,
        None => slices.push(ModelCount {
            model: OTHER_LABEL.to_string(),
            count: rest,
        }),
    }
    slices
}

pub fn render_distribution(ctx: &DataContext, selection: &Selection) -> DistributionFigure {
    let (ranked, title) = match selection.leader() {
        Some(leader) => (
            rank_models(ctx.equipment_for(leader)),
            format!("Cluster {leader}: Top {BAR_LIMIT} models and mix"),
        ),
        None => (
            rank_models(&ctx.equipment),
            format!("Whole country: Top {BAR_LIMIT} models and mix"),
        ),
    };

    DistributionFigure {
        title,
        bars: ranked.iter().take(BAR_LIMIT).cloned().collect(),
        slices: pie_slices(&ranked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::fixtures::{equipment, summary, two_clusters};

    /// One leader with `models` distinct models; model `i` appears `models - i`
    /// times so the ranking is strict.
    fn context_with_models(models: usize) -> DataContext {
        let mut points = Vec::new();
        for i in 0..models {
            for n in 0..(models - i) {
                let serial = format!("S{i}-{n}");
                let model = format!("M{i:02}");
                points.push(equipment(&serial, &model, "A", -10.0, -50.0));
            }
        }
        DataContext::new(vec![summary("A")], Vec::new(), points)
    }

    #[test]
    fn nine_models_fold_the_last_into_other() {
        let ctx = context_with_models(9);

        let figure = render_distribution(&ctx, &Selection::WholeDataset);

        assert_eq!(figure.slices.len(), 9);
        let other = figure.slices.last().expect("other slice");
        assert_eq!(other.model, OTHER_LABEL);
        assert_eq!(other.count, 1);
        assert_eq!(figure.slices[7].model, "M07");
    }

    #[test]
    fn eight_models_have_no_other_slice() {
        let ctx = context_with_models(8);

        let figure = render_distribution(&ctx, &Selection::WholeDataset);

        assert_eq!(figure.slices.len(), 8);
        assert!(figure.slices.iter().all(|slice| slice.model != OTHER_LABEL));
    }

    #[test]
    fn other_sums_every_remaining_model() {
        let ctx = context_with_models(12);

        let figure = render_distribution(&ctx, &Selection::WholeDataset);

        // Models 8..12 appear 4, 3, 2 and 1 times.
        assert_eq!(figure.slices[PIE_LIMIT].count, 10);
        assert_eq!(figure.bars.len(), BAR_LIMIT);
        assert_eq!(figure.bars[0], ModelCount { model: "M00".to_string(), count: 12 });
    }

    #[test]
    fn model_named_other_absorbs_the_remainder() {
        let mut points = Vec::new();
        for i in 0..10 {
            let model = if i == 0 { OTHER_LABEL.to_string() } else { format!("M{i:02}") };
            for n in 0..(10 - i) {
                points.push(equipment(&format!("S{i}-{n}"), &model, "A", -10.0, -50.0));
            }
        }
        let ctx = DataContext::new(vec![summary("A")], Vec::new(), points);

        let figure = render_distribution(&ctx, &Selection::WholeDataset);

        let labels = figure.slices.iter().map(|s| s.model.as_str()).collect::<Vec<_>>();
        assert_eq!(labels.len(), PIE_LIMIT);
        assert_eq!(labels.iter().filter(|label| **label == OTHER_LABEL).count(), 1);
        // The real "Other" has 10 points; M08 and M09 add 2 and 1.
        assert_eq!(figure.slices[0], ModelCount { model: OTHER_LABEL.to_string(), count: 13 });
    }

    #[test]
    fn ties_are_broken_by_model_name() {
        let points = vec![
            equipment("S1", "Zeta", "A", 0.0, 0.0),
            equipment("S2", "Alpha", "A", 0.0, 0.0),
            equipment("S3", "Mid", "A", 0.0, 0.0),
            equipment("S4", "Mid", "A", 0.0, 0.0),
        ];

        let ranked = rank_models(&points);

        let names = ranked.iter().map(|m| m.model.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let ctx = context_with_models(11);
        let selection = Selection::Leader("A".to_string());

        assert_eq!(
            render_distribution(&ctx, &selection),
            render_distribution(&ctx, &selection)
        );
    }

    #[test]
    fn selected_leader_counts_only_its_models() {
        let ctx = two_clusters();

        let figure = render_distribution(&ctx, &Selection::Leader("A".to_string()));

        assert_eq!(figure.title, "Cluster A: Top 5 models and mix");
        assert_eq!(
            figure.bars,
            vec![
                ModelCount { model: "M-100".to_string(), count: 1 },
                ModelCount { model: "M-200".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn whole_dataset_and_unknown_leader_share_the_overview() {
        let ctx = two_clusters();

        let overview = render_distribution(&ctx, &Selection::WholeDataset);
        let unknown = render_distribution(&ctx, &Selection::Unrecognized("Q".to_string()));

        assert_eq!(overview, unknown);
        assert_eq!(overview.title, "Whole country: Top 5 models and mix");
        assert_eq!(overview.bars[0], ModelCount { model: "M-100".to_string(), count: 2 });
    }

    #[test]
    fn empty_cluster_yields_empty_series() {
        let ctx = two_clusters();

        let figure = render_distribution(&ctx, &Selection::Leader("C".to_string()));

        assert!(figure.bars.is_empty());
        assert!(figure.slices.is_empty());
        assert_eq!(figure.title, "Cluster C: Top 5 models and mix");
    }
}
