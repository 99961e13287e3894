/// Plotly's default qualitative sequence; light theme, good contrast.
pub(super) const CLUSTER_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub(super) const REFERENCE_COLOR: &str = "rgba(120,120,120,0.5)";
pub(super) const CENTROID_COLOR: &str = "gold";
pub(super) const CENTROID_OUTLINE: &str = "black";
pub(super) const BAR_COLOR: &str = "#004B8D";

pub(super) const LAND_COLOR: &str = "rgb(245,245,245)";
pub(super) const COUNTRY_COLOR: &str = "rgb(180,180,180)";
pub(super) const COAST_COLOR: &str = "rgb(160,160,160)";

/// Color for the leader at `rank` in the sorted leader list.
pub(super) fn leader_color(rank: usize) -> &'static str {
    CLUSTER_PALETTE[rank % CLUSTER_PALETTE.len()]
}
