use crate::cluster::DataContext;

/// What the leader dropdown currently points at.
///
/// The page sends an empty string for "whole country"; that sentinel never
/// travels past [`Selection::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    WholeDataset,
    Leader(String),
    /// A value that names no known leader. Rendered exactly like
    /// [`Selection::WholeDataset`].
    Unrecognized(String),
}

impl Selection {
    pub fn resolve(raw: Option<&str>, ctx: &DataContext) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::WholeDataset,
            Some(leader) if ctx.has_leader(leader) => Self::Leader(leader.to_string()),
            Some(other) => Self::Unrecognized(other.to_string()),
        }
    }

    /// The selected leader, only when it is one the data knows about.
    pub fn leader(&self) -> Option<&str> {
        match self {
            Self::Leader(leader) => Some(leader),
            Self::WholeDataset | Self::Unrecognized(_) => None,
        }
    }
}
