mod centroid;
mod collect;
mod error;
mod layout;
mod model;
mod parse;

pub use collect::load_workbook;
pub use layout::{SheetNames, WorkbookLayout};
pub use model::{Coordinate, DataContext, EquipmentPoint};

#[cfg(test)]
pub(crate) use model::fixtures;
