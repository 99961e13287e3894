use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use tracing::{info, warn};

use super::error::LoadError;
use super::layout::WorkbookLayout;
use super::model::DataContext;
use super::parse::{Table, parse_equipment, parse_references, parse_summary};

/// Read the three clustering tables from `path` into an immutable context.
pub fn load_workbook(path: &Path, layout: &WorkbookLayout) -> Result<DataContext, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheets = &layout.sheets;
    let columns = &layout.columns;

    let summary_range = read_sheet(&mut workbook, &sheets.summary)?;
    let references_range = read_sheet(&mut workbook, &sheets.references)?;
    let equipment_range = read_sheet(&mut workbook, &sheets.equipment)?;

    let summary = parse_summary(&Table::new(&sheets.summary, &summary_range)?, columns)?;
    let references =
        parse_references(&Table::new(&sheets.references, &references_range)?, columns)?;
    let equipment = parse_equipment(&Table::new(&sheets.equipment, &equipment_range)?, columns)?;

    if references.dropped > 0 {
        warn!(
            sheet = %sheets.references,
            dropped = references.dropped,
            "dropped reference rows without coordinates"
        );
    }
    if equipment.dropped > 0 {
        warn!(
            sheet = %sheets.equipment,
            dropped = equipment.dropped,
            "dropped equipment rows without coordinates"
        );
    }

    let context = DataContext::new(summary, references.rows, equipment.rows);

    let unassigned = context
        .equipment
        .iter()
        .filter(|point| {
            point
                .leader
                .as_deref()
                .is_none_or(|leader| !context.has_leader(leader))
        })
        .count();
    if unassigned > 0 {
        warn!(unassigned, "equipment rows reference no known leader");
    }

    info!(
        path = %path.display(),
        leaders = context.leaders().len(),
        references = context.references.len(),
        equipment = context.equipment.len(),
        "workbook loaded"
    );

    Ok(context)
}

fn read_sheet(
    workbook: &mut Sheets<BufReader<File>>,
    sheet: &str,
) -> Result<Range<Data>, LoadError> {
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(LoadError::MissingTable {
            sheet: sheet.to_string(),
        });
    }

    workbook
        .worksheet_range(sheet)
        .map_err(|source| LoadError::ReadTable {
            sheet: sheet.to_string(),
            source,
        })
}
