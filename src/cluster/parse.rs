use calamine::{Data, Range};

use super::error::LoadError;
use super::layout::ColumnNames;
use super::model::{ClusterSummaryRow, Coordinate, EquipmentPoint, ReferencePoint};

/// Rows kept from one sheet plus how many were discarded for lacking a
/// coordinate.
#[derive(Debug)]
pub(super) struct Parsed<T> {
    pub(super) rows: Vec<T>,
    pub(super) dropped: usize,
}

/// A worksheet whose first row is the header.
pub(super) struct Table<'a> {
    sheet: &'a str,
    headers: Vec<String>,
    range: &'a Range<Data>,
}

impl<'a> Table<'a> {
    pub(super) fn new(sheet: &'a str, range: &'a Range<Data>) -> Result<Self, LoadError> {
        let headers = range
            .rows()
            .next()
            .ok_or_else(|| LoadError::EmptyTable {
                sheet: sheet.to_string(),
            })?
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect::<Vec<_>>();

        Ok(Self {
            sheet,
            headers,
            range,
        })
    }

    fn find(&self, column: &str) -> Option<usize> {
        let column = column.trim();
        self.headers.iter().position(|header| header == column)
    }

    fn require(&self, column: &str) -> Result<usize, LoadError> {
        self.find(column).ok_or_else(|| LoadError::MissingColumn {
            sheet: self.sheet.to_string(),
            column: column.to_string(),
        })
    }

    /// Data rows with their 1-based row number in the sheet.
    fn rows(&self) -> impl Iterator<Item = (usize, &'a [Data])> {
        let first_row = self.range.start().map(|(row, _)| row as usize).unwrap_or(0);
        self.range
            .rows()
            .enumerate()
            .skip(1)
            .map(move |(index, row)| (first_row + index + 1, row))
    }
}

pub(super) fn parse_summary(
    table: &Table<'_>,
    columns: &ColumnNames,
) -> Result<Vec<ClusterSummaryRow>, LoadError> {
    let leader_idx = table.require(&columns.leader)?;

    let stat_columns = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| *idx != leader_idx && !header.is_empty())
        .map(|(idx, header)| (idx, header.clone()))
        .collect::<Vec<_>>();

    let rows = table
        .rows()
        .filter_map(|(_, row)| {
            let leader = row.get(leader_idx).and_then(cell_text)?;
            let stats = stat_columns
                .iter()
                .map(|(idx, header)| {
                    let value = row.get(*idx).and_then(cell_text).unwrap_or_default();
                    (header.clone(), value)
                })
                .collect();
            Some(ClusterSummaryRow { leader, stats })
        })
        .collect();

    Ok(rows)
}

pub(super) fn parse_references(
    table: &Table<'_>,
    columns: &ColumnNames,
) -> Result<Parsed<ReferencePoint>, LoadError> {
    let lat_idx = table.require(&columns.latitude)?;
    let lon_idx = table.require(&columns.longitude)?;
    let id_idx = table.find(&columns.reference_id);

    let mut parsed = Parsed {
        rows: Vec::new(),
        dropped: 0,
    };

    for (row_number, row) in table.rows() {
        let Some(position) = coordinate(row, lat_idx, lon_idx) else {
            parsed.dropped += 1;
            continue;
        };

        let id = id_idx
            .and_then(|idx| row.get(idx))
            .and_then(cell_text)
            .unwrap_or_else(|| row_number.to_string());

        parsed.rows.push(ReferencePoint { id, position });
    }

    Ok(parsed)
}

pub(super) fn parse_equipment(
    table: &Table<'_>,
    columns: &ColumnNames,
) -> Result<Parsed<EquipmentPoint>, LoadError> {
    let serial_idx = table.require(&columns.serial)?;
    let model_idx = table.require(&columns.model)?;
    let leader_idx = table.require(&columns.leader)?;
    let lat_idx = table.require(&columns.latitude)?;
    let lon_idx = table.require(&columns.longitude)?;

    let mut parsed = Parsed {
        rows: Vec::new(),
        dropped: 0,
    };

    for (_, row) in table.rows() {
        let Some(position) = coordinate(row, lat_idx, lon_idx) else {
            parsed.dropped += 1;
            continue;
        };

        parsed.rows.push(EquipmentPoint {
            serial: row.get(serial_idx).and_then(cell_text).unwrap_or_default(),
            model: row.get(model_idx).and_then(cell_text),
            leader: row.get(leader_idx).and_then(cell_text),
            position,
        });
    }

    Ok(parsed)
}

fn coordinate(row: &[Data], lat_idx: usize, lon_idx: usize) -> Option<Coordinate> {
    let lat = row.get(lat_idx).and_then(cell_number)?;
    let lon = row.get(lon_idx).and_then(cell_number)?;
    Some(Coordinate { lat, lon })
}

pub(super) fn cell_number(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(value) => *value,
        Data::Int(value) => *value as f64,
        Data::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    value.is_finite().then_some(value)
}

/// Display text of an identifier-like cell; `None` for blanks and errors.
pub(super) fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(text) => text.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.is_nan() => return None,
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    };

    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[Data]]) -> Range<Data> {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn equipment_rows_without_coordinates_are_dropped() {
        let range = sheet(&[
            &[s("Serial"), s("Modelo"), s("ATA_Lider"), s("Latitude"), s("Longitude")],
            &[s("S1"), s("M-100"), s("A"), Data::Float(-10.0), Data::Float(-50.0)],
            &[s("S2"), s("M-100"), s("A"), Data::Empty, Data::Float(-50.0)],
            &[s("S3"), s("M-200"), s("B"), Data::Float(-20.0), s("n/a")],
            &[Data::Int(4410), Data::Empty, s("B"), s(" -21.5 "), Data::Int(-61)],
        ]);
        let table = Table::new("Equipamentos", &range).expect("header row");

        let parsed = parse_equipment(&table, &ColumnNames::default()).expect("columns present");

        assert_eq!(parsed.dropped, 2);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].serial, "4410");
        assert_eq!(parsed.rows[1].model, None);
        assert_eq!(parsed.rows[1].position, Coordinate { lat: -21.5, lon: -61.0 });
    }

    #[test]
    fn missing_required_column_is_reported() {
        let range = sheet(&[
            &[s("Serial"), s("Modelo"), s("Latitude"), s("Longitude")],
            &[s("S1"), s("M"), Data::Float(-10.0), Data::Float(-50.0)],
        ]);
        let table = Table::new("Equipamentos", &range).expect("header row");

        let err = parse_equipment(&table, &ColumnNames::default()).unwrap_err();

        match err {
            LoadError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "Equipamentos");
                assert_eq!(column, "ATA_Lider");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_sheet_has_no_header() {
        let range: Range<Data> = Range::empty();

        assert!(matches!(
            Table::new("Resumo", &range),
            Err(LoadError::EmptyTable { .. })
        ));
    }

    #[test]
    fn reference_id_falls_back_to_row_number() {
        let range = sheet(&[
            &[s("Latitude"), s("Longitude")],
            &[Data::Float(-1.0), Data::Float(-48.0)],
            &[Data::Float(f64::NAN), Data::Float(-48.0)],
            &[Data::Float(-2.0), Data::Float(-49.0)],
        ]);
        let table = Table::new("ATAs", &range).expect("header row");

        let parsed = parse_references(&table, &ColumnNames::default()).expect("columns present");

        let ids = parsed.rows.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["2", "4"]);
        assert_eq!(parsed.dropped, 1);
    }

    #[test]
    fn summary_keeps_stats_and_skips_blank_leaders() {
        let range = sheet(&[
            &[s("ATA_Lider"), s("Qtd_Equipamentos"), s(" Raio_km ")],
            &[s("A"), Data::Int(12), Data::Float(85.5)],
            &[Data::Empty, Data::Int(3), Data::Float(10.0)],
            &[Data::Float(1203.0), Data::Int(7), Data::Empty],
        ]);
        let table = Table::new("Resumo", &range).expect("header row");

        let rows = parse_summary(&table, &ColumnNames::default()).expect("leader column");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].leader, "A");
        assert_eq!(
            rows[0].stats,
            vec![
                ("Qtd_Equipamentos".to_string(), "12".to_string()),
                ("Raio_km".to_string(), "85.5".to_string()),
            ]
        );
        assert_eq!(rows[1].leader, "1203");
        assert_eq!(rows[1].stats[1].1, "");
    }
}
