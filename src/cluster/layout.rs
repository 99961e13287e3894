#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetNames {
    pub summary: String,
    pub references: String,
    pub equipment: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            summary: "Resumo_Clusters_V2".to_string(),
            references: "ATAs_Coordenadas".to_string(),
            equipment: "Equipamentos_Clusterizados".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNames {
    pub leader: String,
    pub serial: String,
    pub model: String,
    pub latitude: String,
    pub longitude: String,
    /// Optional; reference points fall back to their sheet row number.
    pub reference_id: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            leader: "ATA_Lider".to_string(),
            serial: "Serial".to_string(),
            model: "Modelo".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
            reference_id: "ATA".to_string(),
        }
    }
}

/// Where each table lives in the workbook and what its headers are called.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkbookLayout {
    pub sheets: SheetNames,
    pub columns: ColumnNames,
}
