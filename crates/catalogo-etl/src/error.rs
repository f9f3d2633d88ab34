use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("workbook not found: {path}")]
    InputNotFound { path: String },

    #[error("failed to read workbook {path}: {reason}")]
    InputParse { path: String, reason: String },

    #[error("sheet '{sheet}' not found in workbook {path}")]
    MissingSheet { path: String, sheet: String },

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("invalid record in sheet '{sheet}', row {row}, field '{field}': {reason}")]
    InvalidRecord {
        sheet: String,
        row: usize,
        field: String,
        reason: String,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EtlError {
    /// `true` for structural problems with the workbook itself, as opposed
    /// to bad data in an individual row.
    #[must_use]
    pub fn is_input_parse(&self) -> bool {
        matches!(
            self,
            EtlError::InputParse { .. } | EtlError::MissingSheet { .. } | EtlError::MissingColumn { .. }
        )
    }
}
