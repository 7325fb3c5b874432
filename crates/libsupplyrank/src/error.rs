#[derive(Debug, thiserror::Error)]
pub enum SupplyRankError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("could not load supplier table: {0}")]
  LoadError(String),
  #[error("supplier table is missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),
  #[error("invalid value for column '{column}' at row {row}: {value:?}")]
  InvalidValue { row: usize, column: &'static str, value: String },
  #[error(transparent)]
  CsvError(#[from] csv::Error),

  #[error("supplier data not loaded")]
  EmptyTable,
  #[error("no suppliers found for the specified country and product name")]
  NoSuppliersForProduct,
  #[error("no suppliers match the provided criteria")]
  NoSuppliersMatchCriteria,

  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}
