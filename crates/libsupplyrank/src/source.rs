use std::{
  collections::HashMap,
  fs::File,
  io,
  path::PathBuf,
};

use ahash::RandomState;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{error::SupplyRankError, model::SupplierRecord};

const SUPPLIER_NAME: &str = "Supplier Name";
const COUNTRY: &str = "Country";
const STATE: &str = "State";
const PRODUCT_NAME: &str = "Product Name";
const FINANCIAL_SCORE: &str = "Financial Score";
const REVIEW_SCORE: &str = "Product Review Score";
const REVENUE: &str = "Revenue";
const REVENUE_ALIASES: &[&str] = &["revenue", "revenue (million dollars)"];

/// Where the supplier rows come from.
///
/// Implementors only produce raw records, the engine takes care of building
/// the derived scores.
pub trait SupplierSource {
  /// Human-readable description of the source, used in logs.
  fn describe(&self) -> String;
  fn load(&self) -> Result<Vec<SupplierRecord>, SupplyRankError>;
}

/// Reads suppliers from a CSV file with a header row.
#[derive(Clone, Debug)]
pub struct CsvSource {
  path: PathBuf,
}

impl CsvSource {
  pub fn new(path: impl Into<PathBuf>) -> CsvSource {
    CsvSource { path: path.into() }
  }
}

impl SupplierSource for CsvSource {
  fn describe(&self) -> String {
    self.path.display().to_string()
  }

  fn load(&self) -> Result<Vec<SupplierRecord>, SupplyRankError> {
    let file = File::open(&self.path).map_err(|err| SupplyRankError::LoadError(format!("could not open {}: {err}", self.path.display())))?;

    read_records(file)
  }
}

/// Serves a fixed list of suppliers.
#[derive(Clone, Debug, Default)]
pub struct StaticSource(pub Vec<SupplierRecord>);

impl SupplierSource for StaticSource {
  fn describe(&self) -> String {
    "static".to_string()
  }

  fn load(&self) -> Result<Vec<SupplierRecord>, SupplyRankError> {
    Ok(self.0.clone())
  }
}

/// Parse supplier rows out of CSV data.
///
/// Headers are matched case-insensitively, ignoring surrounding and repeated
/// whitespace. Unparseable revenues are kept as undefined, while unparseable
/// scores fail the whole load.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<SupplierRecord>, SupplyRankError> {
  let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
  let columns = Columns::from_headers(reader.headers()?)?;

  let mut records = Vec::new();

  for (index, row) in reader.records().enumerate() {
    // Row 1 is the header.
    records.push(columns.record(&row?, index + 2)?);
  }

  tracing::debug!(suppliers = records.len(), "parsed supplier rows");

  Ok(records)
}

struct Columns {
  name: usize,
  country: usize,
  state: Option<usize>,
  product_name: usize,
  financial_score: usize,
  review_score: usize,
  revenue: usize,
}

impl Columns {
  fn from_headers(headers: &StringRecord) -> Result<Columns, SupplyRankError> {
    let positions = headers
      .iter()
      .enumerate()
      .map(|(index, header)| (normalize_header(header), index))
      .collect::<HashMap<_, _, RandomState>>();

    let mut missing = Vec::new();
    let mut find = |label: &'static str, aliases: &[&str]| -> usize {
      match aliases.iter().find_map(|alias| positions.get(*alias)) {
        Some(index) => *index,
        None => {
          missing.push(label.to_string());
          0
        }
      }
    };

    let columns = Columns {
      name: find(SUPPLIER_NAME, &["supplier name"]),
      country: find(COUNTRY, &["country"]),
      product_name: find(PRODUCT_NAME, &["product name"]),
      financial_score: find(FINANCIAL_SCORE, &["financial score"]),
      review_score: find(REVIEW_SCORE, &["product review score"]),
      revenue: find(REVENUE, REVENUE_ALIASES),
      state: positions.get("state").copied(),
    };

    if !missing.is_empty() {
      return Err(SupplyRankError::MissingColumns(missing));
    }

    Ok(columns)
  }

  fn record(&self, row: &StringRecord, line: usize) -> Result<SupplierRecord, SupplyRankError> {
    let field = |index: usize| row.get(index).unwrap_or_default();

    Ok(SupplierRecord {
      name: field(self.name).to_string(),
      country: field(self.country).to_string(),
      state: self.state.map(field).filter(|state| !state.is_empty()).map(ToOwned::to_owned),
      product_name: field(self.product_name).to_string(),
      financial_score: parse_score(field(self.financial_score), line, FINANCIAL_SCORE)?,
      review_score: parse_score(field(self.review_score), line, REVIEW_SCORE)?,
      revenue: field(self.revenue).parse::<f64>().ok().filter(|revenue| revenue.is_finite()),
      ..Default::default()
    })
  }
}

fn normalize_header(header: &str) -> String {
  header.trim_start_matches('\u{feff}').split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn parse_score(value: &str, row: usize, column: &'static str) -> Result<f64, SupplyRankError> {
  match value.parse::<f64>() {
    Ok(score) if score.is_finite() => Ok(score),
    _ => Err(SupplyRankError::InvalidValue {
      row,
      column,
      value: value.to_string(),
    }),
  }
}
