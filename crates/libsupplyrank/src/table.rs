use crate::{
  model::SupplierRecord,
  scoring::{self, Weighting},
};

/// The immutable, in-memory set of suppliers served by the engine.
#[derive(Clone, Debug, Default)]
pub struct SupplierTable {
  records: Vec<SupplierRecord>,
}

impl SupplierTable {
  /// Build a table from raw records.
  ///
  /// Country and product names are lower-cased, states are trimmed, and the derived scores are
  /// computed against the whole table with the given weighting.
  pub fn new(records: Vec<SupplierRecord>, weighting: Weighting) -> SupplierTable {
    let max = scoring::max_revenue(&records);

    let records = records
      .into_iter()
      .map(|mut record| {
        record.country = record.country.trim().to_lowercase();
        record.product_name = record.product_name.trim().to_lowercase();
        record.state = record.state.map(|state| state.trim().to_string());
        record.normalized_revenue = scoring::normalize_revenue(record.revenue, max);
        record.combined_score = weighting.combine(record.financial_score, record.review_score, record.normalized_revenue);
        record
      })
      .collect();

    SupplierTable { records }
  }

  pub fn records(&self) -> &[SupplierRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}
