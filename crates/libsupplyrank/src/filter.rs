use crate::{
  error::SupplyRankError,
  model::{Bound, LocationQuery, ScoreProfile, SupplierRecord},
  table::SupplierTable,
};

/// Suppliers of a product in a country, compared case-insensitively.
pub fn by_product<'t>(table: &'t SupplierTable, country: &str, product_name: &str) -> Result<Vec<&'t SupplierRecord>, SupplyRankError> {
  let country = country.trim().to_lowercase();
  let product_name = product_name.trim().to_lowercase();

  let matches = table
    .records()
    .iter()
    .filter(|record| record.country == country && record.product_name == product_name)
    .collect::<Vec<_>>();

  tracing::debug!(%country, %product_name, matches = matches.len(), "filtered suppliers by product");

  match matches.is_empty() {
    true => Err(SupplyRankError::NoSuppliersForProduct),
    false => Ok(matches),
  }
}

/// Keep the records whose scores and revenue are all strictly above the given
/// values.
pub fn above<'t>(records: Vec<&'t SupplierRecord>, minimums: &ScoreProfile) -> Result<Vec<&'t SupplierRecord>, SupplyRankError> {
  let matches = records.into_iter().filter(|record| minimums.admits(record, Bound::Exclusive)).collect::<Vec<_>>();

  match matches.is_empty() {
    true => Err(SupplyRankError::NoSuppliersMatchCriteria),
    false => Ok(matches),
  }
}

/// Suppliers located in a country and state, at or above the given minimums.
///
/// The country is compared case-insensitively, the state exactly once trimmed.
pub fn by_location<'t>(table: &'t SupplierTable, query: &LocationQuery) -> Result<Vec<&'t SupplierRecord>, SupplyRankError> {
  let country = query.country.trim().to_lowercase();
  let state = query.state.trim();

  let matches = table
    .records()
    .iter()
    .filter(|record| record.country == country && record.state.as_deref() == Some(state))
    .filter(|record| query.minimums.admits(record, Bound::Inclusive))
    .collect::<Vec<_>>();

  tracing::debug!(%country, %state, matches = matches.len(), "filtered suppliers by location");

  match matches.is_empty() {
    true => Err(SupplyRankError::NoSuppliersMatchCriteria),
    false => Ok(matches),
  }
}
