use bon::bon;
use serde::Serialize;

/// A single supplier row, as held by the [`SupplierTable`](crate::table::SupplierTable).
///
/// `country` and `product_name` are stored lower-cased so they can be compared
/// case-insensitively. `normalized_revenue` and `combined_score` are derived
/// against the whole table when it is built, and are recomputed on a
/// per-request copy whenever a request narrows the row set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SupplierRecord {
  pub name: String,
  pub country: String,
  pub state: Option<String>,
  pub product_name: String,
  pub financial_score: f64,
  pub review_score: f64,
  pub revenue: Option<f64>,

  pub normalized_revenue: f64,
  pub combined_score: f64,
}

#[bon]
impl SupplierRecord {
  #[builder]
  pub fn builder(
    #[builder(start_fn)] name: &str,
    country: &str,
    state: Option<&str>,
    product_name: &str,
    #[builder(default)] financial_score: f64,
    #[builder(default)] review_score: f64,
    revenue: Option<f64>,
  ) -> SupplierRecord {
    SupplierRecord {
      name: name.to_string(),
      country: country.to_string(),
      state: state.map(ToOwned::to_owned),
      product_name: product_name.to_string(),
      financial_score,
      review_score,
      revenue,
      ..Default::default()
    }
  }
}

/// The three scored attributes of a supplier.
///
/// Used as the target of a similarity search, and as the set of minimums of a
/// threshold filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScoreProfile {
  pub financial_score: f64,
  pub review_score: f64,
  pub revenue: f64,
}

/// Whether a threshold accepts values equal to it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bound {
  Inclusive,
  Exclusive,
}

impl Bound {
  pub(crate) fn admits(&self, value: f64, threshold: f64) -> bool {
    match self {
      Bound::Inclusive => value >= threshold,
      Bound::Exclusive => value > threshold,
    }
  }
}

impl ScoreProfile {
  /// Check that every attribute of the record passes the matching threshold.
  ///
  /// A record without revenue never passes.
  pub fn admits(&self, record: &SupplierRecord, bound: Bound) -> bool {
    let Some(revenue) = record.revenue else {
      return false;
    };

    bound.admits(record.financial_score, self.financial_score) && bound.admits(record.review_score, self.review_score) && bound.admits(revenue, self.revenue)
  }
}

/// Search for suppliers of a product in a country.
#[derive(Clone, Debug, Default)]
pub struct ProductQuery {
  pub country: String,
  pub product_name: String,
  pub profile: ScoreProfile,
}

/// Search for suppliers located in a country and state, above some minimums.
#[derive(Clone, Debug, Default)]
pub struct LocationQuery {
  pub country: String,
  pub state: String,
  pub minimums: ScoreProfile,
}

/// One entry of a ranking, with the value it was ranked by.
///
/// `score` is a combined score for score rankings, and a distance for
/// similarity rankings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked {
  pub name: String,
  pub score: f64,
}

#[cfg(test)]
mod tests {
  use super::{Bound, ScoreProfile, SupplierRecord};

  #[test]
  fn profile_admits_bounds() {
    let record = SupplierRecord::builder("A").country("usa").product_name("valve").financial_score(80.0).review_score(70.0).revenue(100.0).build();
    let profile = ScoreProfile {
      financial_score: 80.0,
      review_score: 70.0,
      revenue: 100.0,
    };

    assert!(profile.admits(&record, Bound::Inclusive));
    assert!(!profile.admits(&record, Bound::Exclusive));

    let lower = ScoreProfile {
      financial_score: 79.0,
      review_score: 69.0,
      revenue: 99.0,
    };

    assert!(lower.admits(&record, Bound::Exclusive));
  }

  #[test]
  fn profile_rejects_missing_revenue() {
    let record = SupplierRecord::builder("A").country("usa").product_name("valve").financial_score(80.0).review_score(70.0).build();

    assert!(!ScoreProfile::default().admits(&record, Bound::Inclusive));
  }
}
