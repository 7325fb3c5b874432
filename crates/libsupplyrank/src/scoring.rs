use std::{fmt, str::FromStr, time::Instant};

use metrics::histogram;
use tracing::instrument;

use crate::{
  error::SupplyRankError,
  model::{ScoreProfile, SupplierRecord},
};

/// How the three supplier attributes are combined into a single score.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Weighting {
  /// `financial + review + normalized revenue`
  #[default]
  Unweighted,
  /// `0.4 * financial + 0.3 * review + 0.3 * normalized revenue`
  Weighted,
}

impl Weighting {
  pub fn name(&self) -> &'static str {
    match self {
      Weighting::Unweighted => "unweighted",
      Weighting::Weighted => "weighted",
    }
  }

  /// Weights applied to financial score, review score and normalized revenue.
  pub fn weights(&self) -> (f64, f64, f64) {
    match self {
      Weighting::Unweighted => (1.0, 1.0, 1.0),
      Weighting::Weighted => (0.4, 0.3, 0.3),
    }
  }

  pub fn combine(&self, financial_score: f64, review_score: f64, normalized_revenue: f64) -> f64 {
    let (financial, review, revenue) = self.weights();

    financial * financial_score + review * review_score + revenue * normalized_revenue
  }
}

impl FromStr for Weighting {
  type Err = SupplyRankError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "unweighted" => Ok(Weighting::Unweighted),
      "weighted" => Ok(Weighting::Weighted),
      other => Err(SupplyRankError::ConfigError(format!("unsupported score weighting: {other}"))),
    }
  }
}

impl fmt::Display for Weighting {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Largest defined revenue of a row set.
pub fn max_revenue<'r>(records: impl IntoIterator<Item = &'r SupplierRecord>) -> Option<f64> {
  records.into_iter().filter_map(|record| record.revenue).reduce(f64::max)
}

/// Rescale a revenue to the 0-100 range of a reference maximum.
///
/// Undefined revenue, or a maximum that is undefined or not positive, yields 0.
/// Values above the maximum are not clamped, so a similarity target may land
/// above 100.
pub fn normalize_revenue(revenue: Option<f64>, max: Option<f64>) -> f64 {
  match (revenue, max) {
    (Some(revenue), Some(max)) if max > 0.0 => (revenue / max * 100.0).max(0.0),
    _ => 0.0,
  }
}

/// A borrowed table row with scores derived against a specific row set.
#[derive(Clone, Copy, Debug)]
pub struct Scored<'t> {
  pub record: &'t SupplierRecord,
  pub normalized_revenue: f64,
  pub score: f64,
}

/// Recompute normalized revenue and combined score against the given rows.
///
/// The maximum revenue is taken from `records` itself, never from the whole
/// table, so the result depends on how the rows were filtered.
#[instrument(name = "compute_scores", skip_all, fields(weighting = weighting.name(), candidates = records.len()))]
pub fn rescore<'t>(records: &[&'t SupplierRecord], weighting: Weighting) -> Vec<Scored<'t>> {
  let then = Instant::now();
  let max = max_revenue(records.iter().copied());

  let scored = records
    .iter()
    .map(|&record| {
      let normalized_revenue = normalize_revenue(record.revenue, max);

      Scored {
        record,
        normalized_revenue,
        score: weighting.combine(record.financial_score, record.review_score, normalized_revenue),
      }
    })
    .collect::<Vec<_>>();

  histogram!("supplyrank_candidates").record(records.len() as f64);
  histogram!("supplyrank_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

  scored
}

/// Sum of absolute differences between a candidate and a target.
///
/// `target_normalized_revenue` must be normalized against the same maximum as
/// the candidate.
pub fn similarity(candidate: &Scored<'_>, target: &ScoreProfile, target_normalized_revenue: f64) -> f64 {
  (candidate.record.financial_score - target.financial_score).abs()
    + (candidate.record.review_score - target.review_score).abs()
    + (candidate.normalized_revenue - target_normalized_revenue).abs()
}

#[cfg(test)]
mod tests {
  use float_cmp::approx_eq;

  use super::{Weighting, max_revenue, normalize_revenue, rescore};
  use crate::model::SupplierRecord;

  fn record(name: &str, financial: f64, review: f64, revenue: Option<f64>) -> SupplierRecord {
    SupplierRecord::builder(name)
      .country("usa")
      .product_name("valve")
      .financial_score(financial)
      .review_score(review)
      .maybe_revenue(revenue)
      .build()
  }

  #[test]
  fn weighting_presets() {
    assert!(approx_eq!(f64, Weighting::Unweighted.combine(80.0, 70.0, 100.0), 250.0));
    assert!(approx_eq!(f64, Weighting::Weighted.combine(80.0, 70.0, 100.0), 83.0, epsilon = 1e-9));
  }

  #[test]
  fn weighting_from_str() {
    assert!(matches!("unweighted".parse(), Ok(Weighting::Unweighted)));
    assert!(matches!("weighted".parse(), Ok(Weighting::Weighted)));
    assert!(matches!("other".parse::<Weighting>(), Err(_)));
  }

  #[test]
  fn normalize_undefined_values() {
    assert_eq!(normalize_revenue(None, Some(100.0)), 0.0);
    assert_eq!(normalize_revenue(Some(50.0), None), 0.0);
    assert_eq!(normalize_revenue(Some(50.0), Some(0.0)), 0.0);
    assert_eq!(normalize_revenue(Some(50.0), Some(100.0)), 50.0);
  }

  #[test]
  fn normalized_revenue_stays_in_range() {
    let records = [
      record("A", 1.0, 1.0, Some(250.0)),
      record("B", 1.0, 1.0, Some(0.0)),
      record("C", 1.0, 1.0, None),
      record("D", 1.0, 1.0, Some(17.5)),
    ];

    let refs = records.iter().collect::<Vec<_>>();

    assert_eq!(max_revenue(refs.iter().copied()), Some(250.0));

    for scored in rescore(&refs, Weighting::Unweighted) {
      assert!((0.0..=100.0).contains(&scored.normalized_revenue));
    }
  }

  #[test]
  fn rescore_uses_own_maximum() {
    let records = [record("A", 80.0, 70.0, Some(100.0)), record("B", 60.0, 90.0, Some(50.0))];

    let scored = rescore(&[&records[1]], Weighting::Unweighted);

    assert_eq!(scored[0].normalized_revenue, 100.0);
    assert_eq!(scored[0].score, 250.0);

    let scored = rescore(&records.iter().collect::<Vec<_>>(), Weighting::Unweighted);

    assert_eq!(scored[0].score, 250.0);
    assert_eq!(scored[1].normalized_revenue, 50.0);
    assert_eq!(scored[1].score, 200.0);
  }

  #[test]
  fn rescore_without_revenue() {
    let records = [record("A", 10.0, 20.0, None), record("B", 30.0, 40.0, None)];
    let scored = rescore(&records.iter().collect::<Vec<_>>(), Weighting::Unweighted);

    assert_eq!(scored[0].normalized_revenue, 0.0);
    assert_eq!(scored[0].score, 30.0);
    assert_eq!(scored[1].score, 70.0);
  }
}
