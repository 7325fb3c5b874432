use std::{fmt, str::FromStr, sync::Arc};

use bon::bon;
use tracing::instrument;

use crate::{
  error::SupplyRankError,
  filter,
  model::{LocationQuery, ProductQuery, Ranked},
  ranking,
  scoring::{self, Weighting},
  source::SupplierSource,
  table::SupplierTable,
};

/// How product recommendations are ranked.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RecommendStrategy {
  /// Suppliers of the product in the country, closest to the requested
  /// profile first.
  #[default]
  Similarity,
  /// Suppliers of the product in the country that strictly exceed the
  /// requested profile, best combined score first.
  Criteria,
}

impl FromStr for RecommendStrategy {
  type Err = SupplyRankError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "similarity" => Ok(RecommendStrategy::Similarity),
      "criteria" => Ok(RecommendStrategy::Criteria),
      other => Err(SupplyRankError::ConfigError(format!("unsupported recommendation strategy: {other}"))),
    }
  }
}

impl fmt::Display for RecommendStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecommendStrategy::Similarity => f.write_str("similarity"),
      RecommendStrategy::Criteria => f.write_str("criteria"),
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
  /// Weighting of the top suppliers and criteria recommendations.
  pub weighting: Weighting,
  /// Weighting of the location recommendations.
  pub threshold_weighting: Weighting,
  /// Number of suppliers returned by truncated rankings.
  pub top_n: usize,
  pub recommend_strategy: RecommendStrategy,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      weighting: Weighting::Unweighted,
      threshold_weighting: Weighting::Weighted,
      top_n: 5,
      recommend_strategy: RecommendStrategy::Similarity,
    }
  }
}

/// The supplier ranking engine.
///
/// It owns the supplier table, loaded once from a [`SupplierSource`] when the
/// engine is built and never modified afterwards. Every operation only reads
/// the table and derives per-request scores on the side, so the engine can be
/// cheaply cloned and shared across threads.
///
/// # Examples
///
/// ```rust
/// use libsupplyrank::prelude::*;
///
/// let source = StaticSource(vec![
///   SupplierRecord::builder("Acme").country("USA").product_name("Valve").financial_score(80.0).review_score(70.0).revenue(100.0).build(),
///   SupplierRecord::builder("Bolt").country("USA").product_name("Valve").financial_score(60.0).review_score(90.0).revenue(50.0).build(),
/// ]);
///
/// let engine = SupplyRank::new(source).build().unwrap();
/// let top = engine.top_suppliers().unwrap();
///
/// assert_eq!(top[0].name, "Acme");
/// ```
#[derive(Clone, Debug)]
pub struct SupplyRank {
  table: Arc<SupplierTable>,
  config: EngineConfig,
}

#[bon]
impl SupplyRank {
  /// Load the suppliers from `source` and build the engine.
  ///
  /// Fails if the source cannot be read, if it lacks a required column, or if
  /// the configuration is invalid. An empty source is accepted, but every
  /// ranking will then fail with [`SupplyRankError::EmptyTable`].
  #[allow(clippy::new_ret_no_self)]
  #[builder(start_fn = new, finish_fn = build)]
  pub fn _new<S: SupplierSource>(#[builder(start_fn)] source: S, #[builder(default)] config: EngineConfig) -> Result<SupplyRank, SupplyRankError> {
    if config.top_n == 0 {
      return Err(SupplyRankError::ConfigError("the number of returned suppliers must be at least 1".into()));
    }

    let table = SupplierTable::new(source.load()?, config.weighting);

    match table.is_empty() {
      true => tracing::warn!(source = source.describe(), "supplier table is empty"),
      false => tracing::info!(source = source.describe(), suppliers = table.len(), weighting = %config.weighting, "loaded supplier table"),
    }

    Ok(SupplyRank { table: Arc::new(table), config })
  }
}

impl SupplyRank {
  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub fn table(&self) -> &SupplierTable {
    &self.table
  }

  /// Whether there is any supplier to rank.
  pub fn is_ready(&self) -> bool {
    !self.table.is_empty()
  }

  /// Best suppliers of the whole table, by descending combined score.
  #[instrument(skip_all)]
  pub fn top_suppliers(&self) -> Result<Vec<Ranked>, SupplyRankError> {
    self.ensure_loaded()?;

    let candidates = self.table.records().iter().collect::<Vec<_>>();
    let scored = scoring::rescore(&candidates, self.config.weighting);

    Ok(ranking::top_by_score(scored, Some(self.config.top_n)))
  }

  /// Recommend suppliers of a product, with the configured strategy.
  pub fn recommend(&self, query: &ProductQuery) -> Result<Vec<Ranked>, SupplyRankError> {
    match self.config.recommend_strategy {
      RecommendStrategy::Similarity => self.recommend_similar(query),
      RecommendStrategy::Criteria => self.recommend_by_criteria(query),
    }
  }

  /// Suppliers of a product in a country, closest to the query profile first.
  #[instrument(skip_all, fields(strategy = "similarity"))]
  pub fn recommend_similar(&self, query: &ProductQuery) -> Result<Vec<Ranked>, SupplyRankError> {
    self.ensure_loaded()?;

    let candidates = filter::by_product(&self.table, &query.country, &query.product_name)?;
    let scored = scoring::rescore(&candidates, self.config.weighting);

    Ok(ranking::closest(scored, &query.profile, self.config.top_n))
  }

  /// Suppliers of a product in a country that strictly exceed the query
  /// profile, by descending combined score.
  #[instrument(skip_all, fields(strategy = "criteria"))]
  pub fn recommend_by_criteria(&self, query: &ProductQuery) -> Result<Vec<Ranked>, SupplyRankError> {
    self.ensure_loaded()?;

    let candidates = filter::by_product(&self.table, &query.country, &query.product_name)?;
    let candidates = filter::above(candidates, &query.profile)?;
    let scored = scoring::rescore(&candidates, self.config.weighting);

    Ok(ranking::top_by_score(scored, Some(self.config.top_n)))
  }

  /// Every supplier in a country and state at or above the query minimums, by
  /// descending combined score.
  #[instrument(skip_all)]
  pub fn recommend_by_location(&self, query: &LocationQuery) -> Result<Vec<Ranked>, SupplyRankError> {
    self.ensure_loaded()?;

    let candidates = filter::by_location(&self.table, query)?;
    let scored = scoring::rescore(&candidates, self.config.threshold_weighting);

    Ok(ranking::top_by_score(scored, None))
  }

  fn ensure_loaded(&self) -> Result<(), SupplyRankError> {
    match self.table.is_empty() {
      true => Err(SupplyRankError::EmptyTable),
      false => Ok(()),
    }
  }
}
