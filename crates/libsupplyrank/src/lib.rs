mod engine;
mod error;
mod filter;
mod model;
mod ranking;
mod source;
mod table;

pub mod scoring;

pub use crate::source::{CsvSource, StaticSource, SupplierSource, read_records};

pub mod prelude {
  pub use crate::engine::{EngineConfig, RecommendStrategy, SupplyRank};
  pub use crate::error::SupplyRankError;
  pub use crate::model::{Bound, LocationQuery, ProductQuery, Ranked, ScoreProfile, SupplierRecord};
  pub use crate::scoring::Weighting;
  pub use crate::source::{CsvSource, StaticSource, SupplierSource};
  pub use crate::table::SupplierTable;
}
