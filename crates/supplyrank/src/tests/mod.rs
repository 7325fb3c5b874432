use std::path::PathBuf;

use libsupplyrank::prelude::*;

use crate::api::{AppState, config::Config};

mod api;
mod middlewares;

fn fixture() -> CsvSource {
  CsvSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../libsupplyrank/tests/fixtures/suppliers.csv"))
}

pub(super) fn state_with(config: Config) -> AppState {
  let engine = SupplyRank::new(fixture()).config(config.engine_config()).build().unwrap();

  AppState { config, prometheus: None, engine }
}

pub(super) fn empty_state() -> AppState {
  let config = Config::default();
  let engine = SupplyRank::new(StaticSource(vec![])).config(config.engine_config()).build().unwrap();

  AppState { config, prometheus: None, engine }
}
