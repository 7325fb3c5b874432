use std::{
  env::{self, VarError},
  fmt::Display,
  path::PathBuf,
  str::FromStr,
};

use libsupplyrank::prelude::*;

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Suppliers
  pub suppliers_path: PathBuf,
  pub top_n: usize,
  pub weighting: Weighting,
  pub threshold_weighting: Weighting,
  pub recommend_strategy: RecommendStrategy,

  // Debugging
  pub enable_tracing: bool,
  pub tracing_exporter: TracingExporter,
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Self {
    let engine = EngineConfig::default();

    Self {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      suppliers_path: PathBuf::from("suppliers.csv"),
      top_n: engine.top_n,
      weighting: engine.weighting,
      threshold_weighting: engine.threshold_weighting,
      recommend_strategy: engine.recommend_strategy,
      enable_tracing: false,
      tracing_exporter: TracingExporter::Otlp,
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let defaults = Config::default();

    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
      suppliers_path: parse_env("SUPPLIERS_PATH", defaults.suppliers_path)?,
      top_n: parse_env("TOP_N", defaults.top_n)?,
      weighting: parse_env("SCORE_WEIGHTING", defaults.weighting)?,
      threshold_weighting: parse_env("THRESHOLD_SCORE_WEIGHTING", defaults.threshold_weighting)?,
      recommend_strategy: parse_env("RECOMMEND_STRATEGY", defaults.recommend_strategy)?,
      enable_tracing: env::var("ENABLE_TRACING").unwrap_or_default() == "1",
      tracing_exporter: env::var("TRACING_EXPORTER").unwrap_or("otlp".into()).parse()?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    if config.top_n == 0 {
      return Err(AppError::ConfigError("TOP_N must be at least 1".into()));
    }

    Ok(config)
  }

  pub fn engine_config(&self) -> EngineConfig {
    EngineConfig {
      weighting: self.weighting,
      threshold_weighting: self.threshold_weighting,
      top_n: self.top_n,
      recommend_strategy: self.recommend_strategy,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TracingExporter {
  Otlp,
}

impl FromStr for TracingExporter {
  type Err = AppError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "otlp" => Ok(TracingExporter::Otlp),
      other => Err(AppError::ConfigError(format!("unsupported tracing exporter kind: {other}"))),
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => Ok(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}")).into()),
    },
  }
}
