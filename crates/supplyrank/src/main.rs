mod api;
mod trace;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;

use anyhow::Context;
use libsupplyrank::prelude::*;
use tokio::signal;

use crate::api::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = Config::from_env()?;
  let _guards = trace::init_tracing(&config, std::io::stdout());

  let engine = SupplyRank::new(CsvSource::new(&config.suppliers_path))
    .config(config.engine_config())
    .build()
    .context("could not load supplier table")?;

  run(config, engine).await
}

async fn run(config: Config, engine: SupplyRank) -> anyhow::Result<()> {
  let app = api::routes(&config, engine)?;
  let listener = tokio::net::TcpListener::bind(&config.listen_addr).await.context("could not create listener")?;

  tracing::info!(supplyrank = env!("CARGO_PKG_VERSION"), "listening on {}", listener.local_addr()?.to_string());

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
    .with_graceful_shutdown(shutdown())
    .await
    .context("could not start app")?;

  Ok(())
}

async fn shutdown() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("failed to install ^C handler");
  };

  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install terminate signal handler")
      .recv()
      .await;
  };

  tokio::select! {
      () = ctrl_c => tracing::info!("received ^C, initiating shutdown"),
      () = terminate => tracing::info!("received terminate signal, initiating shutdown"),
  }
}
