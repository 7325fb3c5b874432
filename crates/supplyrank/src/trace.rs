use std::io::Write;

use anyhow::Context;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{
  Resource,
  metrics::MeterProviderBuilder,
  propagation::TraceContextPropagator,
  trace::{BatchConfigBuilder, BatchSpanProcessor, Sampler, SdkTracerProvider},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_opentelemetry::MetricsLayer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{self, Config, Env, TracingExporter};

pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  let builder = PrometheusBuilder::new()
    .add_global_label("service", "supplyrank")
    .set_buckets_for_metric(Matcher::Full("supplyrank_candidates".into()), &[1.0, 5.0, 10.0, 50.0, 100.0, 1000.0])?
    .set_buckets_for_metric(Matcher::Full("supplyrank_scoring_latency_seconds".into()), &[0.000001, 0.000005, 0.000015, 0.000050, 0.000100, 0.001])?;

  builder.install_recorder()
}

/// Keeps the log writer and the span exporter alive.
///
/// Dropping it flushes pending log lines and shuts the exporter down.
pub struct TraceGuards {
  _logging: WorkerGuard,
  trace: Option<SdkTracerProvider>,
}

impl Drop for TraceGuards {
  fn drop(&mut self) {
    if let Some(provider) = &self.trace
      && let Err(err) = provider.shutdown()
    {
      eprintln!("could not shut down tracing provider: {err}");
    }
  }
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> TraceGuards {
  let (appender, logging_guard) = tracing_appender::non_blocking(writer);
  let logging_formatter = logging_layer(&config.env, appender);

  let mut guards = TraceGuards { _logging: logging_guard, trace: None };
  let tracing_layers = tracing_layers(&mut guards, config);

  global::set_text_map_propagator(TraceContextPropagator::new());

  let filter = EnvFilter::builder().try_from_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let layers = filter.and_then(logging_formatter);

  let (layers, error) = match tracing_layers {
    Ok(tracing_layers) => (tracing_layers.into_iter().fold(layers.boxed(), |registry, layer| registry.and_then(layer).boxed()), None),
    Err(err) => (layers.boxed(), Some(err)),
  };

  tracing_subscriber::registry().with(layers).init();

  if let Some(err) = error {
    tracing::warn!(%err, "could not initialize tracing provider");
  }

  guards
}

fn logging_layer(env: &Env, appender: NonBlocking) -> Box<dyn Layer<Registry> + Send + Sync> {
  match env {
    Env::Production => json_subscriber::layer()
      .with_writer(appender)
      .flatten_event(true)
      .flatten_span_list_on_top_level(true)
      .with_current_span(false)
      .with_span_list(false)
      .boxed(),

    // Colors would end up in captured test output
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(!cfg!(test)).boxed(),
  }
}

type TracingLayers = Vec<Box<dyn Layer<Registry> + Send + Sync>>;

fn tracing_layers(guards: &mut TraceGuards, config: &Config) -> anyhow::Result<TracingLayers> {
  if !config.enable_tracing {
    return Ok(vec![]);
  }

  let resource = Resource::builder_empty().with_attributes([KeyValue::new("service.name", "supplyrank")]).build();

  let tracing_provider_builder = SdkTracerProvider::builder()
    .with_sampler(Sampler::TraceIdRatioBased(config::parse_env("OTEL_TRACES_SAMPLER_ARGS", 0.1).unwrap_or(0.1)))
    .with_resource(resource.clone());

  match config.tracing_exporter {
    TracingExporter::Otlp => {
      let tracing_otlp = opentelemetry_otlp::SpanExporter::builder().with_tonic().build().context("could not build span exporter")?;
      let processor = BatchSpanProcessor::builder(tracing_otlp)
        .with_batch_config(BatchConfigBuilder::default().with_max_queue_size(8192).build())
        .build();

      let provider = tracing_provider_builder.with_span_processor(processor).build();
      let tracer = provider.tracer("supplyrank");

      let metrics_otlp = opentelemetry_otlp::MetricExporter::builder().with_tonic().build().context("could not build metrics exporter")?;
      let metrics_provider = MeterProviderBuilder::default().with_periodic_exporter(metrics_otlp).with_resource(resource).build();

      global::set_meter_provider(metrics_provider.clone());

      guards.trace = Some(provider);

      Ok(vec![tracing_opentelemetry::layer().with_tracer(tracer).boxed(), MetricsLayer::new(metrics_provider).boxed()])
    }
  }
}
