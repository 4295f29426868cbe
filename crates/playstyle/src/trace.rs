use std::io::Write;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{
  Resource,
  metrics::MeterProviderBuilder,
  propagation::TraceContextPropagator,
  trace::{BatchConfigBuilder, BatchSpanProcessor, Sampler, SdkTracerProvider, TracerProviderBuilder},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_opentelemetry::MetricsLayer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{self, Config, Env};

pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  let builder = PrometheusBuilder::new()
    .add_global_label("service", "playstyle")
    .set_buckets_for_metric(Matcher::Full("playstyle_scoring_scores".into()), &[1.0, 3.0, 6.0, 7.0, 9.0])?
    .set_buckets_for_metric(Matcher::Full("playstyle_scoring_latency_seconds".into()), &[0.000001, 0.000005, 0.000015, 0.000050, 0.000100])?
    .set_buckets_for_metric(Matcher::Full("playstyle_recommendation_candidates".into()), &[0.0, 10.0, 50.0, 100.0, 500.0])?;

  builder.install_recorder()
}

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

  let logging_formatter = match config.env {
    #[cfg(not(test))]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(true).boxed(),
    Env::Production => fmt::layer().json().flatten_event(true).with_current_span(false).with_span_list(false).with_writer(appender).boxed(),

    #[cfg(test)]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(false).boxed(),
  };

  let guard = TraceGuards { _logging: logging_guard, trace: None };
  let (guard, tracing_layers) = tracing_layers(guard, config);
  let mut errors: Vec<anyhow::Error> = vec![];

  global::set_text_map_propagator(TraceContextPropagator::new());

  let filter = EnvFilter::builder().try_from_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let layers = filter.and_then(logging_formatter);

  let layers = match tracing_layers {
    Ok(tracing_layers) => tracing_layers.into_iter().fold(layers.boxed(), |registry, layer| registry.and_then(layer).boxed()),

    Err(err) => {
      errors.push(err);
      layers.boxed()
    }
  };

  tracing_subscriber::registry().with(layers).init();

  for err in errors {
    tracing::warn!(%err, "could not initialize tracing provider");
  }

  guard
}

type TracingLayers = Vec<Box<dyn Layer<Registry> + Send + Sync>>;

fn tracing_layers(mut guards: TraceGuards, config: &Config) -> (TraceGuards, Result<TracingLayers, anyhow::Error>) {
  if !config.enable_tracing {
    return (guards, Ok(vec![]));
  }

  let resource = Resource::builder_empty().with_attributes([KeyValue::new("service.name", "playstyle")]).build();

  let tracing_provider_builder = SdkTracerProvider::builder()
    .with_sampler(Sampler::TraceIdRatioBased(config::parse_env("OTEL_TRACES_SAMPLER_ARGS", 0.1).unwrap_or(0.1)))
    .with_resource(resource.clone());

  match otlp_layers(tracing_provider_builder, resource) {
    Ok((provider, layers)) => {
      guards.trace = Some(provider);

      (guards, Ok(layers))
    }

    Err(err) => (guards, Err(err)),
  }
}

fn otlp_layers(tracing_provider_builder: TracerProviderBuilder, resource: Resource) -> Result<(SdkTracerProvider, TracingLayers), anyhow::Error> {
  let tracing_otlp = opentelemetry_otlp::SpanExporter::builder().with_tonic().build()?;
  let processor = BatchSpanProcessor::builder(tracing_otlp)
    .with_batch_config(BatchConfigBuilder::default().with_max_queue_size(8192).build())
    .build();

  let provider = tracing_provider_builder.with_span_processor(processor).build();
  let tracer = provider.tracer("playstyle");

  let metrics_otlp = opentelemetry_otlp::MetricExporter::builder().with_tonic().build()?;
  let metrics_provider = MeterProviderBuilder::default().with_periodic_exporter(metrics_otlp).with_resource(resource).build();

  global::set_meter_provider(metrics_provider.clone());

  Ok((provider, vec![tracing_opentelemetry::layer().with_tracer(tracer).boxed(), MetricsLayer::new(metrics_provider).boxed()]))
}
