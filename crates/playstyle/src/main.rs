mod api;
mod trace;

#[cfg(test)]
mod tests;

use anyhow::Context;
use rustls::crypto::aws_lc_rs;
use tokio::signal;

use crate::api::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  aws_lc_rs::default_provider()
    .install_default()
    .map_err(|_| anyhow::anyhow!("could not install default cryptography provider"))?;

  let config = Config::from_env()?;

  run(config).await
}

async fn run(config: Config) -> anyhow::Result<()> {
  let _guards = trace::init_tracing(&config, std::io::stdout());
  let app = api::routes(&config).await?;
  let listener = tokio::net::TcpListener::bind(&config.listen_addr).await.context("could not create listener")?;

  tracing::info!(playstyle = env!("CARGO_PKG_VERSION"), "listening on {}", listener.local_addr()?);

  axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>())
    .with_graceful_shutdown(shutdown())
    .await
    .context("could not start app")?;

  Ok(())
}

async fn shutdown() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      tracing::error!(%err, "failed to install ^C handler");
      std::future::pending::<()>().await;
    }
  };

  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }

      Err(err) => {
        tracing::error!(%err, "failed to install terminate signal handler");
        std::future::pending::<()>().await;
      }
    }
  };

  tokio::select! {
      () = ctrl_c => tracing::info!("received ^C, initiating shutdown"),
      () = terminate => tracing::info!("received terminate signal, initiating shutdown"),
  }
}
