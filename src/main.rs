mod app;
mod auth;
mod config;
mod db;
mod error;
mod flash;
mod generation;
mod lessons;
#[cfg(test)]
mod memory;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// `LOG_FORMAT=json` switches to one JSON object per line for log shipping.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lessonforge=debug,axum=info,tower_http=info"));
    let fmt = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => fmt.json().flatten_event(true).with_target(false).init(),
        _ => fmt.compact().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr;
    let state = state::AppState::init(config).await?;
    app::serve(app::build_app(state), addr).await
}
