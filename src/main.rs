use calorie_dashboard::errors::FetchError;
use calorie_dashboard::{daily_source, router, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };

    let source = daily_source(&config.source)?;
    let rows = match source.fetch().await {
        Ok(rows) => rows,
        Err(FetchError::MissingInput(path)) => {
            error!("input file '{}' was not found", path.display());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    info!("loaded {} days of calorie data", rows.len());

    let state = AppState::new(rows, source);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
