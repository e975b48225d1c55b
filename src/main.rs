use lms_mock::api::app_state::AppState;
use lms_mock::config::loader::ConfigLoader;
use lms_mock::console::{Command, execute};
use lms_mock::observability::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _guard = init_tracing(&config.logging)?;
    info!(
        "Starting {} ({}), latency {}ms",
        config.app_name, config.environment, config.api.latency_ms
    );

    let state = AppState::build(&config)?;
    if let Some(record) = state.sessions.restore() {
        info!("Resuming session for {}", record.identity.email);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Ignoring input line: {}", e);
                println!("{}", serde_json::to_string(&e.to_response())?);
                continue;
            }
        };

        let output = execute(&state, command).await;
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    info!("Input closed, metrics: {:?}", state.metrics.snapshot());
    Ok(())
}
