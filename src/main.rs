use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use forecast_dashboard::{Action, Dashboard, DashboardConfig, Location, OpenMeteoClient, Status};

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load()?;
    forecast_dashboard::logging::init(&config.logging)?;

    let client = OpenMeteoClient::new(&config.weather)?;
    let dashboard = Dashboard::from_config(client, &config)?;

    // Optional preset name, e.g. `forecast-dashboard Tokyo`
    let handle = match std::env::args().nth(1) {
        Some(name) => {
            let location = Location::find_preset(&name)
                .ok_or_else(|| anyhow!("Unknown location '{name}'"))?;
            dashboard.dispatch(Action::SelectLocation(location)).await?
        }
        None => dashboard.refresh().await?,
    };

    if let Some(handle) = handle {
        handle.await.context("Fetch task panicked")?;
    }

    let view = dashboard.view().await;
    match view.status {
        Status::Ready => info!(
            location = ?view.location.as_ref().map(|l| l.name.as_str()),
            "Forecast ready"
        ),
        _ => warn!(error = ?view.error, "Forecast unavailable"),
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&view).context("Failed to serialize dashboard view")?
    );
    Ok(())
}
