use std::sync::Arc;

use inventory_service::{http, telemetry, InMemoryRecordStore, InventoryWorkflow, ServiceConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::load()?;
    telemetry::init(&config.log_level);

    info!(bind_addr = %config.bind_addr, "starting inventory service");

    let workflow = Arc::new(InventoryWorkflow::new(InMemoryRecordStore::new()));
    if let Err(e) = http::serve(workflow, &config.bind_addr).await {
        error!(error = %e, "inventory service stopped");
        return Err(e.into());
    }
    Ok(())
}
