use std::sync::Arc;

use tracing::info;

use offhours_api::{HttpApi, SchedulerAdapter};
use offhours_core::{RunConfig, Scheduler};
use offhours_ecs::EcsClusterApi;
use offhours_observe::{LoggerConfig, init_logger};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let log_cfg = LoggerConfig::from_env();
    init_logger(&log_cfg)?;
    info!("logger initialized");

    // 2) scheduler over the live platform
    let run_cfg = RunConfig::from_env();
    let client = Arc::new(EcsClusterApi::from_env().await);
    let scheduler = Arc::new(Scheduler::new(run_cfg, client));

    // 3) one-shot mode: `offhours-agentd start|stop`
    if let Some(action) = std::env::args().nth(1) {
        let resp = scheduler.run(&action).await?;
        println!("{}", resp.body);
        if resp.status_code != 200 {
            std::process::exit(1);
        }
        return Ok(());
    }

    // 4) HTTP trigger
    let addr =
        std::env::var("OFFHOURS_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let router = HttpApi::new(Arc::new(SchedulerAdapter::new(scheduler))).router();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "serving scheduling trigger");
    axum::serve(listener, router).await?;
    Ok(())
}
