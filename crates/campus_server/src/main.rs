use anyhow::{Context, Result};
use campus_core::SeedOutcome;
use campus_server::{
    build_router,
    config::{AppConfig, DbLocation},
    state::AppState,
};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to load application configuration")?;

    campus_core::init_logging(&config.log_level, &config.log_dir, true)
        .context("failed to initialize logging")?;

    let state = match &config.db {
        DbLocation::Memory => AppState::in_memory(),
        DbLocation::File(path) => AppState::open(path),
    }
    .context("failed to open student store")?;

    if config.seed_on_startup {
        let outcome = state
            .with_student_service(|service| service.seed_default())
            .await
            .context("failed to seed default student")?;
        match outcome {
            SeedOutcome::Seeded(id) => info!("event=startup_seed module=server status=ok id={id}"),
            SeedOutcome::AlreadyPresent => {
                info!("event=startup_seed module=server status=skipped reason=already_present")
            }
        }
    }

    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("event=server_start module=server status=ok address={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=shutdown_signal module=server status=error signal=ctrl_c error={err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(
                    "event=shutdown_signal module=server status=error signal=sigterm error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
