use gate_server::{AppState, build_router, logger};

use gate_auth::{Clock, JwtValidator, RateLimiterStore, SystemClock};

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use log::{info, warn};
use tokio::net::TcpListener;

/// How often the idle-partition sweep runs
const SWEEP_INTERVAL_SECS: u64 = 600;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    // Load and validate configuration; misconfiguration is fatal before
    // the listener binds
    let config = gate_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = gate_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting gate-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Build the JWT validator from the validated auth settings
    let jwt = &config.auth.jwt;
    let (secret, issuer, audience) = match (&jwt.secret, &jwt.issuer, &jwt.audience) {
        (Some(secret), Some(issuer), Some(audience)) => (secret, issuer, audience),
        _ => unreachable!("validate() ensures JWT settings are present"),
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let jwt_validator = Arc::new(JwtValidator::with_hs256(
        secret.as_bytes(),
        issuer,
        audience,
        Duration::seconds(jwt.clock_skew_secs as i64),
        clock.clone(),
    ));

    // Global rate limiter; disabled entirely in development/test modes.
    // The switch is evaluated here, once, never per request.
    let bypass = config.server.environment.rate_limit_exempt();
    if bypass {
        warn!(
            "Global rate limiting DISABLED ({} mode)",
            config.server.environment
        );
    }
    let limiter = Arc::new(RateLimiterStore::new(bypass));

    // Periodic idle-partition sweep bounds memory growth from many
    // distinct client IPs
    let limiter_for_sweep = limiter.clone();
    let clock_for_sweep = clock.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            limiter_for_sweep.sweep_idle(clock_for_sweep.now());
            info!(
                "Rate limiter sweep complete, {} active partition(s)",
                limiter_for_sweep.partition_count()
            );
        }
    });

    // Build application state and router
    let app_state = AppState {
        jwt_validator,
        limiter,
        clock,
    };
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
            Err(e) => warn!("Failed to listen for SIGINT: {}", e),
        }
    })
    .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
