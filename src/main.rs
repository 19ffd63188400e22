use lending_desk::{
    adapters::log::NotificationService as LogNotificationService,
    api::{handlers::AppState, router::create_router},
    application::lending::{LendingDesk, ServiceDependencies},
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        loan_period_days = config.policy.loan_period_days,
        fine_per_day = config.policy.fine_per_day,
        "Lending policy loaded"
    );

    // Initialize adapters
    let desk = Arc::new(LendingDesk::new(config.policy));
    let notification_service = Arc::new(LogNotificationService::new());

    // Create service dependencies
    let service_deps = ServiceDependencies {
        desk,
        notification_service,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
