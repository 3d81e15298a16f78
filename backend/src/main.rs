//! hbdtoyou server entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use hbdtoyou::adapters::auth::{GoogleIdentityVerifier, GoogleVerifierConfig, JwtTokenCodec};
use hbdtoyou::adapters::clock::SystemClock;
use hbdtoyou::adapters::http::{router, AppState};
use hbdtoyou::adapters::memory::{
    InMemoryContentRepository, InMemoryPaymentRepository, InMemoryTemplateRepository,
    InMemoryUserRepository,
};
use hbdtoyou::application::{AuthCore, AuthSettings, ContentService, PaymentService, RequestExecutor};
use hbdtoyou::config::AppConfig;
use hbdtoyou::domain::content::{Template, TemplateLabel};
use hbdtoyou::domain::foundation::TemplateId;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn template_catalog() -> Result<Vec<Template>, Box<dyn Error>> {
    Ok(vec![
        Template::new(
            TemplateId::new("birthday-classic")?,
            "Classic Birthday",
            TemplateLabel::Free,
            "/thumbnails/birthday-classic.png",
        ),
        Template::new(
            TemplateId::new("birthday-confetti")?,
            "Confetti Birthday",
            TemplateLabel::Free,
            "/thumbnails/birthday-confetti.png",
        ),
        Template::new(
            TemplateId::new("birthday-gallery")?,
            "Photo Gallery",
            TemplateLabel::Premium,
            "/thumbnails/birthday-gallery.png",
        ),
        Template::new(
            TemplateId::new("birthday-story")?,
            "Story Timeline",
            TemplateLabel::Premium,
            "/thumbnails/birthday-story.png",
        ),
    ])
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        port = config.server.port,
        "Configuration loaded"
    );

    let clock = Arc::new(SystemClock);
    let users = Arc::new(InMemoryUserRepository::new());
    let codec = Arc::new(JwtTokenCodec::new(config.auth.token_secret_key.clone()));
    let verifier = Arc::new(GoogleIdentityVerifier::new(
        GoogleVerifierConfig::new(config.auth.google_client_id.clone())
            .with_cache_duration(config.auth.jwks_cache_ttl()),
    ));

    let mut settings = AuthSettings::new(config.auth.token_ttl());
    if let Some(assertion) = config.auth.bypass_assertion() {
        tracing::warn!("Login bypass assertion is enabled");
        settings = settings.with_bypass_assertion(assertion);
    }

    let auth = Arc::new(AuthCore::new(
        users.clone(),
        codec,
        verifier,
        clock.clone(),
        settings,
    ));

    let templates = InMemoryTemplateRepository::new().with_templates(template_catalog()?);
    tracing::info!(count = templates.len(), "Template catalog seeded");

    let policy = config.entitlement.policy();
    let payments = Arc::new(PaymentService::new(
        Arc::new(InMemoryPaymentRepository::new()),
        users.clone(),
        policy,
        clock.clone(),
    ));
    let contents = Arc::new(ContentService::new(
        Arc::new(InMemoryContentRepository::new()),
        Arc::new(templates),
        users,
        policy,
        clock,
    ));

    let executor = RequestExecutor::new(config.scopes.to_timeouts()?);
    let state = AppState::new(auth, executor, payments, contents);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
