use std::sync::Arc;

use leadflow::chat::ChatAssistant;
use leadflow::config::AppConfig;
use leadflow::contact::ContactRelay;
use leadflow::llm::openai::OpenAiProvider;
use leadflow::llm::LlmProvider;
use leadflow::mailer::{ReportMailer, SmtpMailer};
use leadflow::report::{GeneratorConfig, ReportGenerator};
use leadflow::server::{api_routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("📡 Leadflow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);

    let mut state = AppState::default();

    if let Some(ref llm_settings) = config.llm {
        let report_provider: Arc<dyn LlmProvider> =
            Arc::new(OpenAiProvider::new(llm_settings, &llm_settings.model)?);
        let chat_provider: Arc<dyn LlmProvider> =
            Arc::new(OpenAiProvider::new(llm_settings, &llm_settings.chat_model)?);

        eprintln!("   Analysis model: {}", llm_settings.model);
        eprintln!("   Chat model: {}", llm_settings.chat_model);

        state.generator = Some(Arc::new(ReportGenerator::new(
            report_provider,
            GeneratorConfig::default(),
        )));
        state.chat = Some(Arc::new(ChatAssistant::new(chat_provider)));
    } else {
        eprintln!("   Analysis: disabled (OPENAI_API_KEY not set)");
    }

    if let Some(mailer_config) = config.mailer.clone() {
        eprintln!(
            "   Email: enabled (SMTP: {}, business: {})",
            mailer_config.smtp_host, mailer_config.business_email
        );
        let mailer: Arc<dyn ReportMailer> = Arc::new(SmtpMailer::new(mailer_config));
        state.mailer = Some(mailer);
    } else {
        eprintln!("   Email: disabled (SMTP_HOST not set)");
    }

    if let Some(contact_config) = config.contact.clone() {
        eprintln!("   Contact relay: enabled ({})", contact_config.endpoint);
        state.contact = Some(Arc::new(ContactRelay::new(contact_config)));
    } else {
        eprintln!("   Contact relay: disabled (CONTACT_FORM_ACCESS_KEY not set)");
    }

    eprintln!();

    let app = api_routes(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Leadflow API server started");
    axum::serve(listener, app).await?;

    Ok(())
}
