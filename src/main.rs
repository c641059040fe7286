use std::env;

use jungle_assistant::{
    assistant::AssistantClient,
    config::Config,
    db::{self, Repository},
    error::AppError,
    logging,
    riot::RiotClient,
    routes,
    setup::setup_user,
    state::AppState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    info!("🌿 Starting...");

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    let repo = Repository::new(pool);

    let riot = RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_second,
        config.riot_timeout,
    )?;

    if env::args().nth(1).as_deref() == Some("setup-user") {
        setup_user(
            &riot,
            &repo,
            &config.default_user_riot_id,
            &config.default_user_tag_line,
            &config.default_region,
        )
        .await?;
        return Ok(());
    }

    let assistant = AssistantClient::new(
        config.assistant_api_key.clone(),
        config.assistant_base_url.clone(),
        config.assistant_model.clone(),
    )?;

    tokio::spawn(riot.metrics().log_loop());
    tokio::spawn(assistant.metrics().log_loop());

    let state = AppState::new(riot, assistant, repo, config.default_region.clone());
    let app = routes::app(state, &config.allowed_origins);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
