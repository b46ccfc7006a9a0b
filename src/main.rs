use jobhunt::{
    app::{build_app, init_tracing, serve},
    config::AppConfig,
    db,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let app_state = AppState::init(config).await?;

    db::migrate(&app_state.db).await?;

    let config = app_state.config.clone();
    let app = build_app(app_state);
    serve(app, &config).await
}
