use std::{future::IntoFuture, net::SocketAddr, sync::Arc};

use cryptoalert::{
    config, error::AppError, routes, services::kv_store::FileStore,
    services::price_poller::spawn_price_poller, templates, AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let kv = Arc::new(FileStore::new(&settings.data_dir)?);
    let state = AppState::new(settings.clone(), templates::build_handlebars()?, kv)?;
    state.engine.init();

    let poller = spawn_price_poller(
        Arc::new(state.feed.clone()),
        state.prices.clone(),
        state.engine.clone(),
        state.events_tx.clone(),
        settings.poll_interval,
    );

    let engine = state.engine.clone();
    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .map_err(|e| AppError::Validation(format!("bad HOST {}: {e}", settings.host)))?;
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Server)?;

    // open SSE streams never finish, so ctrl-c drops the server outright
    tokio::select! {
        res = axum::serve(listener, app).into_future() => res.map_err(AppError::Server)?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    poller.stop().await;
    engine.teardown();

    Ok(())
}
