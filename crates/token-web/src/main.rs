#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use token_web::app::{App, shell};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conf = get_configuration(None).map_err(|e| {
        log::error!("Failed to load Leptos configuration: {}", e);
        e
    })?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    // Parse interactions.toml now so a bad file is logged at startup
    log::info!(
        "Copy feedback {} ms, outbound events as {}/{}",
        token_web::config::INTERACTIONS.copy.feedback_ms,
        token_web::config::INTERACTIONS.outbound.event_category,
        token_web::config::INTERACTIONS.outbound.event_action
    );

    let site_root = leptos_options.site_root.clone();
    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let options = leptos_options.clone();
            move || shell(options.clone())
        })
        .fallback_service(ServeDir::new(&*site_root))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        log::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(|e| {
        log::error!("Server error: {}", e);
        e
    })?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Client entry point is `hydrate()` in lib.rs
}
