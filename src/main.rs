use actix_web::{web, App, HttpServer, middleware};
use actix_cors::Cors;
use apl_grader::api::{configure_routes, handlers, AppState};
use apl_grader::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Falling back to process environment and defaults");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env().map_err(std::io::Error::other)?;
    println!("🔌 Execution service: {}", app_config.executor.endpoint);

    let state = AppState::new(&app_config).await.map_err(|e| {
        log::error!("Startup failed: {}", e);
        std::io::Error::other(e)
    })?;

    println!("🚀 Starting server on {}", app_config.bind_addr);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind(app_config.bind_addr.as_str())?
    .run()
    .await
}
