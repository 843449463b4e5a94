use actix_web::{middleware::Logger as ActixLogger, web, App, HttpServer};
use brewgate::{config::GatewayConfig, cors, handlers, logger};
use log::{error, info};
use std::process::{exit, id as process_id};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize the logger before anything can fail
    logger::setup_logger();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load gateway configuration: {e}");
            exit(1);
        }
    };

    info!("PID: {}", process_id());
    info!("Allowed origins: {:?}", config.allowed_origins);
    info!("Stripe API base: {}", config.stripe.api_base);

    let target_server = config.bind_addr();
    let data = web::Data::new(config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(ActixLogger::default())
            .wrap(cors::build_cors(&data.allowed_origins))
            .app_data(handlers::json_config())
            .app_data(data.clone())
            .configure(handlers::routes)
    })
    .bind(&target_server)?
    .run();

    info!("Server running at http://{}", target_server);

    let execution = server.await;

    // Log when the server stops
    info!("Worker stopped with PID: {}", process_id());

    if let Err(e) = execution {
        error!("Failed to run the server: {:?}", e);
        return Err(e);
    }

    Ok(())
}
