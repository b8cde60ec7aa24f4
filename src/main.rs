use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use user_crud_api::config::Config;
use user_crud_api::database;
use user_crud_api::routes;
use user_crud_api::services::UserService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let db = database::connect(&config).await.map_err(|e| {
        error!("Failed to connect to MongoDB: {}", e);
        io::Error::other(e)
    })?;

    // One service, and with it one database handle, shared by every worker
    let user_service = web::Data::new(UserService::new(&db));

    let server_addr = config.server_addr();
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(user_service.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
