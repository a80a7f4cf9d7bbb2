use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use arts_shop::config::ServerConfig;
use arts_shop::db::establish_connection_pool;
use arts_shop::domain::auth::CredentialVerifier;
use arts_shop::repository::DieselRepository;
use arts_shop::routes;
use arts_shop::services::auth::JwtVerifier;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(JwtVerifier::new(config.admin_jwt_secret.as_bytes()));
    let verifier = web::Data::from(verifier);

    let address = config.address.clone();
    let port = config.port;
    log::info!("Listening on http://{address}:{port}");

    HttpServer::new(move || {
        let cors = config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::REFERRER_POLICY, "no-referrer")),
            )
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(verifier.clone())
            .configure(routes::configure)
    })
    .bind((address, port))?
    .run()
    .await
}
