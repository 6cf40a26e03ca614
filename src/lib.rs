use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::auth::{login, logout, me, register, send_verification_email, verify_email};
use crate::routes::leads::{
    create_lead, delete_lead, list_leads, search_lead, show_lead, update_lead,
};
use crate::services::verification::StoredTokenVerification;

pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let verifier = StoredTokenVerification::new(repo.clone());

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(register)
                    .service(login)
                    .service(verify_email)
                    .service(send_verification_email)
                    .service(me)
                    .service(logout)
                    .service(list_leads)
                    .service(search_lead)
                    .service(create_lead)
                    .service(show_lead)
                    .service(update_lead)
                    .service(delete_lead),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
