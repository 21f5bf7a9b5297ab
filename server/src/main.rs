#[macro_use]
extern crate log;
#[macro_use]
extern crate validator_derive;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;

mod config;
mod routes;
mod tests;
mod validate;

use crate::config::Config;
use crate::routes::routes;
use errors::ErrorResponse;
use generator::{GeminiGenerator, QuestionGenerator};

fn startup_error<E: std::fmt::Display>(err: E) -> io::Error {
    error!("Failed to start - {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(startup_error)?;
    let pool = db::new_pool(&config.database_url).map_err(startup_error)?;

    let generator: Arc<dyn QuestionGenerator> = Arc::new(GeminiGenerator::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    ));
    let generator = web::Data::from(generator);
    let pool = web::Data::new(pool);
    let bind_address = config.bind_address.clone();
    let config = web::Data::new(config);

    info!("Listening on {}", bind_address);

    HttpServer::new(move || {
        let cors = match config.client_host {
            Some(ref host) => Cors::default().allowed_origin(host),
            None => Cors::default().allow_any_origin(),
        }
        .allow_any_method()
        .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(pool.clone())
            .app_data(generator.clone())
            .app_data(config.clone())
            .configure(routes)
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::from("Not Found"))
            }))
    })
    .bind(bind_address)?
    .run()
    .await
}
