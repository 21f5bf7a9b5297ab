use actix_web::web;

use crate::validate::{json_config, query_config};

pub mod questions;
pub mod stats;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .app_data(json_config())
        .service(
            web::scope("/api")
                .service(
                    web::scope("/questions")
                        .route("", web::get().to(questions::list))
                        .route("", web::post().to(questions::annotate))
                        .route("/generate", web::post().to(questions::generate))
                        .route("/{question_id}", web::delete().to(questions::delete)),
                )
                .route("/stats", web::get().to(stats::get_stats)),
        );
}
