//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod health;


use actix_web::{HttpResponse, web};

use crate::middleware::error::{json_config, path_config, query_config};

/// GET /
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to the Scribe Blog API!")
}

/// Configure all application routes.
///
/// Every mutating blog route takes an `Identity`, so all of them sit behind the auth gate.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/", web::get().to(welcome))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                // Blog routes
                .service(
                    web::scope("/blogs")
                        .service(
                            web::resource("")
                                .route(web::get().to(blog::list_blogs))
                                .route(web::post().to(blog::create_blog)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(blog::get_blog))
                                .route(web::put().to(blog::update_blog))
                                .route(web::delete().to(blog::delete_blog)),
                        )
                        .service(
                            web::resource("/{id}/comments")
                                .route(web::post().to(blog::add_comment)),
                        ),
                ),
        );
}
