//! HTTP handlers and route configuration.

mod health;
mod tutorials;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/tutorials")
                    .service(
                        web::resource(["", "/"])
                            .route(web::post().to(tutorials::create))
                            .route(web::get().to(tutorials::find_all))
                            .route(web::delete().to(tutorials::delete_all)),
                    )
                    // Registered before `/{id}` so it is not captured as an id.
                    .route("/published", web::get().to(tutorials::find_all_published))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(tutorials::find_one))
                            .route(web::put().to(tutorials::update))
                            .route(web::delete().to(tutorials::delete)),
                    ),
            ),
    );
}
