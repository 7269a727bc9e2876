use actix_web::web;

use crate::handlers::public;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(public::published_posts))
    );
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(public::projects))
    );
}
