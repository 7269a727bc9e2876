use actix_web::{web, Scope};

use crate::{
    entities::{post::Post, project::Project, tech_stack::TechStackEntry},
    handlers::admin,
    use_cases::dashboard::DashboardResource,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/dashboard")
                    .route(web::get().to(admin::dashboard))
            )
            .service(
                web::resource("/dashboard/tab")
                    .route(web::put().to(admin::select_tab))
            )
            .service(resource_scope::<Project>())
            .service(resource_scope::<Post>())
            .service(resource_scope::<TechStackEntry>())
    );
}

/// The manager workflow for one resource, mounted at `/admin/<tab>`.
fn resource_scope<R: DashboardResource>() -> Scope {
    web::scope(&format!("/{}", R::TAB.as_str()))
        .service(
            web::resource("")
                .route(web::get().to(admin::list::<R>))
        )
        .service(
            web::resource("/new")
                .route(web::post().to(admin::begin_create::<R>))
        )
        .service(
            web::resource("/draft")
                .route(web::patch().to(admin::update_draft_field::<R>))
                .route(web::delete().to(admin::cancel_edit::<R>))
        )
        .service(
            web::resource("/draft/save")
                .route(web::post().to(admin::save::<R>))
        )
        .service(
            web::resource("/error/dismiss")
                .route(web::post().to(admin::dismiss_error::<R>))
        )
        .service(
            web::resource("/{id}/edit")
                .route(web::post().to(admin::begin_edit::<R>))
        )
        .service(
            web::resource("/{id}")
                .route(web::delete().to(admin::delete::<R>))
        )
}
