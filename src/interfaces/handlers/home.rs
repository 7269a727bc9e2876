use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio admin API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": ["/api/v1/projects", "/api/v1/posts"],
            "admin": "/api/v1/admin/dashboard",
            "health": "/api/v1/health"
        }
    }))
}
