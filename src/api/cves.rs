//! REST API endpoint for recently published CVEs

use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;

use crate::api::error::ApiError;
use crate::model::CveRecord;
use crate::service::NvdClient;

#[derive(OpenApi)]
#[openapi(
    paths(get_recent_cves),
    components(schemas(CveRecord)),
    tags((name = "cves", description = "Recently published CVEs from the NVD"))
)]
pub struct ApiDoc;

/// List CVEs published in the last three days
///
/// Relays a single NVD query (first page, 100 results) and returns one
/// simplified record per upstream vulnerability, in upstream order.
#[utoipa::path(
    get,
    path = "/api/cves",
    responses(
        (status = 200, description = "Recent CVEs retrieved successfully", body = Vec<CveRecord>),
        (status = 500, description = "Missing API key or upstream failure")
    ),
    tag = "cves"
)]
#[get("/api/cves")]
pub async fn get_recent_cves(nvd: web::Data<NvdClient>) -> Result<HttpResponse, ApiError> {
    let records = nvd.recent_cves().await?;

    tracing::info!(count = records.len(), "Returning recent CVEs");

    Ok(HttpResponse::Ok().json(records))
}

/// Configure CVE routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_recent_cves);
}
