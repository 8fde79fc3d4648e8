//! Menu catalogue handler.

use actix_web::{HttpResponse, get, web};

use crate::domain::{ApiResult, menu_sections};
use crate::inbound::http::dto::{MenuQuery, MenuResponse};
use crate::inbound::http::error::ErrorEnvelope;

/// Menu sections in display order, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Menu", body = MenuResponse),
        (status = 400, description = "Unknown category", body = ErrorEnvelope)
    ),
    tags = ["menu"],
    operation_id = "listMenu",
    security([])
)]
#[get("/menu")]
pub async fn list_menu(query: web::Query<MenuQuery>) -> ApiResult<HttpResponse> {
    let categories = menu_sections(query.category.as_deref())?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=300"))
        .json(MenuResponse {
            success: true,
            categories,
        }))
}
