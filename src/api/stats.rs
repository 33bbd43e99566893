//! Catalog statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::CatalogOverview, AppState};

/// Catalog-wide totals
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog totals", body = CatalogOverview)
    )
)]
pub async fn get_overview(State(state): State<AppState>) -> AppResult<Json<CatalogOverview>> {
    let overview = state.services.stats.overview().await?;
    Ok(Json(overview))
}
