use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use healthstat_core::{AggregateStats, YearStats};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::StatsQuery;

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<AggregateStats>, ApiError> {
    let stats = state
        .stats_service
        .stats(
            query.disease.as_deref().unwrap_or_default(),
            query.indicator.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(stats))
}

pub async fn get_stats_by_year(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Vec<YearStats>>, ApiError> {
    let per_year = state
        .stats_service
        .stats_by_year(
            query.disease.as_deref().unwrap_or_default(),
            query.indicator.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(per_year))
}
