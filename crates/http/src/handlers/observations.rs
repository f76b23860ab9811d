use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use healthstat_core::Observation;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::ObservationsQuery;

pub async fn list_observations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ObservationsQuery>,
) -> Result<Json<Vec<Observation>>, ApiError> {
    let limit = query.capped_limit()?;
    let rows = state
        .query_service
        .find_params(
            query.disease.as_deref(),
            query.indicator.as_deref(),
            query.year.as_deref(),
            query.region.as_deref(),
            Some(limit),
        )
        .await?;
    Ok(Json(rows))
}
