//! Handlers for per-module distribution endpoints.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use insights_db::repositories::ProblemsRepo;

use crate::consolidation::{consolidate_answers, consolidate_first_last};
use crate::error::{ApiError, ApiResult};
use crate::serializers::problems::{
    ConsolidatedAnswerDistribution, ConsolidatedFirstLastAnswerDistribution, GradeDistribution,
    SequentialOpenDistribution,
};
use crate::state::AppState;

/// Consolidated answer distribution for one problem. Prefers the first/last
/// response table and falls back to the plain distribution when the
/// pipeline has not produced first/last rows for the module, so the two
/// response shapes share a route.
pub async fn answer_distribution(
    State(state): State<AppState>,
    Path(problem_id): Path<String>,
) -> ApiResult<Response> {
    let formats = &state.config.formats;

    let first_last = ProblemsRepo::first_last_distribution(&state.pool, &problem_id).await?;
    if !first_last.is_empty() {
        let presented: Vec<_> = consolidate_first_last(first_last)
            .iter()
            .map(|(row, consolidated)| {
                ConsolidatedFirstLastAnswerDistribution::from_row(row, *consolidated, formats)
            })
            .collect();
        return Ok(Json(presented).into_response());
    }

    let rows = ProblemsRepo::answer_distribution(&state.pool, &problem_id).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    let presented: Vec<_> = consolidate_answers(rows)
        .iter()
        .map(|(row, consolidated)| {
            ConsolidatedAnswerDistribution::from_row(row, *consolidated, formats)
        })
        .collect();
    Ok(Json(presented).into_response())
}

pub async fn grade_distribution(
    State(state): State<AppState>,
    Path(problem_id): Path<String>,
) -> ApiResult<Json<Vec<GradeDistribution>>> {
    let rows = ProblemsRepo::grade_distribution(&state.pool, &problem_id).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    let presented = rows
        .iter()
        .map(|row| GradeDistribution::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(presented))
}

pub async fn sequential_open_distribution(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> ApiResult<Json<Vec<SequentialOpenDistribution>>> {
    let rows = ProblemsRepo::sequential_open_distribution(&state.pool, &module_id).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    let presented = rows
        .iter()
        .map(|row| SequentialOpenDistribution::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(presented))
}
