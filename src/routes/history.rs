use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::identity::CallerIdentity;
use crate::response::{ok, paginated, AppError};
use crate::services::{report, summary};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records/:id", get(get_record))
        .route("/records/:id/report", get(download_report))
        .route("/summary", get(get_summary))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRecordsQuery {
    page: Option<u64>,
    per_page: Option<u64>,
}

impl ListRecordsQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
    fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

async fn list_records(
    identity: CallerIdentity,
    Query(q): Query<ListRecordsQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let page = q.page();
    let per_page = q.per_page();
    let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let records = state.store().get_user_posture_records_with_offset(
        &identity.user_id,
        per_page as usize,
        offset,
    )?;
    let total = state.store().count_user_posture_records(&identity.user_id)? as u64;
    Ok(paginated(records, total, page, per_page))
}

async fn get_record(
    identity: CallerIdentity,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store().get_user_posture_record(&identity.user_id, &id)?;
    Ok(ok(record))
}

async fn download_report(
    identity: CallerIdentity,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store().get_user_posture_record(&identity.user_id, &id)?;
    let body = report::render(&record, Utc::now());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report::report_filename(&record.id)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn get_summary(
    identity: CallerIdentity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let records = state
        .store()
        .get_user_posture_records(&identity.user_id, usize::MAX)?;
    Ok(ok(summary::summarize(&records)))
}
