use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::attendance::AttendanceService;
use crate::attendance::recorder::MarkAttendanceRequest;
use crate::attendance::summary::RangeSummary;
use crate::error::{ApiError, ErrorBody};
use crate::model::attendance::{AttendanceAction, AttendanceEvent};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Range start, formatted yyyyMMdd. Defaults to seven days ago.
    pub from_date: Option<String>,
    /// Range end, formatted yyyyMMdd. Defaults to today.
    pub to_date: Option<String>,
}

fn parse_compact_date(raw: Option<&String>) -> Result<Option<NaiveDate>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y%m%d")
            .map(Some)
            .map_err(|_| ApiError::InvalidDate(value.clone())),
    }
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{employee_id}/mark/{action}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("action", Path, description = "PUNCH_IN or PUNCH_OUT")
    ),
    request_body(content = MarkAttendanceRequest, description = "Optional timestamp and remarks"),
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceEvent),
        (status = 400, description = "Invalid action, future timestamp, or illegal punch sequence", body = ErrorBody),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<(u64, String)>,
    body: Option<web::Json<MarkAttendanceRequest>>,
) -> Result<impl Responder, ApiError> {
    let (employee_id, raw_action) = path.into_inner();
    let action = AttendanceAction::from_str(&raw_action)
        .map_err(|_| ApiError::InvalidAction(raw_action))?;
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    let event = service.mark_attendance(employee_id, action, request).await?;
    Ok(HttpResponse::Ok().json(event))
}

/// List attendance events
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "All recorded events, chronological", body = [AttendanceEvent]),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let events = service.list_attendance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// Last attendance event
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{employee_id}/last",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Most recent event", body = AttendanceEvent),
        (status = 404, description = "Employee not found, or no events recorded yet", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn last_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    match service.last_attendance(path.into_inner()).await? {
        Some(event) => Ok(HttpResponse::Ok().json(event)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "No attendance records found"
        }))),
    }
}

/// Attendance summary for a date range
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{employee_id}/summary",
    params(
        ("employee_id", Path, description = "Employee ID"),
        SummaryQuery
    ),
    responses(
        (status = 200, description = "Daily and range totals", body = RangeSummary),
        (status = 400, description = "Unparsable date bound", body = ErrorBody),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
    query: web::Query<SummaryQuery>,
) -> Result<impl Responder, ApiError> {
    let from = parse_compact_date(query.from_date.as_ref())?;
    let to = parse_compact_date(query.to_date.as_ref())?;

    let summary = service
        .attendance_summary(path.into_inner(), from, to)
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}
