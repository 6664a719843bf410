use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::{AttendanceService, calendar, sequencer};
use crate::error::ApiError;
use crate::model::attendance::{AttendanceAction, AttendanceEvent};

/// Optional punch request body. A missing timestamp defaults to the server
/// clock; a supplied one must not lie in the future.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[schema(example = "2026-03-02T09:00:00", value_type = String, format = "date-time", nullable = true)]
    pub timestamp: Option<NaiveDateTime>,
    #[schema(example = "forgot badge", nullable = true)]
    pub remarks: Option<String>,
}

impl AttendanceService {
    /// Records one punch: resolves the employee, validates the transition
    /// against the same-day events, annotates calendar and overtime facts,
    /// and appends exactly one event. The per-employee lock keeps the
    /// read-validate-write window serial, so two concurrent identical
    /// punches can never both be accepted.
    pub async fn mark_attendance(
        &self,
        employee_id: u64,
        action: AttendanceAction,
        request: MarkAttendanceRequest,
    ) -> Result<AttendanceEvent, ApiError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or(ApiError::EmployeeNotFound(employee_id))?;

        let lock = self.punch_lock(employee_id);
        let _guard = lock.lock().await;

        let now = self.clock.now();
        let timestamp = match request.timestamp {
            Some(ts) if ts > now => return Err(ApiError::FutureTimestamp),
            Some(ts) => ts,
            None => now,
        };
        // The event's own date scopes the sequencing, not the server's
        // "today": a backdated punch lands in the day it belongs to.
        let date = timestamp.date();
        let time = timestamp.time();

        let existing = self.store.events_for_day(employee_id, date).await?;
        sequencer::validate_transition(sequencer::last_action(&existing), action)?;

        let duration_minutes = match action {
            AttendanceAction::PunchOut => sequencer::open_session_anchor(&existing)
                .map(|punch_in| (timestamp - punch_in.timestamp).num_minutes()),
            AttendanceAction::PunchIn => None,
        };

        let facts = calendar::classify(date, self.holidays.as_ref());
        let event = AttendanceEvent {
            id: None,
            employee_id,
            timestamp,
            date,
            time,
            action,
            duration_minutes,
            is_working_day: facts.is_working_day(),
            is_holiday: facts.is_holiday,
            holiday_name: facts.holiday_name,
            is_weekend: facts.is_weekend,
            is_overtime: calendar::is_overtime(time, self.schedule.overtime_threshold),
            remarks: request.remarks,
        };

        let saved = self.store.save(event).await?;
        info!(employee_id, action = %action, date = %date, "attendance recorded");
        Ok(saved)
    }
}
