use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// The two legal attendance actions. Any other string is rejected at the
/// edge with `InvalidAction`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceAction {
    PunchIn,
    PunchOut,
}

/// A single recorded punch. Append-only: once saved, neither the action nor
/// the calendar annotations are ever recomputed, even if the holiday
/// calendar changes later.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "employeeId": 1,
        "timestamp": "2026-03-02T09:00:00",
        "date": "2026-03-02",
        "time": "09:00:00",
        "action": "PUNCH_IN",
        "durationMinutes": null,
        "isWorkingDay": true,
        "isHoliday": false,
        "holidayName": null,
        "isWeekend": false,
        "isOvertime": false,
        "remarks": null
    })
)]
pub struct AttendanceEvent {
    /// Absent until the store assigns one.
    #[schema(example = 1)]
    pub id: Option<u64>,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2026-03-02T09:00:00", value_type = String, format = "date-time")]
    pub timestamp: NaiveDateTime,

    /// Partition key for punch sequencing, decomposed from `timestamp`.
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = String)]
    pub time: NaiveTime,

    pub action: AttendanceAction,

    /// Punch-out only: elapsed minutes since the same-day punch-in.
    #[schema(example = 510, nullable = true)]
    pub duration_minutes: Option<i64>,

    pub is_working_day: bool,
    pub is_holiday: bool,
    #[schema(example = "Christmas Day", nullable = true)]
    pub holiday_name: Option<String>,
    pub is_weekend: bool,
    pub is_overtime: bool,

    #[schema(example = "forgot badge", nullable = true)]
    pub remarks: Option<String>,
}
