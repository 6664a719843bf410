use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::AttendanceService;
use crate::error::ApiError;
use crate::model::attendance::{AttendanceAction, AttendanceEvent};

/// One day's worth of events, paired into sessions.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub attendances: Vec<AttendanceEvent>,
    pub is_working_day: bool,
    pub is_holiday: bool,
    pub is_weekend: bool,
    #[schema(example = 8.0)]
    pub total_hours: f64,
    #[schema(example = 0.5)]
    pub overtime_hours: f64,
    #[schema(example = "Christmas Day", nullable = true)]
    pub holiday_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DurationTotals {
    #[schema(example = 40.0)]
    pub total_hours: f64,
    #[schema(example = 1.5)]
    pub total_overtime_hours: f64,
    #[schema(example = 5)]
    pub total_working_days: u32,
    #[schema(example = 0)]
    pub total_holidays: u32,
    #[schema(example = 2)]
    pub total_weekends: u32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub from_date: NaiveDate,
    #[schema(example = "2026-03-09", value_type = String, format = "date")]
    pub to_date: NaiveDate,
    pub daily_summaries: Vec<DailySummary>,
    pub total_summary: DurationTotals,
}

/// Pairs consecutive punch-in/punch-out events of a single day and returns
/// (total_hours, overtime_hours). A punch-in with no following punch-out
/// contributes no completed-session hours; overtime counts only sessions
/// whose punch-out is flagged overtime.
fn paired_hours(events: &[AttendanceEvent]) -> (f64, f64) {
    let mut total = 0.0;
    let mut overtime = 0.0;
    let mut open_punch_in: Option<NaiveDateTime> = None;

    for event in events {
        match event.action {
            AttendanceAction::PunchIn => open_punch_in = Some(event.timestamp),
            AttendanceAction::PunchOut => {
                if let Some(started) = open_punch_in.take() {
                    let hours = (event.timestamp - started).num_minutes() as f64 / 60.0;
                    total += hours;
                    if event.is_overtime {
                        overtime += hours;
                    }
                }
            }
        }
    }

    (total, overtime)
}

/// BTreeMap so days come out in date order regardless of fetch order.
fn group_by_date(events: Vec<AttendanceEvent>) -> BTreeMap<NaiveDate, Vec<AttendanceEvent>> {
    let mut groups: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.date).or_default().push(event);
    }
    groups
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time"))
}

impl AttendanceService {
    /// Aggregates the employee's events over `[from, to]` into per-day and
    /// range totals. Missing bounds default to the trailing
    /// `default_summary_days` window ending today. Reads a snapshot and
    /// takes no lock; a punch recorded mid-computation simply lands in the
    /// next summary.
    pub async fn attendance_summary(
        &self,
        employee_id: u64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<RangeSummary, ApiError> {
        info!(employee_id, ?from, ?to, "fetching attendance summary");
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(ApiError::EmployeeNotFound(employee_id))?;

        let today = self.clock.now().date();
        let from_date =
            from.unwrap_or_else(|| today - Duration::days(self.schedule.default_summary_days));
        let to_date = to.unwrap_or(today);

        let events = self
            .store
            .events_in_range(employee_id, start_of_day(from_date), end_of_day(to_date))
            .await?;
        debug!(count = events.len(), "attendance records in range");

        let mut daily_summaries = Vec::new();
        let mut totals = DurationTotals {
            total_hours: 0.0,
            total_overtime_hours: 0.0,
            total_working_days: 0,
            total_holidays: 0,
            total_weekends: 0,
        };

        for (date, day_events) in group_by_date(events) {
            let (total_hours, overtime_hours) = paired_hours(&day_events);
            // All events of a day carry identical calendar annotations by
            // construction, so the first one speaks for the whole day.
            let first = &day_events[0];

            if first.is_working_day {
                totals.total_working_days += 1;
            }
            if first.is_holiday {
                totals.total_holidays += 1;
            }
            if first.is_weekend {
                totals.total_weekends += 1;
            }
            totals.total_hours += total_hours;
            totals.total_overtime_hours += overtime_hours;

            debug!(date = %date, total_hours, overtime_hours, "daily summary");

            daily_summaries.push(DailySummary {
                date,
                is_working_day: first.is_working_day,
                is_holiday: first.is_holiday,
                is_weekend: first.is_weekend,
                holiday_name: first.holiday_name.clone(),
                attendances: day_events,
                total_hours,
                overtime_hours,
            });
        }

        info!(
            employee_id,
            total_hours = totals.total_hours,
            overtime_hours = totals.total_overtime_hours,
            working_days = totals.total_working_days,
            holidays = totals.total_holidays,
            weekends = totals.total_weekends,
            "summary computed"
        );

        Ok(RangeSummary {
            employee_id: employee.id,
            employee_name: employee.name,
            from_date,
            to_date,
            daily_summaries,
            total_summary: totals,
        })
    }

    /// Every event ever recorded for the employee, chronological.
    pub async fn list_attendance(
        &self,
        employee_id: u64,
    ) -> Result<Vec<AttendanceEvent>, ApiError> {
        if !self.employees.exists_by_id(employee_id).await? {
            return Err(ApiError::EmployeeNotFound(employee_id));
        }
        Ok(self.store.events_for_employee(employee_id).await?)
    }

    /// The employee's most recent event, if any.
    pub async fn last_attendance(
        &self,
        employee_id: u64,
    ) -> Result<Option<AttendanceEvent>, ApiError> {
        if !self.employees.exists_by_id(employee_id).await? {
            return Err(ApiError::EmployeeNotFound(employee_id));
        }
        Ok(self.store.last_event(employee_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::AttendanceService;
    use crate::attendance::recorder::MarkAttendanceRequest;
    use crate::attendance::testutil::{at, service_with_employee};
    use crate::model::attendance::AttendanceAction::{PunchIn, PunchOut};
    use chrono::NaiveDateTime;

    async fn punch(service: &AttendanceService, action: AttendanceAction, ts: NaiveDateTime) {
        service
            .mark_attendance(
                1,
                action,
                MarkAttendanceRequest {
                    timestamp: Some(ts),
                    remarks: None,
                },
            )
            .await
            .unwrap();
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[actix_web::test]
    async fn three_day_range_sums_only_completed_sessions() {
        let service = service_with_employee(at(2026, 3, 4, 23, 0), "").await;
        // Day 1: one completed 8-hour session. Day 2: nothing. Day 3: an
        // unmatched punch-in.
        punch(&service, PunchIn, at(2026, 3, 2, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 2, 17, 0)).await;
        punch(&service, PunchIn, at(2026, 3, 4, 10, 0)).await;

        let summary = service
            .attendance_summary(
                1,
                Some(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
                Some(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(summary.daily_summaries.len(), 2);
        let day1 = &summary.daily_summaries[0];
        let day3 = &summary.daily_summaries[1];
        assert_eq!(day1.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert!(close(day1.total_hours, 8.0));
        assert_eq!(day3.date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert!(close(day3.total_hours, 0.0));

        // Range totals are additive over the day groups.
        let daily_sum: f64 = summary.daily_summaries.iter().map(|d| d.total_hours).sum();
        assert!(close(summary.total_summary.total_hours, 8.0));
        assert!(close(summary.total_summary.total_hours, daily_sum));
        assert_eq!(summary.total_summary.total_working_days, 2);
        assert_eq!(summary.employee_name, "Ada Lovelace");
    }

    #[actix_web::test]
    async fn overtime_hours_count_only_flagged_sessions() {
        let service = service_with_employee(at(2026, 3, 2, 23, 0), "").await;
        punch(&service, PunchIn, at(2026, 3, 2, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 2, 17, 0)).await;
        punch(&service, PunchIn, at(2026, 3, 2, 18, 30)).await;
        punch(&service, PunchOut, at(2026, 3, 2, 20, 30)).await;

        let summary = service
            .attendance_summary(
                1,
                Some(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
                Some(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
            )
            .await
            .unwrap();

        let day = &summary.daily_summaries[0];
        assert!(close(day.total_hours, 10.0));
        assert!(close(day.overtime_hours, 2.0));
        assert!(close(summary.total_summary.total_overtime_hours, 2.0));
    }

    #[actix_web::test]
    async fn day_flags_are_counted_once_per_day_group() {
        // 2026-03-07 is a Saturday; 2026-03-09 is a configured holiday.
        let service =
            service_with_employee(at(2026, 3, 9, 23, 0), "2026-03-09=Foundation Day").await;
        punch(&service, PunchIn, at(2026, 3, 7, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 7, 12, 0)).await;
        punch(&service, PunchIn, at(2026, 3, 9, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 9, 12, 0)).await;

        let summary = service
            .attendance_summary(
                1,
                Some(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()),
                Some(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(summary.total_summary.total_weekends, 1);
        assert_eq!(summary.total_summary.total_holidays, 1);
        assert_eq!(summary.total_summary.total_working_days, 0);
        assert_eq!(
            summary.daily_summaries[1].holiday_name.as_deref(),
            Some("Foundation Day")
        );
    }

    #[actix_web::test]
    async fn missing_bounds_default_to_the_trailing_week() {
        let service = service_with_employee(at(2026, 3, 9, 12, 0), "").await;
        // Eight days back: outside the default window.
        punch(&service, PunchIn, at(2026, 3, 1, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 1, 10, 0)).await;
        // Exactly seven days back: the window's first day.
        punch(&service, PunchIn, at(2026, 3, 2, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 2, 13, 0)).await;

        let summary = service.attendance_summary(1, None, None).await.unwrap();

        assert_eq!(summary.from_date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(summary.to_date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(summary.daily_summaries.len(), 1);
        assert!(close(summary.total_summary.total_hours, 4.0));
    }

    #[actix_web::test]
    async fn summary_for_unknown_employee_is_rejected() {
        let service = service_with_employee(at(2026, 3, 2, 9, 0), "").await;
        let err = service.attendance_summary(42, None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::EmployeeNotFound(42)));
    }

    #[actix_web::test]
    async fn listing_and_last_event_track_recorded_punches() {
        let service = service_with_employee(at(2026, 3, 2, 23, 0), "").await;
        punch(&service, PunchIn, at(2026, 3, 2, 9, 0)).await;
        punch(&service, PunchOut, at(2026, 3, 2, 17, 0)).await;

        let events = service.list_attendance(1).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, PunchIn);
        assert_eq!(events[1].action, PunchOut);

        let last = service.last_attendance(1).await.unwrap().unwrap();
        assert_eq!(last.action, PunchOut);

        let err = service.list_attendance(7).await.unwrap_err();
        assert!(matches!(err, ApiError::EmployeeNotFound(7)));
    }

    #[test]
    fn unmatched_punch_in_contributes_no_hours() {
        let punch_in = AttendanceEvent {
            id: Some(1),
            employee_id: 1,
            timestamp: at(2026, 3, 2, 9, 0),
            date: at(2026, 3, 2, 9, 0).date(),
            time: at(2026, 3, 2, 9, 0).time(),
            action: PunchIn,
            duration_minutes: None,
            is_working_day: true,
            is_holiday: false,
            holiday_name: None,
            is_weekend: false,
            is_overtime: false,
            remarks: None,
        };

        let (total, overtime) = paired_hours(&[punch_in]);
        assert!(close(total, 0.0));
        assert!(close(overtime, 0.0));
    }
}
