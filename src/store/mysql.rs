//! MySQL backends over `sqlx` runtime queries. The action column holds the
//! wire string (`PUNCH_IN` / `PUNCH_OUT`) and is parsed back on read, so an
//! unknown value in the table surfaces as an error instead of a panic.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::MySqlPool;

use super::{AttendanceStore, EmployeeStore};
use crate::model::attendance::{AttendanceAction, AttendanceEvent};
use crate::model::employee::{Employee, NewEmployee};

pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn create(&self, new: NewEmployee) -> anyhow::Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, email, department)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.department)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_id(),
            name: new.name,
            email: new.email,
            department: new.department,
        })
    }

    async fn find_by_id(&self, id: u64) -> anyhow::Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, department FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn exists_by_id(&self, id: u64) -> anyhow::Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn list(&self, page: u32, per_page: u32) -> anyhow::Result<(Vec<Employee>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        let offset = page.saturating_sub(1) * per_page;
        let data = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, department FROM employees ORDER BY id DESC LIMIT ? OFFSET ?",
        )
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((data, total))
    }
}

pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const EVENT_COLUMNS: &str = "id, employee_id, timestamp, date, time, action, duration_minutes, \
     is_working_day, is_holiday, holiday_name, is_weekend, is_overtime, remarks";

#[derive(sqlx::FromRow)]
struct EventRow {
    id: u64,
    employee_id: u64,
    timestamp: NaiveDateTime,
    date: NaiveDate,
    time: NaiveTime,
    action: String,
    duration_minutes: Option<i64>,
    is_working_day: bool,
    is_holiday: bool,
    holiday_name: Option<String>,
    is_weekend: bool,
    is_overtime: bool,
    remarks: Option<String>,
}

impl TryFrom<EventRow> for AttendanceEvent {
    type Error = anyhow::Error;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let action = AttendanceAction::from_str(&row.action).map_err(|_| {
            anyhow::anyhow!("unknown action '{}' in attendance row {}", row.action, row.id)
        })?;
        Ok(AttendanceEvent {
            id: Some(row.id),
            employee_id: row.employee_id,
            timestamp: row.timestamp,
            date: row.date,
            time: row.time,
            action,
            duration_minutes: row.duration_minutes,
            is_working_day: row.is_working_day,
            is_holiday: row.is_holiday,
            holiday_name: row.holiday_name,
            is_weekend: row.is_weekend,
            is_overtime: row.is_overtime,
            remarks: row.remarks,
        })
    }
}

fn into_events(rows: Vec<EventRow>) -> anyhow::Result<Vec<AttendanceEvent>> {
    rows.into_iter().map(AttendanceEvent::try_from).collect()
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn last_event(&self, employee_id: u64) -> anyhow::Result<Option<AttendanceEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM attendance WHERE employee_id = ? \
             ORDER BY timestamp DESC, id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(AttendanceEvent::try_from).transpose()
    }

    async fn events_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM attendance WHERE employee_id = ? AND date = ? \
             ORDER BY timestamp, id"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn events_in_range(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM attendance WHERE employee_id = ? \
             AND timestamp BETWEEN ? AND ? ORDER BY timestamp, id"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn events_for_employee(
        &self,
        employee_id: u64,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM attendance WHERE employee_id = ? ORDER BY timestamp, id"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn save(&self, mut event: AttendanceEvent) -> anyhow::Result<AttendanceEvent> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance
            (employee_id, timestamp, date, time, action, duration_minutes,
             is_working_day, is_holiday, holiday_name, is_weekend, is_overtime, remarks)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.employee_id)
        .bind(event.timestamp)
        .bind(event.date)
        .bind(event.time)
        .bind(event.action.to_string())
        .bind(event.duration_minutes)
        .bind(event.is_working_day)
        .bind(event.is_holiday)
        .bind(&event.holiday_name)
        .bind(event.is_weekend)
        .bind(event.is_overtime)
        .bind(&event.remarks)
        .execute(&self.pool)
        .await?;

        event.id = Some(result.last_insert_id());
        Ok(event)
    }
}
