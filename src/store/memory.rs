//! Mutex-guarded in-memory backends. The test suite runs against these; they
//! also serve local runs that have no MySQL at hand.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::{AttendanceStore, EmployeeStore};
use crate::model::attendance::AttendanceEvent;
use crate::model::employee::{Employee, NewEmployee};

#[derive(Default)]
pub struct InMemoryEmployeeStore {
    rows: Mutex<Vec<Employee>>,
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn create(&self, new: NewEmployee) -> anyhow::Result<Employee> {
        let mut rows = self.rows.lock().expect("employee table poisoned");
        let employee = Employee {
            id: rows.len() as u64 + 1,
            name: new.name,
            email: new.email,
            department: new.department,
        };
        rows.push(employee.clone());
        Ok(employee)
    }

    async fn find_by_id(&self, id: u64) -> anyhow::Result<Option<Employee>> {
        let rows = self.rows.lock().expect("employee table poisoned");
        Ok(rows.iter().find(|e| e.id == id).cloned())
    }

    async fn exists_by_id(&self, id: u64) -> anyhow::Result<bool> {
        let rows = self.rows.lock().expect("employee table poisoned");
        Ok(rows.iter().any(|e| e.id == id))
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        let rows = self.rows.lock().expect("employee table poisoned");
        Ok(rows.iter().any(|e| e.email == email))
    }

    async fn list(&self, page: u32, per_page: u32) -> anyhow::Result<(Vec<Employee>, i64)> {
        let rows = self.rows.lock().expect("employee table poisoned");
        let total = rows.len() as i64;
        let offset = (page.saturating_sub(1) * per_page) as usize;
        let data = rows
            .iter()
            .rev()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();
        Ok((data, total))
    }
}

#[derive(Default)]
pub struct InMemoryAttendanceStore {
    rows: Mutex<Vec<AttendanceEvent>>,
}

impl InMemoryAttendanceStore {
    fn sorted(mut events: Vec<AttendanceEvent>) -> Vec<AttendanceEvent> {
        // Stable sort: equal timestamps keep arrival order.
        events.sort_by_key(|e| e.timestamp);
        events
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn last_event(&self, employee_id: u64) -> anyhow::Result<Option<AttendanceEvent>> {
        let rows = self.rows.lock().expect("attendance table poisoned");
        // max_by_key keeps the last maximum, i.e. the latest arrival on ties.
        Ok(rows
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .max_by_key(|e| e.timestamp)
            .cloned())
    }

    async fn events_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let rows = self.rows.lock().expect("attendance table poisoned");
        Ok(Self::sorted(
            rows.iter()
                .filter(|e| e.employee_id == employee_id && e.date == date)
                .cloned()
                .collect(),
        ))
    }

    async fn events_in_range(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let rows = self.rows.lock().expect("attendance table poisoned");
        Ok(Self::sorted(
            rows.iter()
                .filter(|e| {
                    e.employee_id == employee_id && e.timestamp >= from && e.timestamp <= to
                })
                .cloned()
                .collect(),
        ))
    }

    async fn events_for_employee(
        &self,
        employee_id: u64,
    ) -> anyhow::Result<Vec<AttendanceEvent>> {
        let rows = self.rows.lock().expect("attendance table poisoned");
        Ok(Self::sorted(
            rows.iter()
                .filter(|e| e.employee_id == employee_id)
                .cloned()
                .collect(),
        ))
    }

    async fn save(&self, mut event: AttendanceEvent) -> anyhow::Result<AttendanceEvent> {
        let mut rows = self.rows.lock().expect("attendance table poisoned");
        event.id = Some(rows.len() as u64 + 1);
        rows.push(event.clone());
        Ok(event)
    }
}
