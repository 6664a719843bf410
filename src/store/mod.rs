pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::model::attendance::AttendanceEvent;
use crate::model::employee::{Employee, NewEmployee};

/// Employee record store. The attendance core only reads; registration is
/// plain CRUD layered on top of the same trait.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, new: NewEmployee) -> anyhow::Result<Employee>;
    async fn find_by_id(&self, id: u64) -> anyhow::Result<Option<Employee>>;
    async fn exists_by_id(&self, id: u64) -> anyhow::Result<bool>;
    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool>;
    /// Page of employees (newest first) plus the unpaged total.
    async fn list(&self, page: u32, per_page: u32) -> anyhow::Result<(Vec<Employee>, i64)>;
}

/// Durable attendance event store. All reads are chronological with ties in
/// insertion order; `save` assigns the identifier.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn last_event(&self, employee_id: u64) -> anyhow::Result<Option<AttendanceEvent>>;
    async fn events_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<AttendanceEvent>>;
    async fn events_in_range(
        &self,
        employee_id: u64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> anyhow::Result<Vec<AttendanceEvent>>;
    async fn events_for_employee(&self, employee_id: u64)
        -> anyhow::Result<Vec<AttendanceEvent>>;
    async fn save(&self, event: AttendanceEvent) -> anyhow::Result<AttendanceEvent>;
}
