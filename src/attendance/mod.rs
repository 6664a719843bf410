pub mod calendar;
pub mod recorder;
pub mod sequencer;
pub mod summary;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use crate::clock::Clock;
use crate::config::WorkSchedule;
use crate::store::{AttendanceStore, EmployeeStore};
use self::calendar::HolidayCalendar;

/// Orchestrates punch sequencing and summary aggregation over the injected
/// collaborators. Cheap to clone; all state is shared behind `Arc`s.
#[derive(Clone)]
pub struct AttendanceService {
    employees: Arc<dyn EmployeeStore>,
    store: Arc<dyn AttendanceStore>,
    holidays: Arc<dyn HolidayCalendar>,
    clock: Arc<dyn Clock>,
    schedule: WorkSchedule,
    // Serializes read-validate-write per employee. Coarser than the
    // (employee, date) scope the sequencer requires, which is fine: it only
    // over-serializes punches an employee issues across a midnight boundary.
    punch_locks: Arc<Mutex<HashMap<u64, Arc<AsyncMutex<()>>>>>,
}

impl AttendanceService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        store: Arc<dyn AttendanceStore>,
        holidays: Arc<dyn HolidayCalendar>,
        clock: Arc<dyn Clock>,
        schedule: WorkSchedule,
    ) -> Self {
        Self {
            employees,
            store,
            holidays,
            clock,
            schedule,
            punch_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn employees(&self) -> Arc<dyn EmployeeStore> {
        self.employees.clone()
    }

    fn punch_lock(&self, employee_id: u64) -> Arc<AsyncMutex<()>> {
        let mut locks = self.punch_locks.lock().expect("punch lock map poisoned");
        locks.entry(employee_id).or_default().clone()
    }
}
