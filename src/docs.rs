use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::attendance::recorder::MarkAttendanceRequest;
use crate::attendance::summary::{DailySummary, DurationTotals, RangeSummary};
use crate::error::ErrorBody;
use crate::model::attendance::{AttendanceAction, AttendanceEvent};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracking API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracking

This API records employee punch-in/punch-out events and derives working-time
summaries from them.

### 🔹 Key Features
- **Employee Registration**
  - Register employees with a unique email, fetch and list profiles
- **Attendance Marking**
  - Punch in / punch out with strict per-day sequencing
  - Automatic weekend, holiday, and overtime annotation per event
- **Summaries**
  - Per-day worked and overtime hours from paired punch events
  - Range totals with working-day / holiday / weekend counts

### 📦 Response Format
- JSON-based RESTful responses, camelCase field names
- Errors share one body shape: `timestamp`, `status`, `error`, `message`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::last_attendance,
        crate::api::attendance::attendance_summary,
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            EmployeeListResponse,
            AttendanceAction,
            AttendanceEvent,
            MarkAttendanceRequest,
            DailySummary,
            DurationTotals,
            RangeSummary,
            ErrorBody
        )
    ),
    tags(
        (name = "Employee", description = "Employee registration and lookup APIs"),
        (name = "Attendance", description = "Punch marking and summary APIs"),
    )
)]
pub struct ApiDoc;
