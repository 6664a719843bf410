use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    // Rate limiting
    pub rate_register_per_min: u32,
    pub rate_mark_per_min: u32,
    pub rate_query_per_min: u32,

    pub api_prefix: String,

    pub schedule: WorkSchedule,

    /// Raw holiday table, `YYYY-MM-DD=Name` entries separated by `;`.
    pub holidays: String,
}

/// Workday boundaries. `work_end` and `overtime_threshold` are independent
/// knobs: the observed deployments disagree on whether overtime starts at
/// the end of the workday (17:00) or an hour later (18:00).
#[derive(Debug, Clone, Copy)]
pub struct WorkSchedule {
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub overtime_threshold: NaiveTime,
    pub default_summary_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_mark_per_min: env::var("RATE_MARK_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_query_per_min: env::var("RATE_QUERY_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            schedule: WorkSchedule {
                work_start: time_var("WORK_START", "09:00"),
                work_end: time_var("WORK_END", "17:00"),
                overtime_threshold: time_var("OVERTIME_THRESHOLD", "18:00"),
                default_summary_days: env::var("DEFAULT_SUMMARY_DAYS")
                    .unwrap_or_else(|_| "7".to_string())
                    .parse()
                    .unwrap(),
            },

            holidays: env::var("HOLIDAYS").unwrap_or_default(),
        }
    }
}

fn time_var(key: &str, default: &str) -> NaiveTime {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .unwrap_or_else(|_| panic!("{key} must be a time formatted HH:MM, got '{raw}'"))
}
