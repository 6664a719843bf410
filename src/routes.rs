use crate::{
    api::{attendance, employee},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let mark_limiter = Arc::new(build_limiter(config.rate_mark_per_min));
    let query_limiter = Arc::new(build_limiter(config.rate_query_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .wrap(register_limiter.clone())
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .wrap(query_limiter.clone())
                            .route(web::get().to(employee::get_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/{employee_id}/mark/{action}
                    .service(
                        web::resource("/{employee_id}/mark/{action}")
                            .wrap(mark_limiter.clone())
                            .route(web::post().to(attendance::mark_attendance)),
                    )
                    // /attendance/{employee_id}/summary
                    .service(
                        web::resource("/{employee_id}/summary")
                            .wrap(query_limiter.clone())
                            .route(web::get().to(attendance::attendance_summary)),
                    )
                    // /attendance/{employee_id}/last
                    .service(
                        web::resource("/{employee_id}/last")
                            .wrap(query_limiter.clone())
                            .route(web::get().to(attendance::last_attendance)),
                    )
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .wrap(query_limiter.clone())
                            .route(web::get().to(attendance::list_attendance)),
                    ),
            ),
    );
}
