use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{boarding, drivers, routes, students};
use crate::service::RecordService;

#[derive(Clone)]
pub struct RosterState {
    pub records: RecordService,
}

impl RosterState {
    pub fn new(records: RecordService) -> Self {
        Self { records }
    }
}

pub fn roster_router(state: RosterState) -> Router {
    Router::new()
        // operator
        .route("/user", get(routes::operator_routes))
        .route("/route/{id}", get(routes::route_roster))
        .route("/routeboarding/{id}", get(boarding::toggle_boarding))
        .route("/offloadstudents/{id}", post(boarding::offload_students))
        .route("/overridestudent/{id}", post(boarding::override_student))
        // students
        .route("/students", get(students::list_students))
        .route(
            "/addstudent",
            get(students::add_student_form).post(students::add_student),
        )
        .route(
            "/editstudent/{id}",
            get(students::edit_student_form).post(students::edit_student),
        )
        .route("/removestudent/{id}", get(students::remove_student))
        .route("/studentexpanded/{id}", get(students::student_expanded))
        // routes
        .route("/routes", get(routes::list_routes))
        .route("/addroute", get(routes::add_route_form).post(routes::add_route))
        .route(
            "/editroute/{id}",
            get(routes::edit_route_form).post(routes::edit_route),
        )
        .route("/removeroute/{id}", get(routes::remove_route))
        .route("/routesexpanded/{id}", get(routes::route_expanded))
        // drivers
        .route("/drivers", get(drivers::list_drivers))
        .route(
            "/adddriver",
            get(drivers::add_driver_form).post(drivers::add_driver),
        )
        .route(
            "/editdriver/{id}",
            get(drivers::edit_driver_form).post(drivers::edit_driver),
        )
        .route("/removedriver/{id}", get(drivers::remove_driver))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
