use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::{RecordForm, RecordId};
use crate::types::forms::OverrideForm;
use crate::{RosterError, router::RosterState};

fn route_page(route_id: Option<i64>) -> Redirect {
    match route_id {
        Some(id) => Redirect::to(&format!("/route/{id}")),
        None => Redirect::to("/students"),
    }
}

/// GET /routeboarding/{student_id} -> flips on_bus and returns to the student's route.
pub async fn toggle_boarding(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Response, RosterError> {
    let student = state.records.toggle_boarding(id).await?;
    Ok(route_page(student.route_id).into_response())
}

/// POST /offloadstudents/{route_id}
pub async fn offload_students(
    State(state): State<RosterState>,
    RecordId(route_id): RecordId,
) -> Result<Response, RosterError> {
    state.records.offload_route(route_id).await?;
    Ok(route_page(Some(route_id)).into_response())
}

/// POST /overridestudent/{route_id} with `student=<id>` in the body.
pub async fn override_student(
    State(state): State<RosterState>,
    RecordId(route_id): RecordId,
    RecordForm(form): RecordForm<OverrideForm>,
) -> Result<Response, RosterError> {
    let student = state.records.reassign_student(route_id, form).await?;
    Ok(route_page(student.route_id).into_response())
}
