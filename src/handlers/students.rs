use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::{RecordForm, RecordId};
use crate::types::forms::StudentForm;
use crate::types::views::{
    DetailView, StudentDetail, StudentEditView, StudentFormView, StudentListView,
};
use crate::{RosterError, router::RosterState};

/// GET /students
pub async fn list_students(
    State(state): State<RosterState>,
) -> Result<Json<StudentListView>, RosterError> {
    Ok(Json(state.records.list_students().await?))
}

/// GET /addstudent -> routes available for the selector.
pub async fn add_student_form(
    State(state): State<RosterState>,
) -> Result<Json<StudentFormView>, RosterError> {
    Ok(Json(state.records.student_form().await?))
}

/// POST /addstudent
pub async fn add_student(
    State(state): State<RosterState>,
    RecordForm(form): RecordForm<StudentForm>,
) -> Result<Response, RosterError> {
    state.records.create_student(form).await?;
    Ok(Redirect::to("/students").into_response())
}

/// GET /editstudent/{id}
pub async fn edit_student_form(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<StudentEditView>, RosterError> {
    Ok(Json(state.records.student_for_edit(id).await?))
}

/// POST /editstudent/{id}
pub async fn edit_student(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
    RecordForm(form): RecordForm<StudentForm>,
) -> Result<Response, RosterError> {
    state.records.update_student(id, form).await?;
    Ok(Redirect::to("/students").into_response())
}

/// GET /removestudent/{id}
pub async fn remove_student(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Response, RosterError> {
    state.records.delete_student(id).await?;
    Ok(Redirect::to("/students").into_response())
}

/// GET /studentexpanded/{id} -> the student, or an empty state when absent.
pub async fn student_expanded(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<DetailView<StudentDetail>>, RosterError> {
    Ok(Json(state.records.student_detail(id).await?))
}
