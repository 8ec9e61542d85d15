use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::{RecordForm, RecordId};
use crate::types::forms::DriverForm;
use crate::types::views::{DriverEditView, DriverFormView, DriverListView};
use crate::{RosterError, router::RosterState};

/// GET /drivers
pub async fn list_drivers(
    State(state): State<RosterState>,
) -> Result<Json<DriverListView>, RosterError> {
    Ok(Json(state.records.list_drivers().await?))
}

/// GET /adddriver
pub async fn add_driver_form(State(state): State<RosterState>) -> Json<DriverFormView> {
    Json(state.records.driver_form())
}

/// POST /adddriver
pub async fn add_driver(
    State(state): State<RosterState>,
    RecordForm(form): RecordForm<DriverForm>,
) -> Result<Response, RosterError> {
    state.records.create_driver(form).await?;
    Ok(Redirect::to("/drivers").into_response())
}

/// GET /editdriver/{id}
pub async fn edit_driver_form(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<DriverEditView>, RosterError> {
    Ok(Json(state.records.driver_for_edit(id).await?))
}

/// POST /editdriver/{id}
pub async fn edit_driver(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
    RecordForm(form): RecordForm<DriverForm>,
) -> Result<Response, RosterError> {
    state.records.update_driver(id, form).await?;
    Ok(Redirect::to("/drivers").into_response())
}

/// GET /removedriver/{id} -> 409 while a route still points at the driver.
pub async fn remove_driver(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Response, RosterError> {
    state.records.delete_driver(id).await?;
    Ok(Redirect::to("/drivers").into_response())
}
