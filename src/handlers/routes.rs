use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::db::Route;
use crate::middleware::{RecordForm, RecordId};
use crate::types::forms::RouteForm;
use crate::types::views::{
    DetailView, RosterView, RouteDetail, RouteEditView, RouteFormView, RouteListView,
};
use crate::{RosterError, router::RosterState};

/// GET /user -> routes in number order for the operator.
pub async fn operator_routes(
    State(state): State<RosterState>,
) -> Result<Json<Vec<Route>>, RosterError> {
    Ok(Json(state.records.operator_routes().await?))
}

/// GET /route/{id}
pub async fn route_roster(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<RosterView>, RosterError> {
    Ok(Json(state.records.roster(id).await?))
}

/// GET /routes
pub async fn list_routes(
    State(state): State<RosterState>,
) -> Result<Json<RouteListView>, RosterError> {
    Ok(Json(state.records.list_routes().await?))
}

/// GET /addroute
pub async fn add_route_form(
    State(state): State<RosterState>,
) -> Result<Json<RouteFormView>, RosterError> {
    Ok(Json(state.records.route_form().await?))
}

/// POST /addroute
pub async fn add_route(
    State(state): State<RosterState>,
    RecordForm(form): RecordForm<RouteForm>,
) -> Result<Response, RosterError> {
    state.records.create_route(form).await?;
    Ok(Redirect::to("/routes").into_response())
}

/// GET /editroute/{id}
pub async fn edit_route_form(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<RouteEditView>, RosterError> {
    Ok(Json(state.records.route_for_edit(id).await?))
}

/// POST /editroute/{id}
pub async fn edit_route(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
    RecordForm(form): RecordForm<RouteForm>,
) -> Result<Response, RosterError> {
    state.records.update_route(id, form).await?;
    Ok(Redirect::to("/routes").into_response())
}

/// GET /removeroute/{id} -> 409 while students are still assigned.
pub async fn remove_route(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Response, RosterError> {
    state.records.delete_route(id).await?;
    Ok(Redirect::to("/routes").into_response())
}

/// GET /routesexpanded/{id}
pub async fn route_expanded(
    State(state): State<RosterState>,
    RecordId(id): RecordId,
) -> Result<Json<DetailView<RouteDetail>>, RosterError> {
    Ok(Json(state.records.route_detail(id).await?))
}
