//! JSON views returned to the presentation layer.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::{Driver, Route, Student};

/// A detail page either shows its record or an explicit empty state.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView<T> {
    Found(T),
    Empty { message: String },
}

impl<T> DetailView<T> {
    pub fn empty(entity: &str, id: i64) -> Self {
        DetailView::Empty {
            message: format!("No {entity} with id {id}."),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentListView {
    pub students: Vec<Student>,
    pub routes: BTreeMap<i64, Route>,
}

#[derive(Debug, Serialize)]
pub struct StudentDetail {
    pub student: Student,
}

#[derive(Debug, Serialize)]
pub struct StudentFormView {
    pub routes: Vec<Route>,
}

#[derive(Debug, Serialize)]
pub struct StudentEditView {
    pub student: Student,
    pub routes: Vec<Route>,
}

/// Driver-to-route lookups built from the route table.
#[derive(Debug, Default, Serialize)]
pub struct DriverRoutes {
    /// The most recently created route for each driver.
    pub current_route_by_driver: BTreeMap<i64, Route>,
    /// Every route per driver, ordered by route number.
    pub routes_by_driver: BTreeMap<i64, Vec<Route>>,
}

impl DriverRoutes {
    pub fn from_routes(routes: &[Route]) -> Self {
        let mut out = DriverRoutes::default();
        for route in routes {
            let Some(driver_id) = route.driver_id else {
                continue;
            };
            out.routes_by_driver
                .entry(driver_id)
                .or_default()
                .push(route.clone());
            out.current_route_by_driver
                .entry(driver_id)
                .and_modify(|current| {
                    if route.id > current.id {
                        *current = route.clone();
                    }
                })
                .or_insert_with(|| route.clone());
        }
        for list in out.routes_by_driver.values_mut() {
            list.sort_by_key(|r| (r.route, r.id));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct RouteListView {
    pub routes: Vec<Route>,
    pub drivers: BTreeMap<i64, Driver>,
    #[serde(flatten)]
    pub driver_routes: DriverRoutes,
}

#[derive(Debug, Serialize)]
pub struct RouteDetail {
    pub route: Route,
    pub students: Vec<Student>,
    pub drivers: BTreeMap<i64, Driver>,
}

/// Operator view of a route's roster.
#[derive(Debug, Serialize)]
pub struct RosterView {
    pub route: Route,
    pub students: Vec<Student>,
    pub all_students: Vec<Student>,
    /// First student on the roster; `None` for an empty route.
    pub representative: Option<Student>,
}

#[derive(Debug, Serialize)]
pub struct RouteFormView {
    pub drivers: Vec<Driver>,
    #[serde(flatten)]
    pub driver_routes: DriverRoutes,
}

#[derive(Debug, Serialize)]
pub struct RouteEditView {
    pub route: Route,
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Serialize)]
pub struct DriverListView {
    pub drivers: Vec<Driver>,
    #[serde(flatten)]
    pub driver_routes: DriverRoutes,
}

/// Input hints for the blank driver form.
#[derive(Debug, Serialize)]
pub struct DriverFormView {
    pub dob_format: &'static str,
    pub name_max_len: usize,
    pub conditions_max_len: usize,
    pub contact_max_len: usize,
}

#[derive(Debug, Serialize)]
pub struct DriverEditView {
    pub driver: Driver,
}

pub fn index_by_id<T, F>(items: Vec<T>, id_of: F) -> BTreeMap<i64, T>
where
    F: Fn(&T) -> i64,
{
    items.into_iter().map(|item| (id_of(&item), item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(id: i64, number: i64, driver_id: Option<i64>) -> Route {
        Route {
            id,
            route: number,
            driver_id,
        }
    }

    #[test]
    fn driver_routes_keep_every_route_and_pick_the_latest() {
        let routes = vec![
            route(1, 40, Some(7)),
            route(2, 12, Some(7)),
            route(3, 20, None),
            route(4, 5, Some(8)),
        ];
        let dr = DriverRoutes::from_routes(&routes);

        assert_eq!(dr.current_route_by_driver[&7].id, 2);
        assert_eq!(dr.current_route_by_driver[&8].id, 4);
        let numbers: Vec<i64> = dr.routes_by_driver[&7].iter().map(|r| r.route).collect();
        assert_eq!(numbers, vec![12, 40]);
        assert!(!dr.routes_by_driver.values().flatten().any(|r| r.id == 3));
    }

    #[test]
    fn detail_view_serializes_with_a_state_tag() {
        let found = DetailView::Found(RouteEditView {
            route: route(1, 12, None),
            drivers: vec![],
        });
        let v = serde_json::to_value(&found).unwrap();
        assert_eq!(v["state"], "found");
        assert_eq!(v["route"]["route"], 12);

        let empty: DetailView<RouteEditView> = DetailView::empty("route", 9);
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"state": "empty", "message": "No route with id 9."})
        );
    }
}
