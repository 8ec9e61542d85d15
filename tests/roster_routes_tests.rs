use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "bus-roster-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let mut cfg = bus_roster::config::Config::default();
    cfg.database_url = format!("sqlite:{}", db_path.display());

    let records = bus_roster::service::RecordService::connect(&cfg)
        .await
        .expect("failed to open database");
    let state = bus_roster::router::RosterState::new(records);
    let app = bus_roster::router::roster_router(state);
    TestApp { app, db_path }
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn json_body(resp: Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not json")
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect without location")
}

/// Creates Amy (driver), route 12 driven by Amy, and Bo on route 12.
/// Returns (driver_id, route_id, student_id).
async fn seed(app: &Router) -> (i64, i64, i64) {
    let resp = post_form(
        app,
        "/adddriver",
        "first_name=Amy&last_name=Lee&dob=1980-01-01&conditions=",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/drivers");
    let drivers = json_body(get(app, "/drivers").await).await;
    let driver_id = drivers["drivers"][0]["id"].as_i64().expect("driver id");

    let resp = post_form(app, "/addroute", &format!("route=12&driver_id={driver_id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let routes = json_body(get(app, "/routes").await).await;
    let route_id = routes["routes"][0]["id"].as_i64().expect("route id");

    let resp = post_form(
        app,
        "/addstudent",
        &format!(
            "first_name=Bo&last_name=Ng&dob=2012-05-01&conditions=\
             &contact_info=0412555010&route_id={route_id}"
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/students");
    let students = json_body(get(app, "/students").await).await;
    let student_id = students["students"][0]["id"].as_i64().expect("student id");

    (driver_id, route_id, student_id)
}

#[tokio::test]
async fn driver_route_student_show_up_in_route_detail() {
    let t = spawn_app("detail").await;
    let (driver_id, route_id, _) = seed(&t.app).await;

    let resp = get(&t.app, &format!("/routesexpanded/{route_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail = json_body(resp).await;
    assert_eq!(detail["state"], "found");
    assert_eq!(detail["route"]["route"], 12);
    assert_eq!(detail["students"][0]["first_name"], "Bo");
    assert_eq!(detail["students"][0]["on_bus"], false);
    assert_eq!(detail["students"][0]["contact_info"], "0412555010");
    assert_eq!(
        detail["drivers"][driver_id.to_string()]["first_name"],
        "Amy"
    );
}

#[tokio::test]
async fn empty_database_lists_are_empty() {
    let t = spawn_app("empty").await;

    let routes = json_body(get(&t.app, "/routes").await).await;
    assert_eq!(routes["routes"], Value::Array(vec![]));
    let drivers = json_body(get(&t.app, "/drivers").await).await;
    assert_eq!(drivers["drivers"], Value::Array(vec![]));
    let user = json_body(get(&t.app, "/user").await).await;
    assert_eq!(user, Value::Array(vec![]));
}

#[tokio::test]
async fn boarding_toggle_redirects_to_the_route_and_flips_twice() {
    let t = spawn_app("toggle").await;
    let (_, route_id, student_id) = seed(&t.app).await;

    let resp = get(&t.app, &format!("/routeboarding/{student_id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/route/{route_id}"));

    let roster = json_body(get(&t.app, &format!("/route/{route_id}")).await).await;
    assert_eq!(roster["students"][0]["on_bus"], true);
    assert_eq!(roster["representative"]["id"], student_id);

    get(&t.app, &format!("/routeboarding/{student_id}")).await;
    let roster = json_body(get(&t.app, &format!("/route/{route_id}")).await).await;
    assert_eq!(roster["students"][0]["on_bus"], false);
}

#[tokio::test]
async fn offload_and_edit_take_students_off_the_bus() {
    let t = spawn_app("offload").await;
    let (_, route_id, student_id) = seed(&t.app).await;

    get(&t.app, &format!("/routeboarding/{student_id}")).await;
    let resp = post_form(&t.app, &format!("/offloadstudents/{route_id}"), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/route/{route_id}"));
    let detail = json_body(get(&t.app, &format!("/studentexpanded/{student_id}")).await).await;
    assert_eq!(detail["student"]["on_bus"], false);

    get(&t.app, &format!("/routeboarding/{student_id}")).await;
    let resp = post_form(
        &t.app,
        &format!("/editstudent/{student_id}"),
        &format!(
            "first_name=Bo&last_name=Ng&dob=2012-05-01&conditions=peanuts\
             &contact_info=&route_id={route_id}"
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let detail = json_body(get(&t.app, &format!("/studentexpanded/{student_id}")).await).await;
    assert_eq!(detail["student"]["on_bus"], false);
    assert_eq!(detail["student"]["conditions"], "peanuts");
}

#[tokio::test]
async fn override_moves_student_to_the_path_route() {
    let t = spawn_app("override").await;
    let (_, _, student_id) = seed(&t.app).await;

    post_form(&t.app, "/addroute", "route=40&driver_id=").await;
    let routes = json_body(get(&t.app, "/routes").await).await;
    let route_40 = routes["routes"][1]["id"].as_i64().expect("route id");

    let resp = post_form(
        &t.app,
        &format!("/overridestudent/{route_40}"),
        &format!("student={student_id}"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/route/{route_40}"));

    let roster = json_body(get(&t.app, &format!("/route/{route_40}")).await).await;
    assert_eq!(roster["students"][0]["id"], student_id);
}

#[tokio::test]
async fn deleting_parents_with_children_is_a_conflict() {
    let t = spawn_app("conflict").await;
    let (driver_id, route_id, student_id) = seed(&t.app).await;

    let resp = get(&t.app, &format!("/removeroute/{route_id}")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "HAS_DEPENDENTS");

    let resp = get(&t.app, &format!("/removedriver/{driver_id}")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let detail = json_body(get(&t.app, &format!("/studentexpanded/{student_id}")).await).await;
    assert_eq!(detail["student"]["route_id"], route_id);

    let resp = get(&t.app, &format!("/removestudent/{student_id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = get(&t.app, &format!("/removeroute/{route_id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = get(&t.app, &format!("/removedriver/{driver_id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn errors_are_structured() {
    let t = spawn_app("errors").await;

    let resp = post_form(
        &t.app,
        "/addstudent",
        "first_name=Bo&last_name=Ng&dob=01-05-2012&route_id=",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let resp = post_form(
        &t.app,
        "/addstudent",
        "first_name=Bo&last_name=Ng&dob=2012-05-01&route_id=99",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = post_form(&t.app, "/addroute", "driver_id=").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = get(&t.app, "/editstudent/42").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = get(&t.app, "/removedriver/abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = get(&t.app, "/routesexpanded/42").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["state"], "empty");

    let students = json_body(get(&t.app, "/students").await).await;
    assert_eq!(students["students"], Value::Array(vec![]));
}
