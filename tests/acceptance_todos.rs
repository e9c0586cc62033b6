use todo_api::{http::routing, http::routes::todos, infrastructure::{seed, sqlite_repo::SqliteTodoRepository}};
use todo_api::domain::{repository::TodoRepository, todo::TodoTitle};
use axum::body::{to_bytes, Body};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};

async fn app() -> (Router, SqliteTodoRepository) {
    // use in-memory sqlite for tests
    let repo = SqliteTodoRepository::connect("sqlite::memory:", 5).await.unwrap();
    repo.init().await.unwrap();
    let app = routing::app(todos::router(todos::AppState { repo: repo.clone() }));
    (app, repo)
}

#[tokio::test]
async fn acceptance_create_get_update_delete() {
    let (app, _) = app().await;

    // create
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Buy milk" }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(res.headers()["location"], "/api/todos/1");
    assert_eq!(body(res).await, json!({ "id": 1, "title": "Buy milk", "isCompleted": false }));

    // get
    let res = request(&app, "GET", "/api/todos/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await, json!({ "id": 1, "title": "Buy milk", "isCompleted": false }));

    // update
    let res = request(&app, "PUT", "/api/todos/1", Some(json!({ "title": "Buy oat milk", "isCompleted": true }))).await;
    assert_eq!(res.status(), 204);
    assert!(raw_body(res).await.is_empty());
    let res = request(&app, "GET", "/api/todos/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await, json!({ "id": 1, "title": "Buy oat milk", "isCompleted": true }));

    // delete twice
    let res = request(&app, "DELETE", "/api/todos/1", None).await;
    assert_eq!(res.status(), 204);
    assert!(raw_body(res).await.is_empty());
    let res = request(&app, "DELETE", "/api/todos/1", None).await;
    assert_eq!(res.status(), 404);

    // get 404
    let res = request(&app, "GET", "/api/todos/1", None).await;
    assert_eq!(res.status(), 404);
    assert!(raw_body(res).await.is_empty());
}

#[tokio::test]
async fn acceptance_get_unknown_id_is_empty_404() {
    let (app, _) = app().await;
    let res = request(&app, "GET", "/api/todos/999", None).await;
    assert_eq!(res.status(), 404);
    assert!(raw_body(res).await.is_empty());
}

#[tokio::test]
async fn acceptance_created_ids_are_fresh_and_round_trip() {
    let (app, _) = app().await;
    let mut seen = Vec::new();
    for title in ["one", "two", "three"] {
        let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
        let location = res.headers()["location"].to_str().unwrap().to_string();
        let created = body(res).await;
        assert_eq!(created["title"], title);
        assert_eq!(created["isCompleted"], false);
        let id = created["id"].as_i64().unwrap();
        assert!(!seen.contains(&id));
        seen.push(id);

        let fetched = body(request(&app, "GET", &location, None).await).await;
        assert_eq!(fetched, created);
    }

    // deleted ids are not handed out again
    let res = request(&app, "DELETE", &format!("/api/todos/{}", seen[2]), None).await;
    assert_eq!(res.status(), 204);
    let created = body(request(&app, "POST", "/api/todos", Some(json!({ "title": "four" }))).await).await;
    assert!(!seen.contains(&created["id"].as_i64().unwrap()));
}

#[tokio::test]
async fn acceptance_list_counts_creates_minus_deletes() {
    let (app, _) = app().await;
    let mut ids = Vec::new();
    for n in 0..5 {
        let created = body(request(&app, "POST", "/api/todos", Some(json!({ "title": format!("todo {n}") }))).await).await;
        ids.push(created["id"].as_i64().unwrap());
    }
    for id in &ids[..2] {
        let res = request(&app, "DELETE", &format!("/api/todos/{id}"), None).await;
        assert_eq!(res.status(), 204);
    }
    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(res.status(), 200);
    let list = body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn acceptance_update_unknown_id_creates_nothing() {
    let (app, _) = app().await;
    request(&app, "POST", "/api/todos", Some(json!({ "title": "only" }))).await;
    let res = request(&app, "PUT", "/api/todos/77", Some(json!({ "title": "ghost", "isCompleted": true }))).await;
    assert_eq!(res.status(), 404);
    let list = body(request(&app, "GET", "/api/todos", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let res = request(&app, "GET", "/api/todos/77", None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn acceptance_invalid_titles_leave_rows_untouched() {
    let (app, _) = app().await;
    request(&app, "POST", "/api/todos", Some(json!({ "title": "original" }))).await;
    let too_long = "x".repeat(101);

    for payload in [json!({}), json!({ "title": "" }), json!({ "title": too_long })] {
        let res = request(&app, "POST", "/api/todos", Some(payload.clone())).await;
        assert_eq!(res.status(), 400, "create {payload}");
        assert!(body(res).await["errors"]["title"].is_array());

        let mut update = payload.clone();
        update["isCompleted"] = json!(true);
        let res = request(&app, "PUT", "/api/todos/1", Some(update)).await;
        assert_eq!(res.status(), 400, "update {payload}");
    }

    let list = body(request(&app, "GET", "/api/todos", None).await).await;
    assert_eq!(list, json!([{ "id": 1, "title": "original", "isCompleted": false }]));
}

#[tokio::test]
async fn acceptance_title_of_exactly_100_characters_is_accepted() {
    let (app, _) = app().await;
    let title = "é".repeat(100);
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(body(res).await["title"], title);
}

#[tokio::test]
async fn acceptance_every_accepted_title_is_stored() {
    let (app, _) = app().await;
    let titles = [
        "a".repeat(100),
        "é".repeat(100),
        "😀".repeat(100),
        format!("{}{}", "😀".repeat(50), "a".repeat(50)),
        " padded ".to_string(),
        "x".to_string(),
    ];
    for title in titles {
        assert!(TodoTitle::parse(title.clone()).is_ok(), "{title:?}");
        let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201, "create {title:?}");
        let location = res.headers()["location"].to_str().unwrap().to_string();

        let res = request(&app, "PUT", &location, Some(json!({ "title": title, "isCompleted": true }))).await;
        assert_eq!(res.status(), 204, "update {title:?}");
        let fetched = body(request(&app, "GET", &location, None).await).await;
        assert_eq!(fetched["title"], title.as_str());
    }
}

#[tokio::test]
async fn acceptance_control_characters_in_title_are_400() {
    let (app, _) = app().await;
    request(&app, "POST", "/api/todos", Some(json!({ "title": "kept" }))).await;
    for title in ["\u{0}abc", "ab\u{0}c", "tab\there"] {
        assert!(TodoTitle::parse(title).is_err());
        let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 400, "create {title:?}");
        assert_eq!(body(res).await["errors"]["title"], json!(["title must not contain control characters"]));

        let res = request(&app, "PUT", "/api/todos/1", Some(json!({ "title": title, "isCompleted": true }))).await;
        assert_eq!(res.status(), 400, "update {title:?}");
    }
    let list = body(request(&app, "GET", "/api/todos", None).await).await;
    assert_eq!(list, json!([{ "id": 1, "title": "kept", "isCompleted": false }]));
}

#[tokio::test]
async fn acceptance_non_integer_id_is_404() {
    let (app, _) = app().await;
    let res = request(&app, "GET", "/api/todos/abc", None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn acceptance_seed_populates_empty_table_once() {
    let (app, repo) = app().await;
    assert_eq!(seed::seed(&repo).await.unwrap(), 3);
    assert_eq!(seed::seed(&repo).await.unwrap(), 0);
    let list = body(request(&app, "GET", "/api/todos", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> Response {
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn raw_body(res: Response) -> Vec<u8> {
    to_bytes(res.into_body(), 1024 * 1024).await.unwrap().to_vec()
}

async fn body(res: Response) -> Value {
    serde_json::from_slice(&raw_body(res).await).unwrap()
}
