//! グループ社員 API のシナリオテスト
//!
//! インメモリのモックストアでルーターを組み立て、作成から一覧・リンク・削除までを
//! 一連の HTTP リクエストとして検証する。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use grouplink_employee_service::{
    app_builder::employee_routes,
    handler::EmployeeState,
    usecase::EmployeeUseCaseImpl,
};
use grouplink_infra::mock::{MockEmployeeRepository, MockLinkRepository, MockUserProfileRepository};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

struct Stores {
    employees: MockEmployeeRepository,
    profiles:  MockUserProfileRepository,
    links:     MockLinkRepository,
}

fn setup() -> (Router, Stores) {
    let stores = Stores {
        employees: MockEmployeeRepository::new(),
        profiles:  MockUserProfileRepository::new(),
        links:     MockLinkRepository::new(),
    };
    let state = Arc::new(EmployeeState {
        usecase: EmployeeUseCaseImpl::new(
            Arc::new(stores.employees.clone()),
            Arc::new(stores.profiles.clone()),
            Arc::new(stores.links.clone()),
        ),
    });
    (employee_routes(state), stores)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let body = body.map_or_else(Body::empty, |json| Body::from(json.to_string()));
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn ids_of(body: &[u8]) -> Vec<String> {
    let json: Value = serde_json::from_slice(body).unwrap();
    json.as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_作成からリンク_削除までの一連の操作() {
    let (app, stores) = setup();
    stores.profiles.add_email("usr_1", "alice@x.com");
    stores.profiles.add_email("usr_2", "bob@x.com");

    // グループ grp_01 に 2 人作成する
    let (status, body) = send(
        &app,
        Method::POST,
        "/employee",
        Some(json!({ "id": "grp_01", "email": "alice@x.com", "title": "CTO" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let alice: Value = serde_json::from_slice(&body).unwrap();
    let alice_id = alice["id"].as_str().unwrap().to_string();
    assert!(alice_id.starts_with("emp_"));
    assert_eq!(alice["title"], "CTO");

    let (status, body) = send(
        &app,
        Method::POST,
        "/employee",
        Some(json!({ "id": "grp_01", "email": "bob@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bob_id = serde_json::from_slice::<Value>(&body).unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // 同じグループへの再作成は 409
    let (status, _) = send(
        &app,
        Method::POST,
        "/employee",
        Some(json!({ "id": "grp_01", "email": "alice@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // グループの一覧には作成した 2 人だけが含まれる
    let (status, body) = send(&app, Method::GET, "/employee/grp_01", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut listed = ids_of(&body);
    listed.sort();
    let mut expected = vec![alice_id.clone(), bob_id.clone()];
    expected.sort();
    assert_eq!(listed, expected);

    // alice を会社にリンクし、会社 ID で一覧する
    let (status, _) = send(
        &app,
        Method::POST,
        "/employee/company",
        Some(json!({ "employee_id": alice_id, "company_id": "acme corp" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let encoded = STANDARD.encode("acme+corp");
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/employee/company/{encoded}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![alice_id.clone()]);

    // alice を削除すると、グループ一覧にも会社一覧にも現れない
    let (status, body) = send(&app, Method::DELETE, &format!("/employee/{alice_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (_, body) = send(&app, Method::GET, "/employee/grp_01", None).await;
    assert_eq!(ids_of(&body), vec![bob_id]);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/employee/company/{encoded}"),
        None,
    )
    .await;
    assert!(ids_of(&body).is_empty());

    // リンクはそのまま残る
    assert_eq!(stores.links.links().len(), 1);
}

#[tokio::test]
async fn test_不正な会社idはストアに触れずに400() {
    let (app, stores) = setup();

    let (status, body) = send(&app, Method::GET, "/employee/company/!!invalid!!", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"error in decoding company id");
    assert!(stores.links.calls().is_empty());
    assert!(stores.employees.calls().is_empty());
}

#[tokio::test]
async fn test_会社リンクのパスでもgetはグループcompanyの一覧になる() {
    let (app, stores) = setup();
    stores.profiles.add_email("usr_1", "alice@x.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/employee",
        Some(json!({ "id": "company", "email": "alice@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        Method::POST,
        "/employee/company",
        Some(json!({ "employee_id": "emp_1", "company_id": "cmp_1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/employee/company", None).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["parent"], "company");
    assert_eq!(json[0]["email"], "alice@x.com");
    assert_eq!(stores.links.links().len(), 1);
}
