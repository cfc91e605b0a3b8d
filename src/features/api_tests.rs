//! Router-level tests over the in-memory service graph.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};

use crate::features::resources::models::ResourceStatus;
use crate::features::resources::stores::ResourceStore;
use crate::features::users::models::UserRole;
use crate::shared::test_helpers::{next_event, TestGraph};

fn server(graph: &TestGraph, sub: Option<&str>) -> TestServer {
    TestServer::new(graph.router(sub)).unwrap()
}

fn upload_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("description", "Worked examples for every chapter")
        .add_text("university", "City College")
        .add_text("department", "Computer Science")
        .add_text("semester", "3rd")
        .add_text("subject", "Algorithms")
        .add_text("file_type", "Past Paper")
        .add_part(
            "file",
            Part::bytes(b"Question 1: prove the master theorem.".to_vec())
                .file_name("paper.txt")
                .mime_type("text/plain"),
        )
}

async fn upload(server: &TestServer, title: &str) -> Value {
    let response = server.post("/api/resources").multipart(upload_form(title)).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

#[tokio::test]
async fn test_upload_review_and_browse() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));
    let anonymous = server(&graph, None);

    let created = upload(&student, "Algorithms Final 2023").await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["fileType"], "Past Paper");
    assert_eq!(created["tags"], json!(["algorithms", "final", "2023"]));
    let id = created["id"].as_str().unwrap().to_string();

    let public: Value = anonymous.get("/api/resources").await.json();
    assert_eq!(public["meta"]["total"], 0);

    let mine: Value = student.get("/api/resources/mine").await.json();
    assert_eq!(mine["meta"]["total"], 1);

    let mut events = graph.enrichment.subscribe();
    let reviewed = admin
        .patch(&format!("/api/admin/resources/{}/status", id))
        .json(&json!({ "status": "approved" }))
        .await;
    reviewed.assert_status_ok();
    assert_eq!(reviewed.json::<Value>()["data"]["status"], "approved");
    next_event(&mut events).await;

    let public: Value = anonymous.get("/api/resources").await.json();
    assert_eq!(public["meta"]["total"], 1);
    assert_eq!(public["data"][0]["summary"], "A summary.");
}

#[tokio::test]
async fn test_upload_validation_errors() {
    let graph = TestGraph::new();
    let student = server(&graph, Some("student-1"));

    let short_title = student
        .post("/api/resources")
        .multipart(upload_form("Alg"))
        .await;
    short_title.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(short_title.json::<Value>()["success"], false);

    let no_file = student
        .post("/api/resources")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Missing the file")
                .add_text("description", "There is no file part here")
                .add_text("university", "City College")
                .add_text("department", "Computer Science")
                .add_text("semester", "1st")
                .add_text("subject", "Algorithms"),
        )
        .await;
    no_file.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(graph.resources.len(), 0);
}

#[tokio::test]
async fn test_whitespace_only_upload_fields_rejected() {
    let graph = TestGraph::new();
    let student = server(&graph, Some("student-1"));

    let blank = student
        .post("/api/resources")
        .multipart(
            MultipartForm::new()
                .add_text("title", "       ")
                .add_text("description", "Worked examples for every chapter")
                .add_text("university", "   ")
                .add_text("department", "Computer Science")
                .add_text("semester", "2nd")
                .add_text("subject", "Algorithms")
                .add_part(
                    "file",
                    Part::bytes(b"Question 1".to_vec())
                        .file_name("paper.txt")
                        .mime_type("text/plain"),
                ),
        )
        .await;

    blank.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(graph.resources.len(), 0);
    assert_eq!(graph.blobs.object_count(), 0);
}

#[tokio::test]
async fn test_protected_routes_need_identity() {
    let graph = TestGraph::new();
    let anonymous = server(&graph, None);

    anonymous
        .get("/api/resources/mine")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    anonymous
        .get("/api/users/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_students_cannot_use_admin_routes() {
    let graph = TestGraph::new();
    let student = server(&graph, Some("student-1"));

    student
        .get("/api/admin/resources")
        .await
        .assert_status(StatusCode::FORBIDDEN);
    student
        .post("/api/admin/catalogs/universities")
        .json(&json!({ "name": "Shadow University" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reversed_decision_is_conflict() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    let id = upload(&student, "Rejected Paper Scan").await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/admin/resources/{}/status", id);

    admin
        .patch(&path)
        .json(&json!({ "status": "rejected" }))
        .await
        .assert_status_ok();
    admin
        .patch(&path)
        .json(&json!({ "status": "rejected" }))
        .await
        .assert_status_ok();
    admin
        .patch(&path)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_list_is_pending_first() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    let first = upload(&student, "First Upload Here").await;
    upload(&student, "Second Upload Here").await;

    let id = first["id"].as_str().unwrap();
    admin
        .patch(&format!("/api/admin/resources/{}/status", id))
        .json(&json!({ "status": "rejected" }))
        .await
        .assert_status_ok();

    let listed: Value = admin.get("/api/admin/resources").await.json();
    assert_eq!(listed["data"][0]["title"], "Second Upload Here");
    assert_eq!(listed["data"][1]["title"], "First Upload Here");
    assert_eq!(listed["data"][1]["reviewedBy"], "admin-1");
}

#[tokio::test]
async fn test_browse_is_role_aware() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    upload(&student, "Pending Lab Manual").await;

    let as_student: Value = student.get("/api/resources/browse").await.json();
    assert_eq!(as_student["meta"]["total"], 0);

    let as_admin: Value = admin
        .get("/api/resources/browse")
        .add_query_param("fileType", "Past Paper")
        .await
        .json();
    assert_eq!(as_admin["meta"]["total"], 1);

    let filtered: Value = admin
        .get("/api/resources/browse")
        .add_query_param("semester", "8th")
        .await
        .json();
    assert_eq!(filtered["meta"]["total"], 0);
}

#[tokio::test]
async fn test_detail_hidden_from_other_students() {
    let graph = TestGraph::new();
    let owner = server(&graph, Some("student-1"));
    let other = server(&graph, Some("student-2"));

    let id = upload(&owner, "Private Until Reviewed").await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/resources/{}", id);

    owner.get(&path).await.assert_status_ok();
    other.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ask_about_approved_resource() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    let id = upload(&student, "Master Theorem Proofs").await["id"]
        .as_str()
        .unwrap()
        .to_string();
    admin
        .patch(&format!("/api/admin/resources/{}/status", id))
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_ok();

    let answered = student
        .post(&format!("/api/resources/{}/ask", id))
        .json(&json!({ "question": "What is question 1?" }))
        .await;
    answered.assert_status_ok();
    assert_eq!(answered.json::<Value>()["data"]["answer"], "An answer.");

    let calls = graph.assistant.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Question 1: prove the master theorem.");
}

#[tokio::test]
async fn test_profile_and_role_management() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    let me: Value = student.get("/api/users/me").await.json();
    assert_eq!(me["data"]["role"], "Student");
    assert_eq!(me["data"]["name"], "student-1");

    let updated = student
        .patch("/api/users/me")
        .json(&json!({ "university": "Riverside University", "department": "Physics" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["data"]["university"], "Riverside University");

    let catalogs: Value = student.get("/api/catalogs").await.json();
    let universities = catalogs["data"]["universities"].as_array().unwrap();
    assert!(universities.contains(&json!("Riverside University")));

    admin
        .patch("/api/admin/users/student-1/role")
        .json(&json!({ "role": "Admin" }))
        .await
        .assert_status_ok();

    student
        .get("/api/admin/resources")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_admin_catalog_additions() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let admin = server(&graph, Some("admin-1"));

    admin
        .post("/api/admin/catalogs/subjects")
        .json(&json!({ "department": "Physics", "subject": "Quantum Mechanics" }))
        .await
        .assert_status(StatusCode::CREATED);

    let again = admin
        .post("/api/admin/catalogs/subjects")
        .json(&json!({ "department": "Physics", "subject": "Quantum Mechanics" }))
        .await;
    again.assert_status_ok();
    assert_eq!(again.json::<Value>()["data"]["added"], false);

    admin
        .post("/api/admin/catalogs/departments")
        .json(&json!({ "name": "<script>" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let catalogs: Value = admin.get("/api/catalogs").await.json();
    assert_eq!(
        catalogs["data"]["subjects"]["Physics"],
        json!(["Quantum Mechanics"])
    );
}

#[tokio::test]
async fn test_retry_enrichment_route() {
    let graph = TestGraph::new();
    graph.register("admin-1", UserRole::Admin).await;
    let student = server(&graph, Some("student-1"));
    let admin = server(&graph, Some("admin-1"));

    let id = upload(&student, "Retry Through Api").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    admin
        .post(&format!("/api/admin/resources/{}/enrichment", id))
        .await
        .assert_status(StatusCode::CONFLICT);

    let mut events = graph.enrichment.subscribe();
    admin
        .patch(&format!("/api/admin/resources/{}/status", id))
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_ok();
    next_event(&mut events).await;

    let retried = admin
        .post(&format!("/api/admin/resources/{}/enrichment", id))
        .await;
    retried.assert_status(StatusCode::ACCEPTED);
    assert_eq!(retried.json::<Value>()["data"]["enrichmentAttempt"], 2);
    next_event(&mut events).await;

    let stored = graph
        .resources
        .get(id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ResourceStatus::Approved);
    assert_eq!(stored.enrichment_attempt, 2);
}
