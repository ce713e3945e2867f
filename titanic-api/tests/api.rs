//! Integration tests for titanic-api.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use titanic_api::{build_router, AppState, Dataset};
use tower::ServiceExt;

const SAMPLE_CSV: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,STON/O2. 3101282,7.925,,S
4,1,1,\"Futrelle, Mrs. Jacques Heath\",female,35,1,0,113803,53.1,C123,S
5,0,3,\"Allen, Mr. William Henry\",male,35,0,0,373450,8.05,,S
6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q
7,0,1,\"McCarthy, Mr. Timothy J\",male,54,0,0,17463,51.8625,E46,S
8,0,3,\"Palsson, Master. Gosta Leonard\",male,2,3,1,349909,21.075,,S
9,1,3,\"Johnson, Mrs. Oscar W\",female,27,0,2,347742,11.1333,,S
10,0,2,\"Somerton, Mr. Example\",male,,0,0,237736,13.0,,
";

fn test_app() -> axum::Router {
    let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
    build_router(AppState::new(Arc::new(dataset)))
}

async fn post_ask(app: axum::Router, query: &str) -> serde_json::Value {
    let body = serde_json::json!({ "query": query }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ask_percentage() {
    let json = post_ask(test_app(), "What percentage of passengers were male?").await;

    assert_eq!(json["query"], "What percentage of passengers were male?");
    assert_eq!(
        json["text_response"],
        "The percentage of male passengers was 60.00%"
    );
    assert_eq!(json["visualization"], serde_json::Value::Null);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_ask_histogram_returns_chart() {
    let json = post_ask(test_app(), "Show me a histogram of passenger ages").await;

    assert_eq!(
        json["text_response"],
        "I've created a histogram showing the distribution of passenger ages."
    );
    let svg = json["visualization"].as_str().unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_ask_unparseable_is_still_success() {
    let json = post_ask(test_app(), "Tell me a joke").await;

    // Apologetic answers are successful responses; only service failures
    // flip the flag.
    assert_eq!(json["success"], true);
    assert!(json["text_response"]
        .as_str()
        .unwrap()
        .starts_with("I couldn't identify"));
}

#[tokio::test]
async fn test_ask_is_idempotent() {
    let app = test_app();
    let first = post_ask(app.clone(), "How many passengers embarked from each port?").await;
    let second = post_ask(app, "How many passengers embarked from each port?").await;
    assert_eq!(first, second);
    assert_eq!(
        first["text_response"],
        "Passengers embarked from: Southampton: 7, Cherbourg: 1, Queenstown: 1"
    );
}

#[tokio::test]
async fn test_health_check() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "titanic-api");
}

#[tokio::test]
async fn test_dataset_info() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/info")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["total_passengers"], 10);
    assert!(json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "Sex"));
    assert!(json["numeric_columns"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "Age"));
    assert!(json["categorical_columns"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "Embarked"));
    assert_eq!(json["sample_questions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_root_welcome() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "Welcome to the Titanic Dataset Chatbot API!");
    assert_eq!(json["endpoints"]["ask"], "/api/v1/ask (POST)");
}
