mod common;

use std::sync::Arc;

use actix_web::{test, web, App};
use common::{test_state, trip_json, FixedInference, MockIdentityProvider, UnreachableInference};
use serde_json::json;
use triplab::routes;

async fn signed_in_session<S>(app: &S) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::post().uri("/api/session").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    let sid = body["session_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/session/signin")
        .insert_header(("x-session-id", sid.clone()))
        .set_json(json!({"email": "a@x.com", "password": "abcdef"}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    assert_eq!(body["screen"], "planner");

    sid
}

#[actix_web::test]
async fn generated_itinerary_is_returned_and_archived() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state(
        Arc::new(MockIdentityProvider::with_account("a@x.com", "abcdef")),
        Arc::new(FixedInference("Day 1: arrive in Tokyo.")),
    )
    .await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    let sid = signed_in_session(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid.clone()))
        .set_json(trip_json())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["itinerary"], "Day 1: arrive in Tokyo.");

    let req = test::TestRequest::get()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid.clone()))
        .to_request();
    let history: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["itinerary"], "Day 1: arrive in Tokyo.");
    assert!(entries[0]["created_at"].as_str().is_some());
    Ok(())
}

#[actix_web::test]
async fn unreachable_inference_archives_error_text() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state(
        Arc::new(MockIdentityProvider::with_account("a@x.com", "abcdef")),
        Arc::new(UnreachableInference),
    )
    .await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    let sid = signed_in_session(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid.clone()))
        .set_json(trip_json())
        .to_request();
    let resp = test::call_service(&app, req).await;
    // Generation failure is content, not an error
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let text = body["itinerary"].as_str().unwrap().to_string();
    assert!(text.contains("connection refused"));

    // The archive entry holds the same error text
    let req = test::TestRequest::get()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid.clone()))
        .to_request();
    let history: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["itinerary"].as_str().unwrap(), text);
    Ok(())
}

#[actix_web::test]
async fn resubmitting_the_form_archives_again() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state(
        Arc::new(MockIdentityProvider::with_account("a@x.com", "abcdef")),
        Arc::new(FixedInference("Same plan.")),
    )
    .await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    let sid = signed_in_session(&app).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/itineraries")
            .insert_header(("x-session-id", sid.clone()))
            .set_json(trip_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    let req = test::TestRequest::get()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid.clone()))
        .to_request();
    let history: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    Ok(())
}

#[actix_web::test]
async fn trip_submission_requires_authentication() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state(
        Arc::new(MockIdentityProvider::new()),
        Arc::new(FixedInference("Day 1.")),
    )
    .await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    // Session exists but never signed in
    let req = test::TestRequest::post().uri("/api/session").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let sid = body["session_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(("x-session-id", sid))
        .set_json(trip_json())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
    Ok(())
}
