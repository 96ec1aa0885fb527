use mockito::Matcher;
use serde_json::json;
use trip_viewer::{
    PlaceDetailRequest, PlannerApi, PlannerClient, PlannerRequest, TimelineEntry, TravelError,
};

fn sample_request() -> PlannerRequest {
    PlannerRequest::new("Delhi", "Jaipur", 2, 20000.0).with_interests(["history", "food"])
}

fn sample_detail_request() -> PlaceDetailRequest {
    PlaceDetailRequest {
        time: "09:00-10:00".to_string(),
        place: "Amber Fort".to_string(),
        reason_for_time_choice: "Cooler mornings".to_string(),
        image_url: String::new(),
        destination_city: "Jaipur".to_string(),
    }
}

#[tokio::test]
async fn test_full_itinerary_is_posted_and_normalized() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/planner/full-itinerary")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "home_city": "Delhi",
            "destination_city": "Jaipur",
            "num_days": 2,
            "interests": ["history", "food"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "itinerary": {
                    "title": "Pink City",
                    "days": [{
                        "schedule_blocks": [{"time": "11:00-12:00", "place_name": "City Palace"}],
                        "food_halts": [{"time": "08:00-09:00", "meal_type": "Breakfast"}],
                        "total_walking_km_estimate": 4.26
                    }],
                    "within_budget": true
                },
                "metadata": {"num_clusters": 3, "total_latency_ms": 8123.4}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = PlannerClient::new(server.url()).unwrap();
    let data = client.fetch_full_itinerary(&sample_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(data.itinerary.title, "Pink City");
    assert!(data.itinerary.within_budget);
    assert_eq!(data.metadata.num_clusters, Some(3));

    let day = &data.itinerary.days[0];
    assert_eq!(day.walking_distance, "4.3 km");
    assert!(matches!(day.timeline[0], TimelineEntry::Meal(_)));
    assert!(matches!(day.timeline[1], TimelineEntry::Place(_)));
}

#[tokio::test]
async fn test_non_success_status_surfaces_body_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/planner/full-itinerary")
        .with_status(500)
        .with_body("No places discovered for Atlantis")
        .create_async()
        .await;

    let client = PlannerClient::new(server.url()).unwrap();
    let err = client
        .fetch_full_itinerary(&sample_request())
        .await
        .unwrap_err();

    match &err {
        TravelError::Api { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "No places discovered for Atlantis");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "No places discovered for Atlantis");
}

#[tokio::test]
async fn test_empty_error_body_uses_fallback_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/planner/place-detail-tts")
        .with_status(503)
        .create_async()
        .await;

    let client = PlannerClient::new(server.url()).unwrap();
    let err = client
        .fetch_place_detail(&sample_detail_request())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch place details.");
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_place_detail_audio_is_resolved_against_base() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/planner/place-detail-tts")
        .match_body(Matcher::PartialJson(json!({
            "place": "Amber Fort",
            "destination_city": "Jaipur",
            "image_url": ""
        })))
        .with_status(200)
        .with_body(
            json!({
                "place": "Amber Fort",
                "outputs": {
                    "english": {"text": "A hilltop fort.", "audio_file": "en.mp3", "audio_url": "/audio/en.mp3"},
                    "hindi": {"text": "पहाड़ी किला", "audio_url": "https://cdn.example.com/hi.mp3"}
                },
                "cached": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    // Trailing slash on the configured base must not double up.
    let client = PlannerClient::new(format!("{}/", server.url())).unwrap();
    let result = client
        .fetch_place_detail(&sample_detail_request())
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(result.cached);
    assert_eq!(
        result.outputs.english.as_ref().unwrap().audio_url,
        format!("{}/audio/en.mp3", server.url())
    );
    assert_eq!(
        result.outputs.hindi.as_ref().unwrap().audio_url,
        "https://cdn.example.com/hi.mp3"
    );
    assert!(result.outputs.local.is_none());
}

#[tokio::test]
async fn test_invalid_json_body_is_a_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/planner/full-itinerary")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = PlannerClient::new(server.url()).unwrap();
    let err = client
        .fetch_full_itinerary(&sample_request())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
}

#[test]
fn test_empty_base_url_is_rejected() {
    let err = PlannerClient::new("").unwrap_err();
    assert!(matches!(err, TravelError::Config(_)));
}
