use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::routing::post;
use axum::{http::StatusCode, Json, Router};
use serde_json::{json, Value};

use pathway_ai::advisory::client::{
    HttpRecommendationClient, RecommendationClient, TransportError,
};
use pathway_ai::advisory::ResultSet;
use pathway_ai::config::ServiceConfig;
use pathway_ai::session::{
    AdvisorSession, DegreeLevel, ExpansionPolicy, FundingSource, PriorityGoal, ProfileUpdate,
    SubmissionPhase,
};

/// Runs the stub recommendation service on its own single-threaded runtime
/// so the blocking client can be driven from the test thread.
fn spawn_service(app: Router) -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub listener");
            tx.send(listener.local_addr().expect("stub addr"))
                .expect("publish stub addr");
            axum::serve(listener, app).await.expect("serve stub");
        });
    });
    rx.recv().expect("stub service address")
}

fn service_config(addr: SocketAddr, timeout_secs: u64) -> ServiceConfig {
    ServiceConfig {
        base_url: format!("http://{addr}"),
        timeout_secs,
    }
}

fn option_json(country: &str, score: u8) -> Value {
    json!({
        "country": country,
        "flag": "🏳️",
        "tagline": format!("{country} pathway"),
        "match_score": score,
        "total_cost": 33.0,
        "financial_gap": 0,
        "pr_risk_color": "green",
        "timeline_steps": ["Masters (1y)", "Job Search (1y)", "PR"],
        "reasoning": ["Budget fits", "Skill shortage match"],
    })
}

fn ready_session() -> AdvisorSession {
    let mut session = AdvisorSession::new(ExpansionPolicy::Single);
    session.update_profile(ProfileUpdate::Degree(DegreeLevel::Bachelors));
    session.update_profile(ProfileUpdate::Gpa("8.5".to_string()));
    session.update_profile(ProfileUpdate::Major("Computer Science".to_string()));
    session.update_profile(ProfileUpdate::BudgetMax(2_500_000));
    session.update_profile(ProfileUpdate::Priority(PriorityGoal::HighRoi));
    session.update_profile(ProfileUpdate::Funding(FundingSource::SelfFunded));
    session
}

#[test]
fn bucketed_round_trip_preserves_empty_buckets() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured_in = captured.clone();
    let response = json!({
        "status": "success",
        "strategies": {
            "safe_bets": [option_json("Germany", 92), option_json("Australia", 74)],
            "fast_track": [],
            "moonshots": [option_json("USA", 61)],
        },
        "consultant_note": "Strong budget, check the visa risk first.",
        "meta": { "total_options": 3, "safe_count": 2, "fast_count": 0, "moonshot_count": 1 },
    });

    let app = Router::new().route(
        "/api/recommend",
        post(move |Json(body): Json<Value>| {
            let captured = captured_in.clone();
            let response = response.clone();
            async move {
                *captured.lock().expect("captured mutex") = Some(body);
                Json(response)
            }
        }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 5)).expect("client builds");
    let mut session = ready_session();
    session.submit(&client).expect("draft validates");

    let advisory = session.advisory().expect("advisory stored");
    assert_eq!(
        advisory.consultant_note,
        "Strong budget, check the visa risk first."
    );
    match &advisory.result {
        ResultSet::Buckets(buckets) => {
            assert_eq!(buckets.safe_bets.len(), 2);
            assert!(
                buckets.fast_track.is_empty(),
                "empty bucket must survive the round trip"
            );
            assert_eq!(buckets.moonshots.len(), 1);
        }
        other => panic!("expected buckets, got {other:?}"),
    }
    assert_eq!(advisory.meta.expect("meta carried").safe_count, 2);

    // The wire payload matches the documented normalization.
    let body = captured
        .lock()
        .expect("captured mutex")
        .clone()
        .expect("request captured");
    assert_eq!(body["degree"], json!("Bachelors"));
    assert_eq!(body["gpa"], json!(8.5));
    assert_eq!(body["major"], json!("Computer Science"));
    assert_eq!(body["budget"], json!(25.0));
    assert_eq!(body["priority"], json!("High ROI"));
    assert_eq!(body["funding_source"], json!("Self"));
    assert!(
        body.get("countries").is_none(),
        "empty country set must be omitted"
    );
}

#[test]
fn ranked_round_trip_supports_promote() {
    let response = json!({
        "status": "success",
        "recommendations": [
            option_json("Germany", 92),
            option_json("Ireland", 85),
            option_json("USA", 64),
        ],
        "consultant_note": "Germany leads on safety.",
    });
    let app = Router::new().route(
        "/api/recommend",
        post(move |Json(_body): Json<Value>| {
            let response = response.clone();
            async move { Json(response) }
        }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 5)).expect("client builds");
    let mut session = ready_session();
    session.submit(&client).expect("draft validates");
    assert!(session.show_result());

    session.promote("USA").expect("USA is present");
    let advisory = session.advisory().expect("advisory stored");
    match &advisory.result {
        ResultSet::Ranked(options) => {
            let keys: Vec<&str> = options.iter().map(|option| option.key()).collect();
            assert_eq!(keys, vec!["USA", "Germany", "Ireland"]);
        }
        other => panic!("expected ranked results, got {other:?}"),
    }
    assert!(session.annotation().is_some());
}

#[test]
fn non_success_status_terminates_in_failed() {
    let app = Router::new().route(
        "/api/recommend",
        post(|Json(_body): Json<Value>| async move {
            Json(json!({ "status": "error", "detail": "engine offline" }))
        }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 5)).expect("client builds");
    let mut session = ready_session();
    session.submit(&client).expect("draft validates");

    match session.phase() {
        SubmissionPhase::Failed { error, .. } => {
            assert_eq!(*error, TransportError::ServiceStatus("error".to_string()));
        }
        other => panic!("expected failed phase, got {other:?}"),
    }
    assert!(session.advisory().is_none());
    assert!(!session.show_result());
}

#[test]
fn http_error_maps_to_transport_failure() {
    let app = Router::new().route(
        "/api/recommend",
        post(|Json(_body): Json<Value>| async move {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "boom" })),
            )
        }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 5)).expect("client builds");
    let request = ready_session().validate_for_submit().expect("valid draft");
    assert_eq!(client.recommend(&request), Err(TransportError::Http(500)));
}

#[test]
fn undecodable_body_is_malformed() {
    let app = Router::new().route(
        "/api/recommend",
        post(|Json(_body): Json<Value>| async move { "not json" }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 5)).expect("client builds");
    let request = ready_session().validate_for_submit().expect("valid draft");
    assert!(matches!(
        client.recommend(&request),
        Err(TransportError::Malformed(_))
    ));
}

#[test]
fn unreachable_service_is_reported_not_fatal() {
    // Grab a free port and release it so nothing is listening there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        listener.local_addr().expect("probe addr")
    };

    let client = HttpRecommendationClient::new(&service_config(addr, 2)).expect("client builds");
    let mut session = ready_session();
    session.submit(&client).expect("draft validates");

    assert!(matches!(
        session.last_error(),
        Some(TransportError::Unreachable(_))
    ));
}

#[test]
fn slow_service_times_out() {
    let app = Router::new().route(
        "/api/recommend",
        post(|Json(_body): Json<Value>| async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "status": "success", "recommendations": [] }))
        }),
    );
    let addr = spawn_service(app);

    let client = HttpRecommendationClient::new(&service_config(addr, 1)).expect("client builds");
    let request = ready_session().validate_for_submit().expect("valid draft");
    assert_eq!(client.recommend(&request), Err(TransportError::Timeout));
}
