mod common;

use common::{MockTransport, admin_backend, harness, rejecting_backend, status};
use evac_portal::backend::api::ApiResponse;
use evac_portal::backend::api::models::Coordinates;
use evac_portal::backend::session::{Session, SessionStore, Tenant};
use evac_portal::utils::Error;
use reqwest::Method;
use serde_json::json;

#[tokio::test]
async fn login_then_list_sends_the_stored_bearer_token() {
    let mut h = harness(admin_backend(), rejecting_backend());

    let location = h.portal.login_admin("admin@example.org", "secret").await.unwrap();
    assert_eq!(location.path, "/dashboard");
    assert_eq!(h.store.get("token").as_deref(), Some("abc123"));

    let areas = h.portal.admin().evacuation_areas.get_all().await.unwrap();
    assert_eq!(areas, json!([{"id": 1, "name": "Area A"}]));

    let request = h.admin.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, "http://127.0.0.1:8000/api/evacuation-areas");
    assert_eq!(request.authorization(), Some("Bearer abc123"));
    assert_eq!(request.headers.get_all("authorization").iter().count(), 1);
}

#[tokio::test]
async fn resident_401_clears_session_and_forces_login() {
    let mut h = harness(admin_backend(), rejecting_backend());
    h.store.set("resident_token", "expired").unwrap();
    h.store.set("resident_user", r#"{"name":"Ana"}"#).unwrap();

    let err = h
        .portal
        .resident()
        .notifications
        .get_notifications()
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert!(matches!(err, Error::Unauthorized { tenant: Tenant::Resident, .. }));
    assert_eq!(h.store.get("resident_token"), None);
    assert_eq!(h.store.get("resident_user"), None);

    let location = h.portal.follow_forced().unwrap().unwrap();
    assert_eq!(location.path, "/resident/login");
}

#[tokio::test]
async fn admin_401_tears_down_only_the_admin_session() {
    let mut h = harness(rejecting_backend(), rejecting_backend());
    h.store.set("token", "stale").unwrap();
    h.store.set("resident_token", "fresh").unwrap();

    let err = h.portal.admin().families.get_all().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(h.store.get("token"), None);
    assert_eq!(h.store.get("resident_token").as_deref(), Some("fresh"));
    assert_eq!(h.portal.navigator().history(), ["/login"]);
    assert_eq!(h.portal.follow_forced().unwrap().unwrap().path, "/login");
}

#[tokio::test]
async fn other_failures_pass_through_untouched() {
    let backend = MockTransport::new(|_| Ok(status(422, json!({"errors": {"name": ["required"]}}))));
    let h = harness(backend, rejecting_backend());
    h.store.set("token", "abc123").unwrap();

    let err = h
        .portal
        .admin()
        .evacuation_areas
        .create(&json!({}))
        .await
        .unwrap_err();
    match err {
        Error::Status { status, body, .. } => {
            assert_eq!(status, 422);
            assert_eq!(body["errors"]["name"][0], "required");
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(h.store.get("token").as_deref(), Some("abc123"));
    assert!(h.portal.navigator().history().is_empty());
}

#[tokio::test]
async fn clearing_the_token_drops_the_header() {
    let h = harness(admin_backend(), rejecting_backend());
    let session = Session::new(h.store.clone(), Tenant::Admin);

    h.portal.admin().auth.set_token(Some("abc123")).unwrap();
    assert_eq!(session.token().as_deref(), Some("abc123"));
    h.portal.admin().auth.set_token(None).unwrap();
    assert_eq!(session.token(), None);

    h.portal.admin().evacuation_areas.get_all().await.unwrap();
    assert_eq!(h.admin.last().authorization(), None);
}

#[tokio::test]
async fn coordinate_queries_are_passed_through() {
    let backend = MockTransport::new(|_| Ok(ApiResponse::ok(json!([]))));
    let h = harness(backend, rejecting_backend());
    let areas = &h.portal.admin().evacuation_areas;

    areas.get_nearest_areas(14.5995, 120.9842).await.unwrap();
    let request = h.admin.last();
    assert_eq!(request.url, "http://127.0.0.1:8000/api/evacuation-areas/nearest");
    assert_eq!(
        request.query,
        [
            ("latitude".to_string(), "14.5995".to_string()),
            ("longitude".to_string(), "120.9842".to_string()),
        ]
    );

    areas.get_recommended_areas(14.5, 121.0, 29.41).await.unwrap();
    let query = h.admin.last().query;
    assert!(query.contains(&("predicted".to_string(), "29.41".to_string())));

    areas.get_by_id(3, None).await.unwrap();
    assert!(h.admin.last().query.is_empty());
    let origin = Coordinates {
        latitude: 1.0,
        longitude: 2.0,
    };
    areas.get_by_id(3, Some(origin)).await.unwrap();
    assert_eq!(h.admin.last().query.len(), 2);
}

#[tokio::test]
async fn resident_login_stores_token_and_user() {
    let backend = MockTransport::new(|request| {
        Ok(match request.url.as_str() {
            "http://127.0.0.1:8001/api/auth/login" => ApiResponse::ok(json!({
                "token": "r-1",
                "user": {"id": 4, "name": "Ana Reyes"}
            })),
            _ => ApiResponse::ok(json!({})),
        })
    });
    let mut h = harness(admin_backend(), backend);

    let location = h.portal.login_resident("ana@example.org", "pw").await.unwrap();
    assert_eq!(location.path, "/resident_pages/dashboard");
    assert_eq!(h.store.get("resident_token").as_deref(), Some("r-1"));
    assert_eq!(h.portal.auth_state().get_username(), "Ana Reyes");

    let login = h.resident.last();
    assert_eq!(login.method, Method::POST);
    assert_eq!(login.body, Some(json!({"email": "ana@example.org", "password": "pw"})));
}

#[tokio::test]
async fn resident_logout_clears_session_even_when_the_call_fails() {
    let backend = MockTransport::new(|request| {
        Err(Error::transport(&request.url, "connection refused"))
    });
    let mut h = harness(admin_backend(), backend);
    h.store.set("resident_token", "r-1").unwrap();
    h.store.set("resident_user", "{}").unwrap();

    let location = h.portal.logout_resident().await.unwrap();
    assert_eq!(location.path, "/resident/login");
    assert_eq!(h.store.get("resident_token"), None);
    assert_eq!(h.store.get("resident_user"), None);
    assert_eq!(h.resident.requests().len(), 1);
}

#[tokio::test]
async fn list_bodies_are_returned_whatever_their_shape() {
    let bodies = [
        json!([{"id": 1, "name": null, "capacity": 10}]),
        json!([{"id": "A-1", "name": "Area A"}]),
        json!({"data": [{"id": 2}], "total": 1}),
    ];
    for body in bodies {
        let sent = body.clone();
        let backend = MockTransport::new(move |_| Ok(ApiResponse::ok(sent.clone())));
        let h = harness(backend, rejecting_backend());
        let admin = h.portal.admin();

        assert_eq!(admin.evacuation_areas.get_all().await.unwrap(), body);
        assert_eq!(admin.families.get_all().await.unwrap(), body);
    }
}
