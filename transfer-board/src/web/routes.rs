//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::compose::{ComposeError, Composer, Composition};
use crate::session::{Session, SessionState};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "transfer_session";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/journeys", get(journeys))
        .route("/settings", post(update_settings))
        .route("/load-more", post(load_more))
        .route("/reverse", post(reverse_journey))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Full board page.
async fn index_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    let session = state.sessions.resume(session_cookie(&headers)).await;

    let snapshot = {
        let mut current = session.state.lock().await;
        if query.is_auto_refresh() {
            current.record_auto_refresh();
        }
        current.clone()
    };

    let outcome = compose_board(&state, &snapshot).await;
    let template = IndexTemplate {
        settings: SettingsView::from_state(&snapshot),
        board: BoardView::from_outcome(&snapshot, &outcome),
        refresh_secs: state.refresh.next_refresh_secs(snapshot.auto_refreshes),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(with_session_cookie(Html(html).into_response(), &session))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Journey board for the current session.
async fn journeys(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resume(session_cookie(&headers)).await;
    let snapshot = session.state.lock().await.clone();

    let outcome = compose_board(&state, &snapshot).await;

    // Return HTML or JSON based on Accept header
    let response = if accepts_html(&headers) {
        let template = BoardTemplate {
            board: BoardView::from_outcome(&snapshot, &outcome),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Html(html).into_response()
    } else {
        let composition = outcome.map_err(AppError::from)?;
        Json(JourneysResponse::from_composition(
            &composition,
            &snapshot.first,
            &snapshot.second,
        ))
        .into_response()
    };

    Ok(with_session_cookie(response, &session))
}

/// Replace the session's stations and walking time.
async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SettingsForm>,
) -> Response {
    let session = state.sessions.resume(session_cookie(&headers)).await;
    session.state.lock().await.apply_settings(form.into());
    debug!(session = ?session.id, "Settings updated");

    back_to_board(&session)
}

/// Show more journeys.
async fn load_more(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resume(session_cookie(&headers)).await;
    session.state.lock().await.load_more();

    back_to_board(&session)
}

/// Swap the journey's direction.
async fn reverse_journey(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resume(session_cookie(&headers)).await;
    session.state.lock().await.reverse_journey();

    back_to_board(&session)
}

/// Compose the board for a snapshot, departing now.
async fn compose_board(
    state: &AppState,
    snapshot: &SessionState,
) -> Result<Composition, ComposeError> {
    let request = snapshot.board_request(state.now());
    Composer::new(state.timetable.as_ref(), state.compose.as_ref())
        .compose_board(&request)
        .await
}

/// Session id from the request's cookies, if any.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
}

/// Attach the session cookie when the session was just created.
fn with_session_cookie(mut response: Response, session: &Session) -> Response {
    if session.is_new {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            session.id.as_str()
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Session cookie not representable"),
        }
    }
    response
}

fn back_to_board(session: &Session) -> Response {
    with_session_cookie(Redirect::to("/").into_response(), session)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<ComposeError> for AppError {
    fn from(e: ComposeError) -> Self {
        match e {
            ComposeError::InvalidQuery(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            ComposeError::FirstLeg(_) | ComposeError::NoConnections => AppError::BadGateway {
                message: FETCH_FAILED_MESSAGE.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{NaiveDateTime, TimeDelta, Utc};
    use reqwest::{StatusCode, header};
    use serde_json::Value;

    use super::*;
    use crate::compose::ComposeConfig;
    use crate::session::{RefreshPolicy, SessionConfig, SessionDefaults, SessionStore};
    use crate::timetable::stub::{StubUpstream, connection};
    use crate::timetable::{TimetableClient, TimetableConfig};

    const LEG1: (&str, &str) = ("Zürich, Schlyfi", "Zürich, Kreuzplatz");
    const LEG2: (&str, &str) = ("Zürich Stadelhofen", "Glattbrugg");

    struct TestApp {
        base: String,
        stub: StubUpstream,
        http: reqwest::Client,
    }

    impl TestApp {
        async fn spawn() -> Self {
            Self::spawn_with(RefreshPolicy::default()).await
        }

        async fn spawn_with(refresh: RefreshPolicy) -> Self {
            let stub = StubUpstream::spawn().await;
            let timetable =
                TimetableClient::new(TimetableConfig::new().with_base_url(&stub.base_url)).unwrap();
            let sessions = SessionStore::new(&SessionConfig::default(), SessionDefaults::default());
            let state = AppState::new(
                timetable,
                sessions,
                ComposeConfig::default(),
                refresh,
                chrono_tz::CET,
            );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let app = create_router(state, "static");
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let http = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap();

            Self {
                base: format!("http://{addr}"),
                stub,
                http,
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base, path)
        }

        async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
            let mut request = self.http.get(self.url(path));
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            request.send().await.unwrap()
        }

        async fn post(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
            let mut request = self.http.post(self.url(path));
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            request.send().await.unwrap()
        }

        async fn journeys_json(&self, cookie: &str) -> Value {
            let response = self.get("/journeys", Some(cookie)).await;
            assert_eq!(response.status(), StatusCode::OK);
            response.json().await.unwrap()
        }
    }

    /// Timestamp `minutes` from now on the timetable's wall clock.
    fn at(minutes: i64) -> String {
        let now = Utc::now().with_timezone(&chrono_tz::CET).naive_local();
        (now + TimeDelta::minutes(minutes))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// `name=value` pair from a response's Set-Cookie header.
    fn cookie_of(response: &reqwest::Response) -> Option<String> {
        let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
        value.split(';').next().map(str::to_string)
    }

    fn script_default_board(stub: &StubUpstream) {
        stub.route(
            LEG1.0,
            LEG1.1,
            vec![
                connection(&at(10), &at(15), "31", "bus", None),
                connection(&at(20), &at(25), "31", "bus", None),
                connection(&at(30), &at(35), "31", "bus", None),
            ],
        );
        stub.route(
            LEG2.0,
            LEG2.1,
            vec![connection(&at(60), &at(75), "S16", "strain", Some("2"))],
        );
    }

    #[tokio::test]
    async fn health_check() {
        let app = TestApp::spawn().await;
        let response = app.get("/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn index_renders_board_and_starts_session() {
        let app = TestApp::spawn().await;
        script_default_board(&app.stub);

        let response = app.get("/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = cookie_of(&response).unwrap();
        assert!(cookie.starts_with("transfer_session="));

        let body = response.text().await.unwrap();
        assert!(body.contains("Connection 1"));
        assert!(body.contains("Connection 3"));
        assert!(!body.contains("Connection 4"));
        assert!(body.contains("S16 to S16 terminal (Track 2)"));
        assert!(body.contains("url=/?refresh=auto"));

        let leg2 = app.stub.requests_for(LEG2.0, LEG2.1);
        assert_eq!(leg2.len(), 3);
        assert!(leg2.iter().all(|p| p["num"] == "1"));
        assert_eq!(app.stub.requests_for(LEG1.0, LEG1.1)[0]["num"], "3");
    }

    #[tokio::test]
    async fn known_cookie_is_not_reissued() {
        let app = TestApp::spawn().await;
        let cookie = cookie_of(&app.get("/", None).await).unwrap();

        let again = app.get("/", Some(&cookie)).await;
        assert!(cookie_of(&again).is_none());
    }

    #[tokio::test]
    async fn first_leg_failure_shows_banner_without_second_leg_fetch() {
        let app = TestApp::spawn().await;
        app.stub.fail(LEG1.0, LEG1.1, 500);

        let body = app.get("/", None).await.text().await.unwrap();

        assert!(body.contains(FETCH_FAILED_MESSAGE));
        assert!(!body.contains("Connection 1"));
        assert!(app.stub.requests_for(LEG2.0, LEG2.1).is_empty());
    }

    #[tokio::test]
    async fn journeys_json_failure_is_bad_gateway() {
        let app = TestApp::spawn().await;
        app.stub.fail(LEG1.0, LEG1.1, 500);

        let response = app.get("/journeys", None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn journeys_json_reports_skipped_candidates() {
        let app = TestApp::spawn().await;
        app.stub.route(
            LEG1.0,
            LEG1.1,
            vec![
                connection(&at(10), &at(15), "31", "bus", None),
                connection(&at(20), &at(25), "31", "bus", None),
            ],
        );
        // Reachable from the first arrival only
        app.stub.route(
            LEG2.0,
            LEG2.1,
            vec![connection(&at(28), &at(40), "S16", "strain", None)],
        );
        let cookie = cookie_of(&app.get("/", None).await).unwrap();

        let body = app.journeys_json(&cookie).await;

        assert_eq!(body["journeys"].as_array().unwrap().len(), 1);
        assert_eq!(body["journeys"][0]["first"]["from"], LEG1.0);
        assert_eq!(body["journeys"][0]["second"]["to"], LEG2.1);
        assert_eq!(body["journeys"][0]["second"]["vehicle"], "rail");
        assert_eq!(body["skipped"][0]["index"], 1);
    }

    #[tokio::test]
    async fn journeys_html_is_fragment() {
        let app = TestApp::spawn().await;
        script_default_board(&app.stub);

        let response = app
            .http
            .get(app.url("/journeys"))
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.text().await.unwrap();
        assert!(body.contains("Connection 2"));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn settings_form_updates_session() {
        let app = TestApp::spawn().await;
        let cookie = cookie_of(&app.get("/", None).await).unwrap();

        let response = app
            .http
            .post(app.url("/settings"))
            .header(header::COOKIE, &cookie)
            .form(&[
                ("leg1_from", "Bern"),
                ("leg1_to", "Thun"),
                ("walking_time", "4"),
                ("leg2_from", ""),
                ("leg2_to", "Spiez"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let arrival = at(30);
        app.stub.route(
            "Bern",
            "Thun",
            vec![connection(&at(10), &arrival, "IC6", "train", None)],
        );
        app.get("/journeys", Some(&cookie)).await;

        assert_eq!(app.stub.requests_for("Bern", "Thun").len(), 1);
        // Blank origin keeps the previous value
        let leg2 = app.stub.requests_for(LEG2.0, "Spiez");
        assert_eq!(leg2.len(), 1);
        let ready = NaiveDateTime::parse_from_str(&arrival, "%Y-%m-%d %H:%M:%S").unwrap()
            + TimeDelta::minutes(4);
        assert_eq!(leg2[0]["time"], ready.format("%H:%M").to_string());
    }

    #[tokio::test]
    async fn invalid_walking_time_is_rejected() {
        let app = TestApp::spawn().await;

        let response = app
            .http
            .post(app.url("/settings"))
            .form(&[
                ("leg1_from", "Bern"),
                ("leg1_to", "Thun"),
                ("walking_time", "-3"),
                ("leg2_from", "Thun"),
                ("leg2_to", "Spiez"),
            ])
            .send()
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn load_more_requests_three_more() {
        let app = TestApp::spawn().await;
        let cookie = cookie_of(&app.get("/", None).await).unwrap();

        let response = app.post("/load-more", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        app.get("/", Some(&cookie)).await;

        let leg1 = app.stub.requests_for(LEG1.0, LEG1.1);
        assert_eq!(leg1.len(), 2);
        assert_eq!(leg1[0]["num"], "3");
        assert_eq!(leg1[1]["num"], "6");
    }

    #[tokio::test]
    async fn reverse_swaps_both_legs() {
        let app = TestApp::spawn().await;
        let cookie = cookie_of(&app.get("/", None).await).unwrap();

        app.post("/reverse", Some(&cookie)).await;
        app.stub.route(
            LEG2.1,
            LEG2.0,
            vec![connection(&at(10), &at(20), "S16", "strain", None)],
        );
        app.get("/", Some(&cookie)).await;

        assert_eq!(app.stub.requests_for(LEG2.1, LEG2.0).len(), 1);
        assert_eq!(app.stub.requests_for(LEG1.1, LEG1.0).len(), 1);
    }

    #[tokio::test]
    async fn post_without_cookie_starts_session() {
        let app = TestApp::spawn().await;

        let response = app.post("/reverse", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = cookie_of(&response).unwrap();

        app.get("/", Some(&cookie)).await;
        assert_eq!(app.stub.requests_for(LEG2.1, LEG2.0).len(), 1);
    }

    #[tokio::test]
    async fn auto_refresh_stops_at_limit() {
        let app = TestApp::spawn_with(RefreshPolicy::new(Duration::from_secs(60), 2)).await;
        let first = app.get("/", None).await;
        let cookie = cookie_of(&first).unwrap();
        assert!(first.text().await.unwrap().contains(r#"content="60;url=/?refresh=auto""#));

        let body = app.get("/?refresh=auto", Some(&cookie)).await.text().await.unwrap();
        assert!(body.contains("http-equiv=\"refresh\""));

        let body = app.get("/?refresh=auto", Some(&cookie)).await.text().await.unwrap();
        assert!(!body.contains("http-equiv=\"refresh\""));

        // Manual reloads neither count nor reschedule
        let body = app.get("/", Some(&cookie)).await.text().await.unwrap();
        assert!(!body.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; transfer_session=abc123; other=1"),
        );
        assert_eq!(session_cookie(&headers), Some("abc123"));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("transfer_sessionx=1"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[test]
    fn app_error_statuses() {
        let bad_gateway = AppError::from(ComposeError::NoConnections).into_response();
        assert_eq!(bad_gateway.status(), axum::http::StatusCode::BAD_GATEWAY);

        let invalid = AppError::from(ComposeError::InvalidQuery(
            crate::domain::DomainError::ZeroCount,
        ))
        .into_response();
        assert_eq!(invalid.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
