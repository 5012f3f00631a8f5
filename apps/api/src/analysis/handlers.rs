//! Axum route handlers for the analysis API.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::analysis::ingest::resume_input_from_upload;
use crate::analysis::request::{build_analysis_request, ResumeInput};
use crate::analysis::validate::validate_result;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    pub branch: String,
    pub semester: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
}

/// POST /api/v1/analysis
///
/// Text-path submission: validates, calls the provider once, stores the
/// result. Profile edits submitted alongside the resume are committed only
/// on success.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = ResumeInput::Text(request.resume_text.unwrap_or_default());
    let result = run_analysis(
        &state,
        input,
        request.branch,
        request.semester,
        request.name,
        request.college,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/analysis/upload
///
/// Document-path submission: multipart form with `file`, `branch`,
/// `semester` and optional `name`/`college` fields.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut branch: Option<String> = None;
    let mut semester: Option<String> = None;
    let mut name: Option<String> = None;
    let mut college: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        match field.name().unwrap_or_default().to_string().as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_upload)?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            "branch" => branch = Some(text_field(field).await?),
            "semester" => semester = Some(text_field(field).await?),
            "name" => name = Some(text_field(field).await?),
            "college" => college = Some(text_field(field).await?),
            _ => {}
        }
    }

    let (filename, content_type, bytes) = file.ok_or_else(|| {
        AppError::Validation("Please provide your resume content or upload a file.".to_string())
    })?;
    let branch = branch.ok_or_else(|| AppError::Validation("branch is required".to_string()))?;
    let semester: u8 = semester
        .ok_or_else(|| AppError::Validation("semester is required".to_string()))?
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("semester must be a number".to_string()))?;

    let input = resume_input_from_upload(&filename, content_type.as_deref(), &bytes)?;
    let result = run_analysis(&state, input, branch, semester, name, college).await?;
    Ok(Json(result))
}

/// GET /api/v1/analysis
pub async fn handle_get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .results
        .get()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No analysis has been run yet".to_string()))
}

/// DELETE /api/v1/analysis
pub async fn handle_clear_analysis(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.results.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The full submission flow: build (validating), one provider round trip
/// (submitting), defensive validation, then commit profile and result.
/// A failure at any point leaves the previously stored result untouched.
async fn run_analysis(
    state: &AppState,
    input: ResumeInput,
    branch: String,
    semester: u8,
    name: Option<String>,
    college: Option<String>,
) -> Result<AnalysisResult, AppError> {
    let request = build_analysis_request(&input, &branch, semester)?;

    // One in-flight analysis at a time; a concurrent submit gets 409
    // instead of a second billable provider call.
    let _gate = state
        .analysis_gate
        .try_lock()
        .map_err(|_| AppError::AnalysisInFlight)?;

    let result: AnalysisResult = state.llm.generate_json(&request).await?;

    validate_result(&result).map_err(|detail| {
        tracing::warn!("Provider response failed validation: {detail}");
        AppError::MalformedResponse
    })?;

    state
        .profile
        .update(|profile| {
            profile.branch = branch;
            profile.semester = semester;
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(college) = college {
                profile.college = college;
            }
        })
        .await?;

    state.results.set(result.clone()).await?;

    info!(
        "Analysis stored: {} skills, {} gaps, {} recommendations",
        result.extracted_skills.len(),
        result.skill_gaps.len(),
        result.recommendations.len()
    );

    Ok(result)
}

fn bad_upload(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid upload: {e}"))
}

async fn text_field(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(bad_upload)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::GeminiClient;
    use crate::models::analysis::AnalysisResult;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::store::memory::MemoryStore;

    struct MockProvider {
        endpoint: String,
        hits: Arc<AtomicUsize>,
        last_request: Arc<Mutex<Option<Value>>>,
    }

    /// Serves a canned provider reply on an ephemeral port, recording every
    /// request body it receives.
    async fn spawn_provider(status: StatusCode, body: String, delay: Duration) -> MockProvider {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(None));

        let app = {
            let hits = hits.clone();
            let last_request = last_request.clone();
            axum::Router::new().route(
                "/v1beta/models/:call",
                axum::routing::post(move |axum::Json(request): axum::Json<Value>| {
                    let hits = hits.clone();
                    let last_request = last_request.clone();
                    let body = body.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        *last_request.lock().unwrap() = Some(request);
                        tokio::time::sleep(delay).await;
                        (
                            status,
                            [(CONTENT_TYPE, "application/json")],
                            body,
                        )
                    }
                }),
            )
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockProvider {
            endpoint: format!("http://{addr}"),
            hits,
            last_request,
        }
    }

    async fn test_state(endpoint: &str) -> AppState {
        let llm = GeminiClient::with_endpoint(
            "test-key".to_string(),
            endpoint.to_string(),
            Duration::from_secs(5),
        );
        AppState::new(llm, Arc::new(MemoryStore::new()))
            .await
            .unwrap()
    }

    fn provider_reply(text: &str) -> String {
        json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
        .to_string()
    }

    fn minimal_result_json() -> String {
        json!({
            "extractedSkills": [{"name": "Python", "level": 80}],
            "skillGaps": [],
            "recommendations": [],
            "learningPath": [],
            "summary": "Solid foundation."
        })
        .to_string()
    }

    fn analyze_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analysis")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_stores_result_and_commits_profile() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python, SQL",
                "branch": "Computer Science",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["extractedSkills"][0]["name"], "Python");
        assert_eq!(body["summary"], "Solid foundation.");

        // the store holds exactly the returned snapshot
        let stored = state.results.get().await.unwrap();
        let expected: AnalysisResult = serde_json::from_str(&minimal_result_json()).unwrap();
        assert_eq!(stored, expected);

        // profile edits were committed on success
        let profile = state.profile.get().await;
        assert_eq!(profile.branch, "Computer Science");
        assert_eq!(profile.semester, 3);

        // the system instruction carried the academic context verbatim
        let sent = provider.last_request.lock().unwrap().clone().unwrap();
        let instruction = sent["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(instruction.contains("Computer Science"));
        assert!(instruction.contains("Semester 3"));
        // and exactly one content part of the text kind
        let parts = sent["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].get("text").is_some());
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_provider_call() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "",
                "branch": "Computer Science",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_semester_out_of_range_is_rejected_without_provider_call() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python",
                "branch": "Computer Science",
                "semester": 9
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_provider_text_yields_generic_error() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply("I'm sorry, I can't help with that."),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python",
                "branch": "CS",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
        assert_eq!(body["error"]["message"], "Analysis failed. Please try again.");
        assert!(state.results.get().await.is_none());
    }

    #[tokio::test]
    async fn test_non_json_provider_body_yields_generic_error() {
        let provider = spawn_provider(
            StatusCode::OK,
            "<html>definitely not json</html>".to_string(),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python",
                "branch": "CS",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_failed_attempt_never_overwrites_previous_result() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply("garbage"),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;

        let previous: AnalysisResult = serde_json::from_str(&minimal_result_json()).unwrap();
        state.results.set(previous.clone()).await.unwrap();

        let app = build_router(state.clone());
        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python",
                "branch": "CS",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(state.results.get().await, Some(previous));
    }

    #[tokio::test]
    async fn test_provider_error_message_is_surfaced_verbatim() {
        let provider = spawn_provider(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}})
                .to_string(),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let response = app
            .oneshot(analyze_request(json!({
                "resume_text": "Skilled in Python",
                "branch": "CS",
                "semester": 3
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
        assert_eq!(body["error"]["message"], "Quota exceeded");
    }

    #[tokio::test]
    async fn test_identical_submissions_invoke_provider_twice() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let body = json!({
            "resume_text": "Skilled in Python, SQL",
            "branch": "Computer Science",
            "semester": 3
        });
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(analyze_request(body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // no caching, no dedup: two submissions, two provider invocations
        assert_eq!(provider.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_refused_while_one_is_in_flight() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::from_millis(500),
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let body = json!({
            "resume_text": "Skilled in Python",
            "branch": "CS",
            "semester": 3
        });

        let first = {
            let app = app.clone();
            let body = body.clone();
            tokio::spawn(async move { app.oneshot(analyze_request(body)).await.unwrap() })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(first.await.unwrap().status(), StatusCode::OK);
        assert_eq!(provider.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_txt_goes_through_the_text_path() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let boundary = "test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"branch\"\r\n\r\nComputer Science\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"semester\"\r\n\r\n3\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nSkilled in Python, SQL\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analysis/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = provider.last_request.lock().unwrap().clone().unwrap();
        let parts = sent["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["text"], "Skilled in Python, SQL");
    }

    #[tokio::test]
    async fn test_upload_unsupported_format_is_rejected() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state);

        let boundary = "test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"branch\"\r\n\r\nCS\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"semester\"\r\n\r\n3\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNGDATA\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analysis/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_and_clear_round_trip() {
        let provider = spawn_provider(
            StatusCode::OK,
            provider_reply(&minimal_result_json()),
            Duration::ZERO,
        )
        .await;
        let state = test_state(&provider.endpoint).await;
        let app = build_router(state.clone());

        let get = Request::builder()
            .uri("/api/v1/analysis")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let result: AnalysisResult = serde_json::from_str(&minimal_result_json()).unwrap();
        state.results.set(result).await.unwrap();

        let get = Request::builder()
            .uri("/api/v1/analysis")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let clear = Request::builder()
            .method("DELETE")
            .uri("/api/v1/analysis")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(clear).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let get = Request::builder()
            .uri("/api/v1/analysis")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
