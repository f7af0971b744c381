//! # 問い合わせハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! ANY     /contact   メソッドとボディをイベントに詰め替えて処理する
//!                    （OPTIONS はプリフライト、それ以外はフォーム送信）
//! POST    /invoke    プロキシ形式のイベントをそのまま受け取り、プロキシ形式で返す
//! ```
//!
//! 空のボディは「ボディなし」。UTF-8 として読めないボディや、
//! プロキシ形式として読めないイベントは `MalformedJson` のレスポンスになる。

use std::{any::Any, sync::Arc};

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use contact_relay_shared::{ProxyRequest, ProxyResponse, event_log::error};

use crate::usecase::{ContactOutcome, ContactUseCase};

/// 問い合わせハンドラの State
pub struct ContactState {
    pub usecase: ContactUseCase,
}

/// フォーム送信とプリフライト
pub async fn contact(
    State(state): State<Arc<ContactState>>,
    method: Method,
    body: Bytes,
) -> Response {
    let body = if body.is_empty() {
        None
    } else {
        match String::from_utf8(body.to_vec()) {
            Ok(text) => Some(text),
            // プリフライトはボディを見ない
            Err(_) if method == Method::OPTIONS => None,
            Err(e) => {
                tracing::info!(error = %e, "リクエストボディが UTF-8 ではありません");
                return to_http_response(ContactOutcome::MalformedJson.into_response());
            }
        }
    };
    let request = ProxyRequest::new(method.as_str(), body);

    to_http_response(state.usecase.handle(&request).await)
}

/// プロキシ形式での呼び出し
pub async fn invoke(State(state): State<Arc<ContactState>>, body: Bytes) -> Json<ProxyResponse> {
    let request: ProxyRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!(error = %e, "プロキシ形式のイベントとして読めません");
            return Json(ContactOutcome::MalformedJson.into_response());
        }
    };

    Json(state.usecase.handle(&request).await)
}

/// リクエスト処理中のパニックを `UnexpectedError` として返す
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(
        error.category = error::category::APPLICATION,
        error.kind = error::kind::INTERNAL,
        panic = detail,
        "リクエスト処理中にパニックが発生"
    );

    to_http_response(ContactOutcome::UnexpectedError.into_response())
}

/// プロキシ形式のレスポンスを HTTP レスポンスに変換する
pub fn to_http_response(response: ProxyResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http_response = (status, response.body).into_response();

    let headers = http_response.headers_mut();
    for (name, value) in &response.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    http_response
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request};
    use chrono::{DateTime, TimeZone, Utc};
    use contact_relay_domain::{
        clock::{Clock, FixedClock},
        notification::MailRoute,
    };
    use contact_relay_infra::mock::{MockNotificationSender, MockSubmissionRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        build_router,
        usecase::{Mailer, NotificationService, SubmissionRecorder, TemplateRenderer},
    };

    const VALID_BODY: &str =
        r#"{"name": "Alice", "email": "alice@example.com", "message": "Hi there"}"#;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
    }

    fn create_test_app(
        sender: &MockNotificationSender,
        repository: &MockSubmissionRepository,
    ) -> Router {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(fixed_now()));
        let route = MailRoute {
            from_address:  "sender@example.com".to_string(),
            admin_address: "admin@example.com".to_string(),
        };
        let usecase = ContactUseCase::new(
            NotificationService::new(
                Some(Mailer::new(Arc::new(sender.clone()), route)),
                TemplateRenderer::new().unwrap(),
                clock.clone(),
            ),
            SubmissionRecorder::new(Some(Arc::new(repository.clone())), clock.clone()),
            clock,
        );

        build_router(usecase)
    }

    async fn response_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors_headers(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_post_contact正常系_200で完了メッセージが返る() {
        // Given
        let sender = MockNotificationSender::new();
        let repository = MockSubmissionRepository::new();
        let sut = create_test_app(&sender, &repository);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/contact")
            .header("content-type", "application/json")
            .body(Body::from(VALID_BODY))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({
                "message": "Thank you! Your message has been sent successfully.",
                "timestamp": "2026-01-15T09:30:00.000000Z",
            })
        );
        assert_eq!(sender.sent_emails().len(), 1);
        assert_eq!(repository.records().len(), 1);
    }

    #[tokio::test]
    async fn test_post_contact空ボディで400_ボディなしが返る() {
        // Given
        let sender = MockNotificationSender::new();
        let sut = create_test_app(&sender, &MockSubmissionRepository::new());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/contact")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({"error": "No request body provided"})
        );
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn test_options_contactで200_プリフライト応答が返る() {
        // Given
        let sender = MockNotificationSender::new();
        let sut = create_test_app(&sender, &MockSubmissionRepository::new());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/contact")
            .body(Body::from("not json"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({"message": "CORS preflight"})
        );
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn test_post_contact送信失敗で500が返る() {
        // Given
        let repository = MockSubmissionRepository::new();
        let sut = create_test_app(&MockNotificationSender::failing(), &repository);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/contact")
            .body(Body::from(VALID_BODY))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({"error": "Failed to send email. Please try again."})
        );
        assert!(repository.records().is_empty());
    }

    #[tokio::test]
    async fn test_post_invokeでプロキシ形式のレスポンスが返る() {
        // Given
        let sut = create_test_app(
            &MockNotificationSender::new(),
            &MockSubmissionRepository::new(),
        );
        let event = json!({
            "httpMethod": "POST",
            "body": r#"{"name": "Alice", "email": "invalid", "message": "Hi"}"#,
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/invoke")
            .header("content-type", "application/json")
            .body(Body::from(event.to_string()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let envelope = response_json(response).await;
        assert_eq!(envelope["statusCode"], 400);
        assert_eq!(envelope["body"], r#"{"error":"Invalid email format"}"#);
        assert_eq!(envelope["headers"]["Access-Control-Allow-Origin"], "*");
    }

    #[rstest]
    #[case::get(Method::GET)]
    #[case::put(Method::PUT)]
    #[case::delete(Method::DELETE)]
    #[tokio::test]
    async fn test_post以外のメソッドも同じ処理を通りcorsヘッダーが付く(#[case] method: Method) {
        // Given
        let sender = MockNotificationSender::new();
        let sut = create_test_app(&sender, &MockSubmissionRepository::new());

        let request = Request::builder()
            .method(method)
            .uri("/contact")
            .body(Body::from(VALID_BODY))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await["message"],
            "Thank you! Your message has been sent successfully."
        );
        assert_eq!(sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn test_post_contact_utf8でないボディは400_不正なjsonが返り送信しない() {
        // Given
        let sender = MockNotificationSender::new();
        let repository = MockSubmissionRepository::new();
        let sut = create_test_app(&sender, &repository);
        let body = b"{\"name\": \"Al\xFFice\", \"email\": \"alice@example.com\", \"message\": \"Hi\"}".to_vec();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/contact")
            .body(Body::from(body))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({"error": "Invalid JSON in request body"})
        );
        assert!(sender.sent_emails().is_empty());
        assert!(repository.records().is_empty());
    }

    #[tokio::test]
    async fn test_options_contact_utf8でないボディでもプリフライト応答が返る() {
        let sut = create_test_app(
            &MockNotificationSender::new(),
            &MockSubmissionRepository::new(),
        );

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/contact")
            .body(Body::from(vec![0xFF_u8, 0xFE]))
            .unwrap();

        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response_json(response).await,
            json!({"message": "CORS preflight"})
        );
    }

    #[tokio::test]
    async fn test_post_invoke_http_methodがなければプリフライト以外として処理する() {
        // Given
        let sender = MockNotificationSender::new();
        let sut = create_test_app(&sender, &MockSubmissionRepository::new());
        let event = json!({ "body": "{}" });

        let request = Request::builder()
            .method(Method::POST)
            .uri("/invoke")
            .header("content-type", "application/json")
            .body(Body::from(event.to_string()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let envelope = response_json(response).await;
        assert_eq!(envelope["statusCode"], 400);
        assert_eq!(envelope["body"], r#"{"error":"name is required"}"#);
        assert_eq!(envelope["headers"]["Access-Control-Allow-Origin"], "*");
        assert!(sender.sent_emails().is_empty());
    }

    #[rstest]
    #[case::jsonでない("not json")]
    #[case::空("")]
    #[case::型が違う(r#"{"httpMethod": 1}"#)]
    #[tokio::test]
    async fn test_post_invoke_読めないイベントは不正なjsonの封筒が返る(#[case] event: &str) {
        // Given
        let sender = MockNotificationSender::new();
        let sut = create_test_app(&sender, &MockSubmissionRepository::new());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/invoke")
            .body(Body::from(event.to_string()))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let envelope = response_json(response).await;
        assert_eq!(envelope["statusCode"], 400);
        assert_eq!(envelope["body"], r#"{"error":"Invalid JSON in request body"}"#);
        assert_eq!(envelope["headers"]["Access-Control-Allow-Origin"], "*");
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn test_get_healthで200が返る() {
        let sut = create_test_app(
            &MockNotificationSender::new(),
            &MockSubmissionRepository::new(),
        );

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_handle_panicで500_汎用メッセージが返る() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&response);
        assert_eq!(
            response_json(response).await,
            json!({"error": "Internal server error"})
        );
    }

    #[test]
    fn test_to_http_responseはヘッダーとステータスを引き継ぐ() {
        let response = to_http_response(ProxyResponse::new(400, "{}"));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors_headers(&response);
    }
}
