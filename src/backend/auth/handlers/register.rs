/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/v1/register.
 *
 * # Registration Process
 *
 * 1. Validate email, username and password policy
 * 2. Reject an email that is already registered
 * 3. Hash password using bcrypt
 * 4. Create user in the user store
 * 5. Return the identity (no token; the client logs in next)
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{DataResponse, RegisterRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::Identity;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If email, username or password is invalid
/// * `409 Conflict` - If a user with this email already exists
/// * `500 Internal Server Error` - If password hashing or user creation fails
///
/// # Example Request
///
/// ```http
/// POST /api/v1/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "username": "user",
///   "password": "Abc@12345"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "data": {
///     "subjectId": 1,
///     "email": "user@example.com",
///     "username": "user",
///     "isAdmin": false
///   }
/// }
/// ```
pub async fn register(
    State(service): State<AuthService>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<DataResponse<Identity>>), BackendError> {
    let identity = service.register(request.into()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(identity))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::InMemoryUserStore;
    use crate::shared::AuthConfig;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn service() -> AuthService {
        let config = AuthConfig::builder()
            .access_secret("access-secret-for-tests")
            .refresh_secret("refresh-secret-for-tests")
            .hash_cost(4)
            .build()
            .unwrap();
        AuthService::new(&config, Arc::new(InMemoryUserStore::new()))
    }

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: "jane".to_string(),
            password: "Abc@12345".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejected_input_is_not_logged() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = service();
        let result = register(State(service.clone()), Json(request("unlogged-marker<script>"))).await;
        assert!(matches!(result, Err(BackendError::SharedError(_))));
        assert!(!logs.contents().contains("unlogged-marker"));

        let (status, Json(body)) = register(State(service), Json(request("jane@example.com")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.data.email, "jane@example.com");
        assert!(logs.contents().contains("User registered"));
    }
}
