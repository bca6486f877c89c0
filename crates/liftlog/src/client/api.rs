//! REST client for the liftlog backend
//!
//! Authenticated requests take an explicit [`AuthToken`] and send it as a
//! bearer `Authorization` header. Status codes are mapped onto
//! [`LiftlogError`] in one place so callers only deal with typed results.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::token::AuthToken;
use crate::error::{LiftlogError, Result};
use crate::models::{
    CompletedWorkoutSubmission, LoginRequest, LoginResponse, NewPlannedExercise, PasswordChange,
    PlannedExercise, RegisterRequest, UserProfile, Workout, WorkoutDraft, WorkoutRecord,
};
use crate::session::WorkoutSession;

const API_USER_AGENT: &str = concat!("liftlog/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// liftlog API client
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Body of `PUT /workouts/{id}`: the draft plus the workout id
#[derive(Serialize)]
struct WorkoutUpdate<'a> {
    id: i64,
    #[serde(flatten)]
    draft: &'a WorkoutDraft,
}

impl ApiClient {
    /// Create a client for the given base URL, e.g. `https://api.example.com`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LiftlogError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_headers(&self, token: Option<&AuthToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(API_USER_AGENT));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&token.authorization_header())
                .map_err(|_| LiftlogError::invalid_param("stored token contains invalid characters"))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn request(&self, method: Method, token: Option<&AuthToken>, path: &str) -> Result<RequestBuilder> {
        let url = self.build_url(path);
        debug!(%method, %url, "sending request");
        Ok(self
            .client
            .request(method, url)
            .headers(self.build_headers(token)?))
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await.map_err(LiftlogError::Http)?;
        self.handle_response_status(response, path).await
    }

    /// Make an authenticated GET request and return the response
    pub async fn get(&self, token: &AuthToken, path: &str) -> Result<Response> {
        let builder = self.request(Method::GET, Some(token), path)?;
        self.send(builder, path).await
    }

    /// Make an authenticated GET request and deserialize the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, token: &AuthToken, path: &str) -> Result<T> {
        let response = self.get(token, path).await?;
        response.json().await.map_err(|e| {
            LiftlogError::invalid_response(format!("Failed to parse JSON response: {}", e))
        })
    }

    /// Make an authenticated POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        token: &AuthToken,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let builder = self.request(Method::POST, Some(token), path)?.json(body);
        self.send(builder, path).await
    }

    /// Make an authenticated PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        token: &AuthToken,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let builder = self.request(Method::PUT, Some(token), path)?.json(body);
        self.send(builder, path).await
    }

    /// Make an authenticated DELETE request
    pub async fn delete(&self, token: &AuthToken, path: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, Some(token), path)?;
        self.send(builder, path).await?;
        Ok(())
    }

    /// POST without credentials, for login and registration.
    /// The response is returned as-is so callers can read error bodies.
    async fn post_unauthenticated<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.request(Method::POST, None, path)?
            .json(body)
            .send()
            .await
            .map_err(LiftlogError::Http)
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response, path: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!(%status, path, "request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(LiftlogError::NotAuthenticated),
            StatusCode::NOT_FOUND => Err(LiftlogError::NotFound(path.to_string())),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(LiftlogError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Log in and return the bearer token issued by the server
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post_unauthenticated("/login", &request).await?;
        let status = response.status();
        let body: LoginResponse = response.json().await.unwrap_or_default();

        match body.jwt {
            Some(jwt) if status.is_success() && !jwt.is_empty() => {
                debug!(username, "login succeeded");
                Ok(AuthToken::new(username, jwt))
            }
            _ => Err(LiftlogError::LoginFailed(
                body.message
                    .unwrap_or_else(|| "Please check your credentials.".to_string()),
            )),
        }
    }

    /// Register a new account. Validation runs before anything is sent.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        request.validate()?;

        let response = self.post_unauthenticated("/register", request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: LoginResponse = response.json().await.unwrap_or_default();
        Err(LiftlogError::Api {
            status: status.as_u16(),
            message: body
                .message
                .unwrap_or_else(|| "An error occurred during registration.".to_string()),
        })
    }

    pub async fn profile(&self, token: &AuthToken) -> Result<UserProfile> {
        self.get_json(token, "/profile").await
    }

    pub async fn change_password(&self, token: &AuthToken, change: &PasswordChange) -> Result<()> {
        self.post(token, "/profile/change-password", change).await?;
        Ok(())
    }

    /// Exercise names known to the server for this user
    pub async fn exercise_names(&self, token: &AuthToken) -> Result<Vec<String>> {
        self.get_json(token, "/exercises").await
    }

    pub async fn planned_exercises(&self, token: &AuthToken) -> Result<Vec<PlannedExercise>> {
        self.get_json(token, "/planned").await
    }

    /// Fetch planned exercises by id. An empty id list makes no request.
    pub async fn planned_exercises_by_ids(
        &self,
        token: &AuthToken,
        ids: &[i64],
    ) -> Result<Vec<PlannedExercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.get_json(token, &format!("/planned/ids/{}", joined)).await
    }

    pub async fn create_planned_exercise(
        &self,
        token: &AuthToken,
        exercise: &NewPlannedExercise,
    ) -> Result<()> {
        exercise.validate()?;
        self.post(token, "/planned", exercise).await?;
        Ok(())
    }

    pub async fn workouts(&self, token: &AuthToken) -> Result<Vec<Workout>> {
        self.get_json(token, "/workouts").await
    }

    pub async fn workout(&self, token: &AuthToken, id: i64) -> Result<Workout> {
        self.get_json(token, &format!("/workouts/{}", id)).await
    }

    pub async fn create_workout(&self, token: &AuthToken, draft: &WorkoutDraft) -> Result<()> {
        draft.validate()?;
        self.post(token, "/workouts", draft).await?;
        Ok(())
    }

    pub async fn update_workout(&self, token: &AuthToken, id: i64, draft: &WorkoutDraft) -> Result<()> {
        draft.validate()?;
        let body = WorkoutUpdate { id, draft };
        self.put(token, &format!("/workouts/{}", id), &body).await?;
        Ok(())
    }

    pub async fn delete_workout(&self, token: &AuthToken, id: i64) -> Result<()> {
        self.delete(token, &format!("/workouts/delete-planned/{}", id)).await
    }

    /// Post a finished session. Only the status is checked.
    pub async fn complete_workout(
        &self,
        token: &AuthToken,
        submission: &CompletedWorkoutSubmission,
    ) -> Result<()> {
        let path = format!("/workouts/complete/{}", submission.id);
        self.post(token, &path, submission).await?;
        Ok(())
    }

    pub async fn workout_logs(&self, token: &AuthToken) -> Result<Vec<WorkoutRecord>> {
        self.get_json(token, "/logs").await
    }

    pub async fn workout_log(&self, token: &AuthToken, id: i64) -> Result<WorkoutRecord> {
        self.get_json(token, &format!("/logs/{}", id)).await
    }

    /// Fetch a workout and its planned exercises, and start a session for it
    pub async fn load_session(&self, token: &AuthToken, workout_id: i64) -> Result<WorkoutSession> {
        let workout = self.workout(token, workout_id).await?;
        let planned = self
            .planned_exercises_by_ids(token, &workout.selected_exercise_ids)
            .await?;
        debug!(
            workout_id,
            exercises = planned.len(),
            "loaded workout for session"
        );
        Ok(WorkoutSession::initialize(workout, planned))
    }
}
