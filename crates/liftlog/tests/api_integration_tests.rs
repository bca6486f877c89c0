//! Integration tests for the liftlog API client and session flow
//!
//! These tests use wiremock to stand in for the backend.

use liftlog::cli::commands::session;
use liftlog::client::{ApiClient, AuthToken};
use liftlog::config::CredentialStore;
use liftlog::models::{RegisterRequest, WorkoutDraft};
use liftlog::LiftlogError;
use serde_json::json;
use std::collections::VecDeque;
use std::io::{BufReader, Cursor, Read};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_token() -> AuthToken {
    AuthToken::new("ada", "test-jwt")
}

fn test_client(mock_server: &MockServer) -> ApiClient {
    ApiClient::new(&mock_server.uri()).expect("client")
}

/// File-only credential store holding the test token
fn test_store(dir: &TempDir) -> CredentialStore {
    let store = CredentialStore::with_dir("test", dir.path().to_path_buf()).expect("store");
    store.save(&test_token()).expect("save token");
    store
}

fn push_day() -> serde_json::Value {
    json!({
        "id": 7,
        "workoutName": "Push Day",
        "workoutNotes": "go heavy",
        "selectedExerciseIds": [1, 2]
    })
}

fn push_day_exercises() -> serde_json::Value {
    json!([
        {"id": 1, "exerciseName": "Bench Press", "plannedSets": 3, "plannedReps": 5, "plannedWeight": 40.0, "notes": "pause reps"},
        {"id": 2, "exerciseName": "Dip", "plannedSets": 2, "plannedReps": 10, "plannedWeight": 0.0, "notes": null}
    ])
}

async fn mount_push_day(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/workouts/7"))
        .and(header("Authorization", "Bearer test-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(push_day()))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/planned/ids/1,2"))
        .and(header("Authorization", "Bearer test-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(push_day_exercises()))
        .mount(mock_server)
        .await;
}

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthorized_maps_to_not_authenticated() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .workouts(&test_token())
            .await
            .unwrap_err();
        assert!(matches!(err, LiftlogError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .workout(&test_token(), 99)
            .await
            .unwrap_err();
        assert!(matches!(err, LiftlogError::NotFound(ref p) if p == "/workouts/99"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .profile(&test_token())
            .await
            .unwrap_err();
        match err {
            LiftlogError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/planned"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .planned_exercises(&test_token())
            .await
            .unwrap_err();
        assert!(matches!(err, LiftlogError::InvalidResponse(_)));
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"username": "ada", "password": "secret"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"jwt": "abc.def", "message": "Welcome"})),
            )
            .mount(&mock_server)
            .await;

        let token = test_client(&mock_server).login("ada", "secret").await.unwrap();
        assert_eq!(token.username, "ada");
        assert_eq!(token.authorization_header(), "Bearer abc.def");
    }

    #[tokio::test]
    async fn test_login_refused() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
            )
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server).login("ada", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed: Bad credentials");
    }

    #[tokio::test]
    async fn test_login_without_jwt_uses_default_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server).login("ada", "pw").await.unwrap_err();
        assert!(err.to_string().contains("check your credentials"));
    }

    #[tokio::test]
    async fn test_register_mismatch_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let request = RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "one".into(),
            confirm_password: "two".into(),
        };
        let err = test_client(&mock_server).register(&request).await.unwrap_err();
        assert!(matches!(err, LiftlogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_created() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .and(body_json(json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": "pw1234",
                "confirmPassword": "pw1234"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "pw1234".into(),
            confirm_password: "pw1234".into(),
        };
        test_client(&mock_server).register(&request).await.unwrap();
    }
}

mod workout_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_workouts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([push_day()])))
            .mount(&mock_server)
            .await;

        let workouts = test_client(&mock_server).workouts(&test_token()).await.unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].workout_name, "Push Day");
        assert_eq!(workouts[0].selected_exercise_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_update_workout_sends_id_and_draft() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/workouts/7"))
            .and(body_json(json!({
                "id": 7,
                "workoutName": "Push Day",
                "workoutNotes": "",
                "selectedExerciseIds": [1]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut draft = WorkoutDraft::new("Push Day", "");
        draft.toggle_exercise(1);
        test_client(&mock_server)
            .update_workout(&test_token(), 7, &draft)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let draft = WorkoutDraft::new("Empty", "");
        let err = test_client(&mock_server)
            .create_workout(&test_token(), &draft)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Select at least one exercise.");
    }

    #[tokio::test]
    async fn test_delete_workout_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/workouts/delete-planned/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        test_client(&mock_server)
            .delete_workout(&test_token(), 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_history_log() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12,
                "workoutName": "Push Day",
                "workoutNotes": "",
                "date": "2025-06-01",
                "exercises": [{
                    "exerciseId": 1,
                    "exerciseName": "Bench Press",
                    "setLogDtoList": [{"setNumber": 1, "reps": 5, "weight": 40.0}],
                    "notes": ""
                }]
            })))
            .mount(&mock_server)
            .await;

        let record = test_client(&mock_server)
            .workout_log(&test_token(), 12)
            .await
            .unwrap();
        assert_eq!(record.date_label(), "2025-06-01");
        assert_eq!(record.total_sets(), 1);
        assert_eq!(record.exercises[0].summary(), "1 set, 5 reps, top 40 kg");
    }
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_session_initializes_sets() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        let session = test_client(&mock_server)
            .load_session(&test_token(), 7)
            .await
            .unwrap();

        assert_eq!(session.workout().workout_name, "Push Day");
        assert_eq!(session.sets(1).unwrap().len(), 3);
        assert_eq!(session.sets(2).unwrap().len(), 2);
        assert_eq!(session.progress(), (0, 5));
    }

    #[tokio::test]
    async fn test_load_session_without_exercises_skips_planned_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8,
                "workoutName": "Rest",
                "workoutNotes": "",
                "selectedExerciseIds": []
            })))
            .mount(&mock_server)
            .await;

        let session = test_client(&mock_server)
            .load_session(&test_token(), 8)
            .await
            .unwrap();
        assert!(session.state().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_surfaces_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts/7"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .load_session(&test_token(), 7)
            .await
            .unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_interactive_session_submits_completed_sets() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .and(body_json(json!({
                "id": 7,
                "workoutName": "Push Day",
                "workoutNotes": "go heavy",
                "exercises": [{
                    "exerciseId": 1,
                    "exerciseName": "Bench Press",
                    "setLogDtoList": [{"setNumber": 2, "reps": 5, "weight": 42.5}],
                    "notes": "pause reps"
                }]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        // the edit on the completed set is ignored
        let input = Cursor::new("weight 1 2 42.5\ndone 1 2\nreps 1 2 12\nbogus\npreview\nfinish\n");
        session::run(&client, &store, loaded, input).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_submission_can_be_retried() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        let input = Cursor::new("done 2 1\nfinish\nfinish\n");
        session::run(&client, &store, loaded, input).await.unwrap();
    }

    #[tokio::test]
    async fn test_quit_submits_nothing() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        session::run(&client, &store, loaded, Cursor::new("done 1 1\nquit\n"))
            .await
            .unwrap();
    }

    /// Serves one line per read and runs a hook before handing out a given line
    struct ScriptedInput<F: FnMut(&str)> {
        lines: VecDeque<&'static str>,
        before_line: F,
    }

    impl<F: FnMut(&str)> Read for ScriptedInput<F> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let Some(line) = self.lines.pop_front() else {
                return Ok(0);
            };
            (self.before_line)(line);
            let bytes = line.as_bytes();
            buf[..bytes.len()].copy_from_slice(bytes);
            Ok(bytes.len())
        }
    }

    #[tokio::test]
    async fn test_expired_token_keeps_session_until_relogin() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .and(header("Authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .and(header("Authorization", "Bearer fresh-jwt"))
            .and(body_json(json!({
                "id": 7,
                "workoutName": "Push Day",
                "workoutNotes": "go heavy",
                "exercises": [{
                    "exerciseId": 1,
                    "exerciseName": "Bench Press",
                    "setLogDtoList": [{"setNumber": 1, "reps": 5, "weight": 40.0}],
                    "notes": "pause reps"
                }]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        // a second login happens in another shell before the retry
        let relogin = CredentialStore::with_dir("test", dir.path().to_path_buf()).unwrap();
        let mut finishes = 0;
        let input = ScriptedInput {
            lines: VecDeque::from(["done 1 1\n", "finish\n", "finish\n"]),
            before_line: move |line: &str| {
                if line == "finish\n" {
                    finishes += 1;
                    if finishes == 2 {
                        relogin.save(&AuthToken::new("ada", "fresh-jwt")).unwrap();
                    }
                }
            },
        };

        session::run(&client, &store, loaded, BufReader::new(input))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_submission_can_be_retried() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(401))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        session::run(&client, &store, loaded, Cursor::new("done 1 1\nfinish\nfinish\n"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .and(body_json(json!({
                "id": 7,
                "workoutName": "Push Day",
                "workoutNotes": "go heavy",
                "exercises": [{
                    "exerciseId": 1,
                    "exerciseName": "Bench Press",
                    "setLogDtoList": [{"setNumber": 1, "reps": 5, "weight": 40.0}],
                    "notes": "pause reps"
                }]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();

        let input = Cursor::new(b"done 1 1\n\xff\xfe\nfinish\n".to_vec());
        session::run(&client, &store, loaded, input).await.unwrap();
    }

    #[tokio::test]
    async fn test_logged_out_finish_keeps_session() {
        let mock_server = MockServer::start().await;
        mount_push_day(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/workouts/complete/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let loaded = client.load_session(&test_token(), 7).await.unwrap();
        store.clear().unwrap();

        // no token at finish time, so nothing is posted and the session ends at quit
        session::run(&client, &store, loaded, Cursor::new("done 1 1\nfinish\nquit\n"))
            .await
            .unwrap();
    }
}
