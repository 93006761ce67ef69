//! Tests for the authentication service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockSessionRepository, MockUserRepository};
use crate::domain::{
    DisplayName, EmailAddress, ErrorCode, Password, RegistrationInput, Username,
};

fn registration(password: &str, confirm_password: &str) -> Registration {
    Registration::try_from_input(RegistrationInput {
        name: "Ann Example",
        username: "ann",
        email: "ann@x.com",
        password,
        confirm_password,
    })
    .expect("valid registration")
}

#[fixture]
fn ann() -> User {
    User::new(UserParts {
        id: UserId::random(),
        display_name: DisplayName::new("Ann Example").expect("name"),
        username: Username::new("ann").expect("username"),
        email: EmailAddress::new("ann@x.com").expect("email"),
        password_hash: PasswordHash::hash(&Password::new("secret")).expect("hash"),
    })
}

fn service(
    users: MockUserRepository,
    sessions: MockSessionRepository,
) -> AuthServiceImpl<MockUserRepository, MockSessionRepository> {
    AuthServiceImpl::new(Arc::new(users), Arc::new(sessions))
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_username(ann: User) {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    users.expect_add_user().times(0);

    let err = service(users, MockSessionRepository::new())
        .register(&registration("secret", "secret"))
        .await
        .expect_err("username taken");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "username already taken");
    assert_eq!(
        err.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!("username"))
    );
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_email(ann: User) {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .return_once(|_| Ok(None));
    users
        .expect_get_user_by_email()
        .withf(|email| email.as_ref() == "ann@x.com")
        .return_once(move |_| Ok(Some(ann)));
    users.expect_add_user().times(0);

    let err = service(users, MockSessionRepository::new())
        .register(&registration("secret", "secret"))
        .await
        .expect_err("email taken");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "email already taken");
}

#[tokio::test]
async fn register_checks_availability_before_password_match() {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_get_user_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_add_user().times(0);

    let err = service(users, MockSessionRepository::new())
        .register(&registration("secret", "Secret"))
        .await
        .expect_err("mismatch");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("password_mismatch"))
    );
}

#[tokio::test]
async fn register_stores_user_with_hashed_password() {
    let mut users = MockUserRepository::new();
    users.expect_get_user_by_username().return_once(|_| Ok(None));
    users.expect_get_user_by_email().return_once(|_| Ok(None));
    users
        .expect_add_user()
        .withf(|user| {
            user.username().as_ref() == "ann"
                && user
                    .password_hash()
                    .verify(&Password::new("secret"))
                    .unwrap_or(false)
        })
        .times(1)
        .return_once(|_| Ok(()));

    let user = service(users, MockSessionRepository::new())
        .register(&registration("secret", "secret"))
        .await
        .expect("registered");

    assert_eq!(user.display_name().as_ref(), "Ann Example");
    assert_eq!(user.email().as_ref(), "ann@x.com");
}

#[tokio::test]
async fn register_maps_store_failures_to_internal_errors() {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .return_once(|_| Err(UserPersistenceError::unavailable("lock poisoned")));

    let err = service(users, MockSessionRepository::new())
        .register(&registration("secret", "secret"))
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn sign_in_reports_unknown_user() {
    let mut users = MockUserRepository::new();
    users.expect_get_user_by_username().return_once(|_| Ok(None));
    let mut sessions = MockSessionRepository::new();
    sessions.expect_insert().times(0);

    let creds = LoginCredentials::try_from_parts("bob", "secret").expect("creds");
    let err = service(users, sessions)
        .sign_in(&creds, None)
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "bob does not have an account.");
}

#[rstest]
#[tokio::test]
async fn sign_in_with_wrong_password_leaves_sessions_untouched(ann: User) {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .return_once(move |_| Ok(Some(ann)));
    let mut sessions = MockSessionRepository::new();
    sessions.expect_insert().times(0);
    sessions.expect_remove().times(0);

    let creds = LoginCredentials::try_from_parts("ann", "wrong").expect("creds");
    let err = service(users, sessions)
        .sign_in(&creds, Some(SessionToken::generate()))
        .await
        .expect_err("bad credentials");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "username or password do not match.");
}

#[rstest]
#[tokio::test]
async fn sign_in_replaces_previous_session(ann: User) {
    let ann_id = *ann.id();
    let previous = SessionToken::generate();
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_username()
        .return_once(move |_| Ok(Some(ann)));
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_remove()
        .withf(move |token| *token == previous)
        .times(1)
        .return_once(move |_| Ok(Some(ann_id)));
    sessions
        .expect_insert()
        .withf(move |token, user| *token != previous && *user == ann_id)
        .times(1)
        .return_once(|_, _| Ok(()));

    let creds = LoginCredentials::try_from_parts("ann", "secret").expect("creds");
    let signed_in = service(users, sessions)
        .sign_in(&creds, Some(previous))
        .await
        .expect("signed in");

    assert_ne!(signed_in.token, previous);
    assert_eq!(signed_in.user.id(), &ann_id);
}

#[tokio::test]
async fn sign_out_without_token_is_not_found() {
    let mut sessions = MockSessionRepository::new();
    sessions.expect_remove().times(0);

    let err = service(MockUserRepository::new(), sessions)
        .sign_out(None)
        .await
        .expect_err("not signed in");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "You are not logged in!");
}

#[rstest]
#[case(None, false)]
#[case(Some(UserId::random()), true)]
#[tokio::test]
async fn sign_out_removes_live_sessions_only(
    #[case] owner: Option<UserId>,
    #[case] should_succeed: bool,
) {
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_remove()
        .times(1)
        .return_once(move |_| Ok(owner));

    let result = service(MockUserRepository::new(), sessions)
        .sign_out(Some(SessionToken::generate()))
        .await;

    assert_eq!(result.is_ok(), should_succeed);
}

#[tokio::test]
async fn require_user_without_session_is_forbidden() {
    let mut sessions = MockSessionRepository::new();
    sessions.expect_resolve().times(0);

    let err = service(MockUserRepository::new(), sessions)
        .require_user(None)
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "You must be logged in to make a request");
}

#[tokio::test]
async fn require_user_resolves_live_token() {
    let user_id = UserId::random();
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_resolve()
        .times(1)
        .return_once(move |_| Ok(Some(user_id)));

    let service = service(MockUserRepository::new(), sessions);
    let resolved = service
        .require_user(Some(SessionToken::generate()))
        .await
        .expect("resolved");

    assert_eq!(resolved, user_id);
}

#[tokio::test]
async fn is_authenticated_is_false_for_stale_token() {
    let mut sessions = MockSessionRepository::new();
    sessions.expect_resolve().return_once(|_| Ok(None));

    let authenticated = service(MockUserRepository::new(), sessions)
        .is_authenticated(Some(SessionToken::generate()))
        .await
        .expect("lookup");

    assert!(!authenticated);
}
