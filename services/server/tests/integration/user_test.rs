use chemtrack_server::domain::types::SESSION_TOKEN_LEN;
use chemtrack_server::error::ChemtrackError;
use chemtrack_server::usecase::user::{
    GetUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, SignupInput, SignupUseCase,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::helpers::{MockHasher, MockSessionRepo, MockUserRepo, test_user};

fn signup_input() -> SignupInput {
    SignupInput {
        first_name: Some("Ravi".to_owned()),
        last_name: Some("Iyer".to_owned()),
        email: Some("ravi@example.com".to_owned()),
        phone: Some("9123456780".to_owned()),
        password: Some("strongpass9".to_owned()),
    }
}

#[tokio::test]
async fn should_signup_new_user_with_hashed_password() {
    let repo = MockUserRepo::empty();
    let users_handle = repo.users_handle();
    let uc = SignupUseCase {
        users: repo,
        hasher: MockHasher,
    };

    let user = uc.execute(signup_input()).await.unwrap();

    assert_eq!(user.first_name, "Ravi");
    assert_eq!(user.email, "ravi@example.com");

    let users = users_handle.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].password_hash, "hashed:strongpass9");
}

#[tokio::test]
async fn should_reject_signup_with_taken_email() {
    let existing = test_user();
    let uc = SignupUseCase {
        users: MockUserRepo::new(vec![existing.clone()]),
        hasher: MockHasher,
    };

    let mut input = signup_input();
    input.email = Some(existing.email);
    let result = uc.execute(input).await;

    assert!(
        matches!(result, Err(ChemtrackError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_signup_with_missing_phone() {
    let uc = SignupUseCase {
        users: MockUserRepo::empty(),
        hasher: MockHasher,
    };

    let mut input = signup_input();
    input.phone = None;
    let result = uc.execute(input).await;

    assert!(matches!(
        result,
        Err(ChemtrackError::MissingField("phone"))
    ));
}

#[tokio::test]
async fn should_login_and_issue_session_token() {
    let user = test_user();
    let sessions = MockSessionRepo::empty();
    let sessions_handle = sessions.sessions_handle();
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        sessions,
        hasher: MockHasher,
    };

    let output = uc
        .execute(LoginInput {
            email: Some(user.email.clone()),
            password: Some("password123".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(output.user_id, user.id);
    assert_eq!(output.token.len(), SESSION_TOKEN_LEN);
    assert!(output.expires_at > Utc::now());

    let sessions = sessions_handle.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].token, output.token);
    assert_eq!(sessions[0].user_id, user.id);
}

#[tokio::test]
async fn should_reject_login_with_wrong_password() {
    let user = test_user();
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        sessions: MockSessionRepo::empty(),
        hasher: MockHasher,
    };

    let result = uc
        .execute(LoginInput {
            email: Some(user.email),
            password: Some("not-the-password".to_owned()),
        })
        .await;

    assert!(matches!(result, Err(ChemtrackError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_login_with_unknown_email() {
    let uc = LoginUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionRepo::empty(),
        hasher: MockHasher,
    };

    let result = uc
        .execute(LoginInput {
            email: Some("nobody@example.com".to_owned()),
            password: Some("password123".to_owned()),
        })
        .await;

    assert!(matches!(result, Err(ChemtrackError::InvalidCredentials)));
}

#[tokio::test]
async fn should_revoke_session_on_logout() {
    let user = test_user();
    let session = chemtrack_server::domain::types::Session {
        id: Uuid::now_v7(),
        user_id: user.id,
        token: "t".repeat(SESSION_TOKEN_LEN),
        expires_at: Utc::now() + Duration::days(7),
        revoked_at: None,
        created_at: Utc::now(),
    };
    let sessions = MockSessionRepo::new(vec![session.clone()]);
    let sessions_handle = sessions.sessions_handle();
    let uc = LogoutUseCase { sessions };

    uc.execute(&session.token).await.unwrap();

    let sessions = sessions_handle.lock().unwrap();
    assert!(sessions[0].revoked_at.is_some());
}

#[tokio::test]
async fn should_reject_logout_with_unknown_token() {
    let uc = LogoutUseCase {
        sessions: MockSessionRepo::empty(),
    };

    let result = uc.execute("no-such-token").await;
    assert!(matches!(result, Err(ChemtrackError::InvalidSession)));
}

#[tokio::test]
async fn should_get_user_by_id() {
    let user = test_user();
    let uc = GetUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let found = uc.execute(user.id).await.unwrap();
    assert_eq!(found.first_name, user.first_name);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let uc = GetUserUseCase {
        users: MockUserRepo::empty(),
    };

    let result = uc.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(ChemtrackError::UserNotFound)));
}
