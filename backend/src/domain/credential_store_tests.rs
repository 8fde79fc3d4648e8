//! Tests for the credential store.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{EmailAddress, ErrorCode, FullName, PasswordDigest, PlainPassword};

/// Reversible stand-in so tests stay fast and deterministic.
struct PrefixHasher;

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new(format!("hashed:{}", password.expose())))
    }

    async fn verify(
        &self,
        password: &PlainPassword,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        Ok(digest.as_str() == format!("hashed:{}", password.expose()))
    }
}

#[fixture]
fn jane() -> User {
    User {
        id: UserId::random(),
        full_name: FullName::new("Jane Doe").expect("name"),
        email: EmailAddress::new("jane@example.com").expect("email"),
        password: PasswordDigest::new("hashed:secret1"),
    }
}

fn registration() -> Registration {
    Registration::try_from_parts(
        Some("Jane Doe".to_owned()),
        Some("Jane@Example.com".to_owned()),
        Some("secret1".to_owned()),
    )
    .expect("valid registration")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(
        Some("jane@example.com".to_owned()),
        Some(password.to_owned()),
    )
    .expect("valid credentials")
}

fn store(repo: MockUserRepository) -> CredentialStore<MockUserRepository, PrefixHasher> {
    CredentialStore::new(Arc::new(repo), Arc::new(PrefixHasher))
}

#[tokio::test]
async fn register_hashes_and_inserts_normalised_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|user: &User| {
            user.email.as_str() == "jane@example.com"
                && user.password.as_str() == "hashed:secret1"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let user = store(repo)
        .register(registration())
        .await
        .expect("registration succeeds");
    assert_eq!(user.full_name.as_str(), "Jane Doe");
}

#[rstest]
#[tokio::test]
async fn register_rejects_known_email_without_inserting(jane: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(jane)));
    repo.expect_insert().times(0);

    let err = store(repo)
        .register(registration())
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::DuplicateEmail);
    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[tokio::test]
async fn register_maps_unique_violation_race_to_duplicate_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email()));

    let err = store(repo)
        .register(registration())
        .await
        .expect_err("race lost");
    assert_eq!(err.code(), ErrorCode::DuplicateEmail);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_storage_failures_use_generic_message(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = store(repo)
        .register(registration())
        .await
        .expect_err("storage failure");
    assert_eq!(err.code(), expected);
    assert_eq!(err.message(), "Registration failed. Please try again.");
}

#[rstest]
#[tokio::test]
async fn verify_returns_user_on_matching_password(jane: User) {
    let expected_id = jane.id;
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(jane)));

    let user = store(repo)
        .verify(&credentials("secret1"))
        .await
        .expect("password matches");
    assert_eq!(user.id, expected_id);
}

#[rstest]
#[tokio::test]
async fn verify_rejects_wrong_password(jane: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(jane)));

    let err = store(repo)
        .verify(&credentials("wrong-password"))
        .await
        .expect_err("mismatch");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), INVALID_PASSWORD_MESSAGE);
}

#[tokio::test]
async fn verify_reports_unknown_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));

    let err = store(repo)
        .verify(&credentials("secret1"))
        .await
        .expect_err("unknown");
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn verify_hides_hasher_failures(jane: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(jane)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Err(PasswordHashError::hashing("malformed PHC string")));

    let err = CredentialStore::new(Arc::new(repo), Arc::new(hasher))
        .verify(&credentials("secret1"))
        .await
        .expect_err("hasher failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(!err.message().contains("PHC"));
}
