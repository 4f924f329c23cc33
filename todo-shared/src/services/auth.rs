/// Registration, login, and token verification
///
/// Passwords are hashed with Argon2id on a blocking thread. Sessions are
/// HS256 JWTs that carry `{user_id, email}` and expire after seven days, so
/// [`AuthService::verify`] never touches the store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use todo_shared::services::AuthService;
/// use todo_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(
///     Arc::new(MemoryStore::new()),
///     "test-secret-key-at-least-32-bytes-long",
/// );
///
/// let session = auth.register("ana@example.com", "s3nha").await?;
/// let identity = auth.verify(&session.token)?;
/// assert_eq!(identity.email, "ana@example.com");
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::ValidateEmail;

use super::{has_content, ServiceError, ServiceResult};
use crate::{
    auth::{
        jwt::{self, Claims, JwtError},
        middleware::{AuthContext, AuthError},
        password,
    },
    models::user::{CreateUser, User},
    store::CredentialStore,
};

/// Argon2id hash of no real password, verified against when the email is unknown
///
/// Same parameters as [`password::hash_password`], so the work done matches a
/// real verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=65536,t=3,p=4$uihDqQk1NkmxzWKxeb+o7A$4xGIZLu07bwCpYTBNMzbbMdZ+myigG+CfJ1IVAM8swE";

/// Issued session: the signed token plus the email it was issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Authentication service
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    secret: String,
}

impl AuthService {
    /// Creates the service
    ///
    /// `secret` signs and verifies every token for the lifetime of the process.
    pub fn new(store: Arc<dyn CredentialStore>, secret: impl Into<String>) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    /// Registers a new user and returns a session
    ///
    /// # Errors
    ///
    /// - `Validation` if email or password is empty, or the email is not an
    ///   email address
    /// - `DuplicateEmail` if the email is already registered
    /// - `Store` / `Password` on infrastructure failures
    pub async fn register(&self, email: &str, password: &str) -> ServiceResult<Session> {
        require_credentials(email, password)?;

        if !email.validate_email() {
            return Err(ServiceError::Validation("Invalid email format".to_string()));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = self
            .store
            .insert_user(CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| {
                let err = ServiceError::from(e);
                if matches!(err, ServiceError::DuplicateEmail) {
                    debug!(email = %email, "Registration rejected: email taken");
                }
                err
            })?;

        info!(user_id = user.id, "User registered");
        self.issue(&user)
    }

    /// Logs a user in and returns a fresh session
    ///
    /// An unknown email and a wrong password both yield `InvalidCredentials`.
    /// The unknown-email path still runs one Argon2 verification, against
    /// [`DUMMY_HASH`], so response times do not reveal which case occurred.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Session> {
        require_credentials(email, password)?;

        let Some(user) = self.store.find_user_by_email(email).await? else {
            verify_blocking(password.to_string(), DUMMY_HASH.to_string()).await?;
            debug!("Login failed");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            debug!(user_id = user.id, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        self.issue(&user)
    }

    /// Verifies a token and returns the identity it carries
    ///
    /// Pure computation: signature, issuer, and expiry checks only.
    pub fn verify(&self, token: &str) -> ServiceResult<AuthContext> {
        let claims = jwt::validate_token(token, &self.secret).map_err(|e| match e {
            JwtError::Expired => AuthError::Expired,
            other => {
                warn!(error = %other, "Rejected bearer token");
                AuthError::InvalidToken
            }
        })?;

        Ok(AuthContext::from_claims(claims))
    }

    fn issue(&self, user: &User) -> ServiceResult<Session> {
        let token = jwt::create_token(&Claims::new(user.id, &user.email), &self.secret)?;

        Ok(Session {
            token,
            email: user.email.clone(),
        })
    }
}

fn require_credentials(email: &str, password: &str) -> ServiceResult<()> {
    if !has_content(email) || !has_content(password) {
        return Err(ServiceError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

async fn hash_blocking(password: String) -> ServiceResult<String> {
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| ServiceError::Internal(format!("Hashing task failed: {}", e)))??;
    Ok(hash)
}

async fn verify_blocking(password: String, hash: String) -> ServiceResult<bool> {
    let valid = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("Verification task failed: {}", e)))??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn service() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AuthService::new(store.clone(), SECRET), store)
    }

    #[tokio::test]
    async fn test_register_then_login_same_identity() {
        let (auth, _) = service();

        let registered = auth.register("ana@example.com", "s3nha!").await.unwrap();
        let logged_in = auth.login("ana@example.com", "s3nha!").await.unwrap();

        assert_eq!(registered.email, "ana@example.com");
        assert_eq!(logged_in.email, "ana@example.com");

        let a = auth.verify(&registered.token).unwrap();
        let b = auth.verify(&logged_in.token).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (auth, store) = service();

        auth.register("dup@example.com", "first").await.unwrap();
        let second = auth.register("dup@example.com", "second").await;

        assert!(matches!(second, Err(ServiceError::DuplicateEmail)));
        assert_eq!(store.count_users_with_email("dup@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (auth, _) = service();
        auth.register("bia@example.com", "right").await.unwrap();

        let wrong_password = auth.login("bia@example.com", "wrong").await.unwrap_err();
        let unknown_email = auth.login("nobody@example.com", "right").await.unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let (auth, _) = service();

        assert!(matches!(
            auth.register("", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            auth.register("a@example.com", "").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            auth.login("  ", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            auth.register("a@example.com", "   ").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            auth.login("a@example.com", "   ").await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let (auth, store) = service();

        let err = auth.register("not-an-email", "pw").await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid email format");
        assert_eq!(store.count_users_with_email("not-an-email").await, 0);
    }

    #[test]
    fn test_dummy_hash_parses_and_never_matches() {
        assert!(!password::verify_password("", DUMMY_HASH).unwrap());
        assert!(!password::verify_password("s3nha", DUMMY_HASH).unwrap());
    }

    #[test]
    fn test_verify_rejects_bad_tokens() {
        let (auth, _) = service();

        assert!(matches!(
            auth.verify("garbage"),
            Err(ServiceError::Unauthenticated(AuthError::InvalidToken))
        ));

        let foreign = jwt::create_token(
            &Claims::new(1, "a@example.com"),
            "a-completely-different-secret-value!!",
        )
        .unwrap();
        assert!(matches!(
            auth.verify(&foreign),
            Err(ServiceError::Unauthenticated(AuthError::InvalidToken))
        ));

        let expired = jwt::create_token(
            &Claims::with_expiration(1, "a@example.com", Duration::seconds(-60)),
            SECRET,
        )
        .unwrap();
        assert!(matches!(
            auth.verify(&expired),
            Err(ServiceError::Unauthenticated(AuthError::Expired))
        ));
    }
}
