use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for account registration and authentication
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new account and return a signed token.
    ///
    /// Rejects duplicate emails and usernames before writing anything.
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;
        self.validate_password(&input.password)?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        if self
            .repository
            .get_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, input.email, input.name, password_hash);

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "Registered new user");

        self.token_response(created)
    }

    /// Authenticate by username or email plus password.
    ///
    /// A missing account and a wrong password produce the same error.
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_identifier(&input.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch on login");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.token_response(user)
    }

    /// Current user's profile.
    pub async fn me(&self, user_id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        Ok(user.into())
    }

    fn token_response(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .jwt
            .create_token(
                &user.id.to_string(),
                &user.email,
                &user.name,
                &user.role_names(),
            )
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn validate_password(&self, password: &str) -> UserResult<()> {
        if password.len() < 8 {
            return Err(UserError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(UserError::Validation(
                "Password cannot exceed 128 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum_helpers::JwtConfig;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-with-at-least-32-chars"))
    }

    fn register_input() -> RegisterRequest {
        RegisterRequest {
            name: "Dev".to_string(),
            username: "dev".to_string(),
            email: "dev@example.com".to_string(),
            password: "correct-horse-9".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));
        mock_repo.expect_get_by_username().returning(|_| Ok(None));
        mock_repo.expect_create().returning(|user| Ok(user));

        let service = UserService::new(mock_repo, jwt());
        let response = service.register(register_input()).await.unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.user.username, "dev");
        // The stored hash is never the raw password
        let claims = jwt().verify_token(&response.token).unwrap();
        assert_eq!(claims.email, "dev@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|email| {
            Ok(Some(User::new(
                "taken".to_string(),
                email.to_string(),
                "Taken".to_string(),
                "hash".to_string(),
            )))
        });
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo, jwt());
        let result = service.register(register_input()).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));
        mock_repo.expect_get_by_username().returning(|username| {
            Ok(Some(User::new(
                username.to_string(),
                "other@example.com".to_string(),
                "Other".to_string(),
                "hash".to_string(),
            )))
        });
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo, jwt());
        let result = service.register(register_input()).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(mock_repo, jwt());

        let mut input = register_input();
        input.password = "short".to_string();
        let result = service.register(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        // Register through one service instance, log in through another
        // sharing the same stored user
        let mut create_repo = MockUserRepository::new();
        create_repo.expect_get_by_email().returning(|_| Ok(None));
        create_repo.expect_get_by_username().returning(|_| Ok(None));

        let stored: std::sync::Arc<std::sync::Mutex<Option<User>>> =
            std::sync::Arc::new(std::sync::Mutex::new(None));
        let stored_writer = stored.clone();
        create_repo.expect_create().returning(move |user| {
            *stored_writer.lock().unwrap() = Some(user.clone());
            Ok(user)
        });

        let register_service = UserService::new(create_repo, jwt());
        register_service.register(register_input()).await.unwrap();

        let mut login_repo = MockUserRepository::new();
        let stored_reader = stored.clone();
        login_repo
            .expect_find_by_identifier()
            .returning(move |_| Ok(stored_reader.lock().unwrap().clone()));

        let login_service = UserService::new(login_repo, jwt());
        let response = login_service
            .login(LoginRequest {
                username: "dev".to_string(),
                password: "correct-horse-9".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.email, "dev@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service_for_hash = UserService::new(MockUserRepository::new(), jwt());
        let hash = service_for_hash.hash_password("correct-horse-9").unwrap();

        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_identifier().returning(move |_| {
            Ok(Some(User::new(
                "dev".to_string(),
                "dev@example.com".to_string(),
                "Dev".to_string(),
                hash.clone(),
            )))
        });

        let service = UserService::new(mock_repo, jwt());
        let result = service
            .login(LoginRequest {
                username: "dev".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_identifier().returning(|_| Ok(None));

        let service = UserService::new(mock_repo, jwt());
        let result = service
            .login(LoginRequest {
                username: "ghost".to_string(),
                password: "whatever-long".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_me_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = UserService::new(mock_repo, jwt());
        let result = service.me(Uuid::now_v7()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
