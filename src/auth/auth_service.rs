use super::jwt::create_access_token;
use super::password::{hash_password, verify_password};
use crate::{
    error::{AppError, Result},
    user::{User, UserRepository},
};

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(
        user_repository: UserRepository,
        jwt_secret: String,
        jwt_expiration_hours: i64,
    ) -> Self {
        Self {
            user_repository,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(User, String)> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_repository
            .create(username, email, &password_hash, "student")
            .await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        create_access_token(
            user.id,
            &user.email,
            &user.role,
            &self.jwt_secret,
            self.jwt_expiration_hours,
        )
    }
}
