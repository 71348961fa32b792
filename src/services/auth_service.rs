use crate::entities::{UserRole, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_password(&request.password)?;
        let first_name = require_text(&request.first_name, "First name")?;
        let last_name = require_text(&request.last_name, "Last name")?;
        let date_of_birth = match request.date_of_birth.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_date(raw)?),
            _ => None,
        };

        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            email: Set(email),
            password_hash: Set(hash_password(&request.password)?),
            first_name: Set(first_name),
            last_name: Set(last_name),
            phone: Set(request.phone.unwrap_or_default().trim().to_string()),
            date_of_birth: Set(date_of_birth),
            role: Set(UserRole::Customer),
            membership_type: Set("basic".to_string()),
            membership_expiry: Set(None),
            handicap: Set(None),
            is_active: Set(true),
            email_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "User with this email already exists"))?;

        log::info!("User {} signed up", user.id);
        self.auth_response(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let invalid = || AppError::AuthError("Invalid email or password".to_string());

        let user = self.find_by_email(&email).await?.ok_or_else(invalid)?;
        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(AppError::AuthError("Account is deactivated".to_string()));
        }

        self.auth_response(user)
    }

    pub async fn profile(&self, user_id: i32) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// Creates the bootstrap admin account, or promotes it when the e-mail is
    /// already registered. The password of an existing account is left alone.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AppResult<()> {
        let email = normalize_email(email);
        validate_email(&email)?;

        if let Some(existing) = self.find_by_email(&email).await? {
            if existing.role != UserRole::Admin || !existing.is_active {
                let mut active = existing.into_active_model();
                active.role = Set(UserRole::Admin);
                active.is_active = Set(true);
                active.updated_at = Set(Utc::now());
                active.update(&self.pool).await?;
                log::info!("Promoted {} to admin", email);
            }
            return Ok(());
        }

        validate_password(password)?;
        let now = Utc::now();
        users::ActiveModel {
            email: Set(email.clone()),
            password_hash: Set(hash_password(password)?),
            first_name: Set("Admin".to_string()),
            last_name: Set("User".to_string()),
            phone: Set(String::new()),
            date_of_birth: Set(None),
            role: Set(UserRole::Admin),
            membership_type: Set("basic".to_string()),
            membership_expiry: Set(None),
            handicap: Set(None),
            is_active: Set(true),
            email_verified: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created admin account {}", email);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }

    fn auth_response(&self, user: users::Model) -> AppResult<AuthResponse> {
        let token = self.jwt_service.issue(user.id, &user.email, user.role)?;
        Ok(AuthResponse {
            token,
            expires_in: self.jwt_service.expiry_hours() * 3600,
            user: user.into(),
        })
    }
}
