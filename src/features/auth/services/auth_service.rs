use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::config::{AuthConfig, SessionConfig};
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserResponseDto, VerifyCodeRequestDto,
};
use crate::features::auth::models::{
    AuthenticatedUser, NewSession, NewUser, NewVerificationCode, SessionContext,
    VerificationCode, VerificationCodeType,
};
use crate::features::auth::repositories::{
    SessionRepository, UserRepository, VerificationCodeRepository,
};
use crate::features::auth::session_cookie::{generate_token, hash_token};
use crate::modules::email::EmailService;

/// Verified against when the username is unknown so both paths cost a bcrypt round
const DUMMY_PASSWORD: &str = "not-a-real-password";

/// Mask an email address for display: `alice@x.com` becomes `ali***@x.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(3).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => email.to_string(),
    }
}

fn registration_closed() -> AppError {
    AppError::Forbidden("Registration is closed. An administrator already exists.".to_string())
}

/// Six-digit numeric one-time code
pub fn generate_code() -> String {
    rand::random_range(100_000..1_000_000u32).to_string()
}

/// Registration, two-step login, email verification and session lifecycle
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn VerificationCodeRepository>,
    sessions: Arc<dyn SessionRepository>,
    email: Arc<EmailService>,
    auth_config: AuthConfig,
    session_config: SessionConfig,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn VerificationCodeRepository>,
        sessions: Arc<dyn SessionRepository>,
        email: Arc<EmailService>,
        auth_config: AuthConfig,
        session_config: SessionConfig,
    ) -> Result<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, auth_config.bcrypt_cost)
            .map_err(|e| AppError::Internal(format!("Failed to prepare password hasher: {}", e)))?;

        Ok(Self {
            users,
            codes,
            sessions,
            email,
            auth_config,
            session_config,
            dummy_hash,
        })
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    pub fn cookie_name(&self) -> &str {
        &self.session_config.cookie_name
    }

    fn session_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + duration(self.session_config.ttl)
    }

    /// Load the session for a cookie token together with its signed-in user
    pub async fn resolve_session(&self, token: &str) -> Result<SessionContext> {
        let Some(session) = self
            .sessions
            .find_active(&hash_token(token), Utc::now())
            .await?
        else {
            return Ok(SessionContext::default());
        };

        let user = match session.user_id {
            Some(user_id) => self
                .users
                .find_by_id(user_id)
                .await?
                .map(AuthenticatedUser::from),
            None => None,
        };

        Ok(SessionContext {
            session: Some(session),
            user,
        })
    }

    /// Create the single admin account and sign it in.
    ///
    /// Returns the new user and the token of its freshly issued session.
    pub async fn register(
        &self,
        ctx: &SessionContext,
        dto: RegisterRequestDto,
    ) -> Result<(UserResponseDto, String)> {
        if self.users.count().await? > 0 {
            return Err(registration_closed());
        }

        let password_hash = hash_password(dto.password, self.auth_config.bcrypt_cost).await?;

        let user = self
            .users
            .create_first(NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
                is_admin: true,
            })
            .await?
            .ok_or_else(registration_closed)?;

        tracing::info!("Administrator registered: id={}, username={}", user.id, user.username);

        // The address is confirmed later; a mail outage must not block registration
        let code = generate_code();
        let ttl = self.auth_config.email_verification_ttl;
        self.codes
            .create(NewVerificationCode {
                user_id: user.id,
                code: code.clone(),
                code_type: VerificationCodeType::EmailVerification,
                expires_at: Utc::now() + duration(ttl),
            })
            .await?;

        if let Err(e) = self
            .email
            .send_email_verification(&user.email, &user.username, &code, ttl.as_secs() / 3600)
            .await
        {
            tracing::warn!("Failed to send email verification to user {}: {}", user.id, e);
        }

        let token = self.establish_session(ctx, user.id).await?;
        Ok((user.into(), token))
    }

    /// First login step: check credentials and email a one-time code.
    ///
    /// Returns the response body and, when the caller had no session yet, the
    /// token of the session that now carries the pending login.
    pub async fn login(
        &self,
        ctx: &SessionContext,
        dto: LoginRequestDto,
    ) -> Result<(LoginResponseDto, Option<String>)> {
        let user = self.users.find_by_username(&dto.username).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());
        let password_matches = verify_password(dto.password, hash).await?;

        let user = match user {
            Some(user) if password_matches => user,
            _ => {
                tracing::debug!("Rejected login for username={}", dto.username);
                return Err(AppError::InvalidCredentials);
            }
        };

        let code = generate_code();
        let ttl = self.auth_config.login_code_ttl;
        self.codes
            .create(NewVerificationCode {
                user_id: user.id,
                code: code.clone(),
                code_type: VerificationCodeType::Login2fa,
                expires_at: Utc::now() + duration(ttl),
            })
            .await?;

        self.email
            .send_login_code(&user.email, &user.username, &code, ttl.as_secs() / 60)
            .await
            .map_err(|e| {
                tracing::error!("Failed to send login code to user {}: {}", user.id, e);
                AppError::NotificationFailure("Failed to send verification email".to_string())
            })?;

        let new_token = self.mark_pending(ctx, user.id).await?;

        tracing::info!("Login code sent: user_id={}", user.id);

        Ok((
            LoginResponseDto {
                requires_verification: true,
                email: mask_email(&user.email),
            },
            new_token,
        ))
    }

    /// Second login step: consume the emailed code and bind the session.
    ///
    /// The session token is always rotated; the new token is returned.
    pub async fn verify_login(
        &self,
        ctx: &SessionContext,
        dto: VerifyCodeRequestDto,
    ) -> Result<(UserResponseDto, String)> {
        let (session, pending_user_id) = match (&ctx.session, ctx.pending_user_id()) {
            (Some(session), Some(user_id)) => (session, user_id),
            _ => return Err(AppError::NoPendingLogin),
        };

        self.consume_code(pending_user_id, &dto.code, VerificationCodeType::Login2fa)
            .await?;

        let user = self
            .users
            .find_by_id(pending_user_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = generate_token();
        self.sessions
            .complete_login(
                session.id,
                user.id,
                &hash_token(&token),
                self.session_expiry(Utc::now()),
            )
            .await?;

        tracing::info!("Login completed: user_id={}", user.id);

        Ok((user.into(), token))
    }

    /// Confirm the signed-in user's email address with the code sent at registration
    pub async fn verify_email(
        &self,
        user: &AuthenticatedUser,
        dto: VerifyCodeRequestDto,
    ) -> Result<UserResponseDto> {
        self.consume_code(user.id, &dto.code, VerificationCodeType::EmailVerification)
            .await?;

        let user = self.users.mark_email_verified(user.id).await?;
        tracing::info!("Email verified: user_id={}", user.id);

        Ok(user.into())
    }

    /// Destroy the caller's session. Storage errors are logged, never returned.
    pub async fn logout(&self, ctx: &SessionContext) {
        if let Some(session) = &ctx.session {
            if let Err(e) = self.sessions.delete(session.id).await {
                tracing::warn!("Failed to delete session {}: {}", session.id, e);
            }
        }
    }

    /// Validate and atomically consume a one-time code
    async fn consume_code(
        &self,
        user_id: Uuid,
        code: &str,
        code_type: VerificationCodeType,
    ) -> Result<VerificationCode> {
        let now = Utc::now();

        let purged = self.codes.delete_expired(now).await?;
        if purged > 0 {
            tracing::debug!("Purged {} expired verification codes", purged);
        }

        let found = self
            .codes
            .find_unused(user_id, code, code_type)
            .await?
            .filter(|c| !c.is_expired(now))
            .ok_or(AppError::InvalidOrExpiredCode)?;

        // Lost a race with a concurrent request for the same code
        if !self.codes.mark_used(found.id).await? {
            return Err(AppError::InvalidOrExpiredCode);
        }

        Ok(found)
    }

    /// Record the pending login on the caller's session, creating one if needed
    async fn mark_pending(&self, ctx: &SessionContext, user_id: Uuid) -> Result<Option<String>> {
        if let Some(session) = &ctx.session {
            match self.sessions.set_pending_user(session.id, user_id).await {
                Ok(_) => return Ok(None),
                // Deleted since the middleware loaded it (e.g. concurrent logout)
                Err(AppError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let purged = self.sessions.delete_expired(Utc::now()).await?;
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }

        let token = generate_token();
        self.sessions
            .create(NewSession {
                token_hash: hash_token(&token),
                user_id: None,
                pending_user_id: Some(user_id),
                expires_at: self.session_expiry(Utc::now()),
            })
            .await?;

        Ok(Some(token))
    }

    /// Bind a signed-in user to the caller's session (rotating its token) or a new one
    async fn establish_session(&self, ctx: &SessionContext, user_id: Uuid) -> Result<String> {
        let token = generate_token();
        let token_hash = hash_token(&token);
        let expires_at = self.session_expiry(Utc::now());

        if let Some(session) = &ctx.session {
            match self
                .sessions
                .complete_login(session.id, user_id, &token_hash, expires_at)
                .await
            {
                Ok(_) => return Ok(token),
                Err(AppError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        self.sessions
            .create(NewSession {
                token_hash,
                user_id: Some(user_id),
                pending_user_id: None,
                expires_at,
            })
            .await?;

        Ok(token)
    }
}

fn duration(std_duration: std::time::Duration) -> Duration {
    Duration::seconds(std_duration.as_secs() as i64)
}

async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
