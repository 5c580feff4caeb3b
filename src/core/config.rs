use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub upload: UploadConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Browser session cookie settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

/// Login and verification code settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of an emailed login 2FA code
    pub login_code_ttl: Duration,
    /// Lifetime of the code sent after registration
    pub email_verification_ttl: Duration,
    pub bcrypt_cost: u32,
}

/// Outbound email (Resend) settings
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email sending is disabled when no API key is configured
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from_address: String,
    /// Inbox that receives contact form notifications
    pub contact_recipient: String,
}

/// Contact form attachment limits and location
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_file_size: usize,
    pub max_files: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            email: EmailConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SessionConfig {
    const DEFAULT_COOKIE_NAME: &'static str = "sid";
    const DEFAULT_TTL_HOURS: u64 = 24;

    pub fn from_env() -> Result<Self, String> {
        let cookie_name = env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_COOKIE_NAME.to_string());

        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_HOURS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_HOURS must be a valid number".to_string())?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| "SESSION_COOKIE_SECURE must be true or false".to_string())?;

        Ok(Self {
            cookie_name,
            ttl: Duration::from_secs(ttl_hours * 60 * 60),
            cookie_secure,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
            ttl: Duration::from_secs(Self::DEFAULT_TTL_HOURS * 60 * 60),
            cookie_secure: false,
        }
    }
}

impl AuthConfig {
    const DEFAULT_LOGIN_CODE_TTL_MINUTES: u64 = 10;
    const DEFAULT_EMAIL_VERIFICATION_TTL_HOURS: u64 = 24;

    pub fn from_env() -> Result<Self, String> {
        let login_code_ttl_minutes = env::var("LOGIN_CODE_TTL_MINUTES")
            .unwrap_or_else(|_| Self::DEFAULT_LOGIN_CODE_TTL_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| "LOGIN_CODE_TTL_MINUTES must be a valid number".to_string())?;

        let email_verification_ttl_hours = env::var("EMAIL_VERIFICATION_TTL_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_EMAIL_VERIFICATION_TTL_HOURS.to_string())
            .parse::<u64>()
            .map_err(|_| "EMAIL_VERIFICATION_TTL_HOURS must be a valid number".to_string())?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .map_err(|_| "BCRYPT_COST must be a valid number".to_string())?;

        if !(4..=31).contains(&bcrypt_cost) {
            return Err("BCRYPT_COST must be between 4 and 31".to_string());
        }

        Ok(Self {
            login_code_ttl: Duration::from_secs(login_code_ttl_minutes * 60),
            email_verification_ttl: Duration::from_secs(email_verification_ttl_hours * 60 * 60),
            bcrypt_cost,
        })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_code_ttl: Duration::from_secs(Self::DEFAULT_LOGIN_CODE_TTL_MINUTES * 60),
            email_verification_ttl: Duration::from_secs(
                Self::DEFAULT_EMAIL_VERIFICATION_TTL_HOURS * 60 * 60,
            ),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use the API key if it is non-empty
        let resend_api_key = env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty());

        let resend_api_url = env::var("RESEND_API_URL")
            .unwrap_or_else(|_| "https://api.resend.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let from_address =
            env::var("EMAIL_FROM").unwrap_or_else(|_| "noreply@your-domain.com".to_string());

        let contact_recipient = env::var("CONTACT_NOTIFICATION_EMAIL")
            .map_err(|_| "CONTACT_NOTIFICATION_EMAIL environment variable is required".to_string())?;

        Ok(Self {
            resend_api_key,
            resend_api_url,
            from_address,
            contact_recipient,
        })
    }
}

impl UploadConfig {
    const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10MB
    const DEFAULT_MAX_FILES: usize = 5;

    pub fn from_env() -> Result<Self, String> {
        let dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let max_file_size = env::var("MAX_UPLOAD_FILE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_FILE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_FILE_SIZE must be a valid number".to_string())?;

        let max_files = env::var("MAX_UPLOAD_FILES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_FILES.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_FILES must be a valid number".to_string())?;

        Ok(Self {
            dir: PathBuf::from(dir),
            max_file_size,
            max_files,
        })
    }

    /// Request body limit for the multipart contact route
    pub fn max_body_size(&self) -> usize {
        self.max_file_size * self.max_files + 1024 * 1024
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Consulting Site API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Contact form, content and admin API for the consulting website".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_body_limit_covers_all_files() {
        let config = UploadConfig {
            dir: PathBuf::from("uploads"),
            max_file_size: 10 * 1024 * 1024,
            max_files: 5,
        };
        assert!(config.max_body_size() > 50 * 1024 * 1024);
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(config.credentials(), None);

        config.password = Some("secret".to_string());
        assert_eq!(config.credentials(), Some("admin:secret".to_string()));
    }
}
