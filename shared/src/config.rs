use anyhow::Result;
use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub identity: IdentityConfig,
    pub mail: MailConfig,
    pub reviews: ReviewsConfig,
    pub provisioning: ProvisioningConfig,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST")?,
            port: env::var("REDIS_PORT")?.parse()?,
        };
        let identity = IdentityConfig {
            base_url: env::var("IDENTITY_PROVIDER_URL")?,
            service_key: env::var("IDENTITY_SERVICE_KEY")?,
        };
        let mail = MailConfig {
            api_url: env::var("MAIL_API_URL")?,
            api_key: env::var("MAIL_API_KEY")?,
            sender: env::var("MAIL_SENDER")?,
            booking_inbox: env::var("BOOKING_INBOX")?,
        };
        let reviews = ReviewsConfig {
            api_url: env::var("REVIEWS_API_URL")?,
            api_key: env::var("REVIEWS_API_KEY")?,
            place_id_a: env::var("REVIEWS_PLACE_ID_A")?,
            place_id_b: env::var("REVIEWS_PLACE_ID_B")?,
            cache_ttl: env_or("REVIEWS_CACHE_TTL", 600),
        };
        let provisioning = ProvisioningConfig {
            settle_interval: Duration::from_millis(env_or("PROVISION_SETTLE_INTERVAL_MS", 100)),
            settle_timeout: Duration::from_millis(env_or("PROVISION_SETTLE_TIMEOUT_MS", 2000)),
        };
        let bootstrap_admin = BootstrapAdminConfig::from_env();
        Ok(Self {
            database,
            redis,
            identity,
            mail,
            reviews,
            provisioning,
            bootstrap_admin,
        })
    }
}

fn env_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub service_key: String,
}

#[derive(Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
    pub booking_inbox: String,
}

#[derive(Clone)]
pub struct ReviewsConfig {
    pub api_url: String,
    pub api_key: String,
    pub place_id_a: String,
    pub place_id_b: String,
    pub cache_ttl: u64,
}

/// Pacing for the wait on the provider-created role record after a new
/// identity is registered.
#[derive(Clone, Copy)]
pub struct ProvisioningConfig {
    pub settle_interval: Duration,
    pub settle_timeout: Duration,
}

/// Seed account provisioned at startup when the three variables are set.
/// Login for this account goes through the identity provider like any other.
#[derive(Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl BootstrapAdminConfig {
    fn from_env() -> Option<Self> {
        let email = env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        let name = env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrator".into());
        Some(Self {
            email,
            password,
            name,
        })
    }
}
