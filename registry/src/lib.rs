use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::gateway::identity::IdentityProviderImpl;
use adapter::gateway::mail::MailerImpl;
use adapter::gateway::review::{CachedReviewProvider, ReviewProviderImpl};
use adapter::redis::RedisClient;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::role::RoleRepositoryImpl;
use adapter::repository::staff::StaffRepositoryImpl;
use kernel::gateway::identity::IdentityProvider;
use kernel::gateway::mail::Mailer;
use kernel::gateway::review::ReviewProvider;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::role::RoleRepository;
use kernel::repository::staff::StaffRepository;
use shared::config::{AppConfig, MailConfig, ProvisioningConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    role_repository: Arc<dyn RoleRepository>,
    staff_repository: Arc<dyn StaffRepository>,
    identity_provider: Arc<dyn IdentityProvider>,
    mailer: Arc<dyn Mailer>,
    review_provider: Arc<dyn ReviewProvider>,
    mail_config: MailConfig,
    provisioning: ProvisioningConfig,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let role_repository = Arc::new(RoleRepositoryImpl::new(pool.clone()));
        let staff_repository = Arc::new(StaffRepositoryImpl::new(pool.clone()));
        let identity_provider = Arc::new(IdentityProviderImpl::new(app_config.identity.clone()));
        let mailer = Arc::new(MailerImpl::new(app_config.mail.clone()));
        let review_provider = Arc::new(CachedReviewProvider::new(
            redis_client.clone(),
            Arc::new(ReviewProviderImpl::new(app_config.reviews.clone())),
            app_config.reviews.cache_ttl,
        ));
        Self {
            health_check_repository,
            role_repository,
            staff_repository,
            identity_provider,
            mailer,
            review_provider,
            mail_config: app_config.mail,
            provisioning: app_config.provisioning,
        }
    }

    /// Wires a registry from already-built ports. Tests use this to stand
    /// the router up against stub collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        role_repository: Arc<dyn RoleRepository>,
        staff_repository: Arc<dyn StaffRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
        review_provider: Arc<dyn ReviewProvider>,
        mail_config: MailConfig,
        provisioning: ProvisioningConfig,
    ) -> Self {
        Self {
            health_check_repository,
            role_repository,
            staff_repository,
            identity_provider,
            mailer,
            review_provider,
            mail_config,
            provisioning,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn role_repository(&self) -> Arc<dyn RoleRepository> {
        self.role_repository.clone()
    }

    pub fn staff_repository(&self) -> Arc<dyn StaffRepository> {
        self.staff_repository.clone()
    }

    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.identity_provider.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }

    pub fn review_provider(&self) -> Arc<dyn ReviewProvider> {
        self.review_provider.clone()
    }

    pub fn mail_config(&self) -> &MailConfig {
        &self.mail_config
    }

    pub fn provisioning(&self) -> ProvisioningConfig {
        self.provisioning
    }
}
