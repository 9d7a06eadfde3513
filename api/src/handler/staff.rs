use crate::extractor::{AppJson, AuthorizedAdmin};
use crate::model::staff::{CreateStaffRequest, StaffCreatedResponse, StaffListResponse};
use axum::extract::State;
use axum::Json;
use garde::Validate;
use kernel::gateway::identity::IdentityProvider;
use kernel::model::auth::event::CreateIdentity;
use kernel::model::id::UserId;
use kernel::model::role::Role;
use kernel::model::staff::event::{CreateStaff, CreateStaffProfile};
use kernel::model::staff::ProvisionedStaff;
use kernel::repository::role::RoleRepository;
use kernel::repository::staff::StaffRepository;
use registry::AppRegistry;
use shared::config::ProvisioningConfig;
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::time::{sleep, Instant};

pub async fn register_staff(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateStaffRequest>,
) -> AppResult<Json<StaffCreatedResponse>> {
    req.validate(&())?;

    let event = CreateStaff::try_from(req)?;

    // Two external systems get mutated below. Run the workflow on its own
    // task so a caller hanging up cannot cancel it between the identity
    // write and the profile write.
    let provisioned = tokio::spawn(provision_staff(
        registry.identity_provider(),
        registry.role_repository(),
        registry.staff_repository(),
        registry.provisioning(),
        event,
    ))
    .await
    .map_err(|e| AppError::UnexpectedError(e.into()))??;

    Ok(Json(StaffCreatedResponse::from(provisioned)))
}

pub async fn show_staff_list(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<StaffListResponse>> {
    registry
        .staff_repository()
        .find_all()
        .await
        .map(StaffListResponse::from)
        .map(Json)
}

/// Provisions one staff account across the identity provider and the
/// profile store:
///
/// 1. create the identity (pre-confirmed, no verification mail)
/// 2. wait for the provider-triggered role record to appear
/// 3. escalate the role when something above the default was requested
/// 4. insert the profile row
///
/// A failure after step 1 deletes the identity again so no login-capable
/// account without a profile is left behind. If that delete also fails
/// the error comes back as `CompensationFailed` and the orphaned id is
/// logged for out-of-band cleanup.
pub async fn provision_staff(
    identity_provider: Arc<dyn IdentityProvider>,
    role_repository: Arc<dyn RoleRepository>,
    staff_repository: Arc<dyn StaffRepository>,
    policy: ProvisioningConfig,
    event: CreateStaff,
) -> AppResult<ProvisionedStaff> {
    let CreateStaff {
        email,
        password,
        name,
        phone,
        location,
        role,
    } = event;

    let user_id = identity_provider
        .create_identity(CreateIdentity {
            email: email.clone(),
            password,
        })
        .await?;
    tracing::info!(%user_id, "identity created");

    if let Err(e) = wait_for_role_record(role_repository.as_ref(), user_id, &policy).await {
        return Err(compensate(identity_provider.as_ref(), user_id, e).await);
    }

    if role != Role::default() {
        // The account is already usable with its default role, so a failed
        // escalation is logged and the workflow carries on.
        if let Err(e) = role_repository.update(user_id, role).await {
            tracing::warn!(
                %user_id,
                requested_role = role.as_ref(),
                error.message = %e,
                "role escalation failed, account keeps its default role"
            );
        }
    }

    let profile = CreateStaffProfile::new(user_id, name.clone(), phone.clone(), location);
    if let Err(e) = staff_repository.create(profile).await {
        return Err(compensate(identity_provider.as_ref(), user_id, e).await);
    }

    tracing::info!(%user_id, "staff account provisioned");
    Ok(ProvisionedStaff {
        user_id,
        email,
        name,
        phone,
        location,
        role,
    })
}

/// The provider inserts the default role record asynchronously after an
/// identity is created. Poll for it with a doubling interval until the
/// budget runs out; proceeding without it would make the escalation and
/// the authorization reads race a row that may not exist yet.
async fn wait_for_role_record(
    role_repository: &dyn RoleRepository,
    user_id: UserId,
    policy: &ProvisioningConfig,
) -> AppResult<()> {
    let deadline = Instant::now() + policy.settle_timeout;
    let mut interval = policy.settle_interval;

    loop {
        match role_repository.find_by_user_id(user_id).await {
            Ok(Some(_)) => return Ok(()),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    %user_id,
                    error.message = %e,
                    "role record lookup failed while settling"
                )
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(AppError::RoleRecordUnavailable(format!(
                "role record for the new account did not appear within {:?}",
                policy.settle_timeout
            )));
        }
        sleep(interval.min(deadline - now)).await;
        interval *= 2;
    }
}

/// Rolls the identity back after a later step failed. The original error
/// is what the caller sees unless the delete fails too, in which case the
/// distinct compensation error points operators at the orphaned identity.
async fn compensate(
    identity_provider: &dyn IdentityProvider,
    user_id: UserId,
    cause: AppError,
) -> AppError {
    match identity_provider.delete_identity(user_id).await {
        Ok(()) => {
            tracing::warn!(
                %user_id,
                error.message = %cause,
                "provisioning rolled back, identity deleted"
            );
            cause
        }
        Err(delete_error) => {
            tracing::error!(
                %user_id,
                error.message = %delete_error,
                cause.message = %cause,
                "identity delete failed during rollback, record orphaned"
            );
            AppError::CompensationFailed(format!("rollback failed after: {cause}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kernel::model::auth::event::SignIn;
    use kernel::model::auth::{AuthIdentity, IssuedToken};
    use kernel::model::location::Location;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubIdentityProvider {
        id: UserId,
        fail_create: bool,
        fail_delete: bool,
        created: AtomicUsize,
        deleted: AtomicUsize,
    }

    impl StubIdentityProvider {
        fn new() -> Self {
            Self {
                id: UserId::new(),
                fail_create: false,
                fail_delete: false,
                created: AtomicUsize::new(0),
                deleted: AtomicUsize::new(0),
            }
        }

        fn failing_create() -> Self {
            Self {
                fail_create: true,
                ..Self::new()
            }
        }

        fn failing_delete() -> Self {
            Self {
                fail_delete: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for StubIdentityProvider {
        async fn verify_token(&self, _token: &str) -> AppResult<AuthIdentity> {
            Ok(AuthIdentity {
                user_id: self.id,
                email: "admin@example.com".into(),
            })
        }

        async fn sign_in(&self, _event: SignIn) -> AppResult<IssuedToken> {
            Ok(IssuedToken {
                access_token: "token".into(),
                token_type: "bearer".into(),
                expires_in: 3600,
                refresh_token: None,
            })
        }

        async fn create_identity(&self, _event: CreateIdentity) -> AppResult<UserId> {
            if self.fail_create {
                return Err(AppError::ExternalServiceError(
                    "A user with this email address has already been registered".into(),
                ));
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(self.id)
        }

        async fn delete_identity(&self, _user_id: UserId) -> AppResult<()> {
            if self.fail_delete {
                return Err(AppError::ExternalServiceError(
                    "identity provider returned 500 Internal Server Error".into(),
                ));
            }
            self.deleted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Role store whose record becomes visible after a configurable number
    /// of lookups, imitating the provider's asynchronous insert.
    struct StubRoleRepository {
        visible_after: usize,
        lookups: AtomicUsize,
        fail_update: bool,
        updates: Mutex<Vec<Role>>,
    }

    impl StubRoleRepository {
        fn visible_immediately() -> Self {
            Self::visible_after(0)
        }

        fn visible_after(lookups: usize) -> Self {
            Self {
                visible_after: lookups,
                lookups: AtomicUsize::new(0),
                fail_update: false,
                updates: Mutex::new(Vec::new()),
            }
        }

        fn never_visible() -> Self {
            Self::visible_after(usize::MAX)
        }

        fn failing_update() -> Self {
            Self {
                fail_update: true,
                ..Self::visible_immediately()
            }
        }
    }

    #[async_trait]
    impl RoleRepository for StubRoleRepository {
        async fn find_by_user_id(&self, _user_id: UserId) -> AppResult<Option<Role>> {
            let seen = self.lookups.fetch_add(1, Ordering::SeqCst);
            if seen >= self.visible_after {
                Ok(Some(Role::default()))
            } else {
                Ok(None)
            }
        }

        async fn update(&self, _user_id: UserId, role: Role) -> AppResult<()> {
            if self.fail_update {
                return Err(AppError::NoRowsAffectedError(
                    "No role record has been updated".into(),
                ));
            }
            self.updates.lock().unwrap().push(role);
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubStaffRepository {
        fail_create: bool,
        inserted: Mutex<Vec<CreateStaffProfile>>,
    }

    impl StubStaffRepository {
        fn failing_create() -> Self {
            Self {
                fail_create: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl StaffRepository for StubStaffRepository {
        async fn create(&self, event: CreateStaffProfile) -> AppResult<()> {
            if self.fail_create {
                return Err(AppError::NoRowsAffectedError(
                    "No staff profile has been created".into(),
                ));
            }
            self.inserted.lock().unwrap().push(event);
            Ok(())
        }

        async fn find_all(&self) -> AppResult<Vec<kernel::model::staff::StaffMember>> {
            Ok(Vec::new())
        }
    }

    fn quick_policy() -> ProvisioningConfig {
        ProvisioningConfig {
            settle_interval: Duration::from_millis(1),
            settle_timeout: Duration::from_millis(50),
        }
    }

    fn event(role: Role) -> CreateStaff {
        CreateStaff {
            email: "new@example.com".into(),
            password: "secret1".into(),
            name: "Anna".into(),
            phone: None,
            location: Some(Location::LocationA),
            role,
        }
    }

    async fn run(
        identity: &Arc<StubIdentityProvider>,
        roles: &Arc<StubRoleRepository>,
        staff: &Arc<StubStaffRepository>,
        role: Role,
    ) -> AppResult<ProvisionedStaff> {
        provision_staff(
            identity.clone(),
            roles.clone(),
            staff.clone(),
            quick_policy(),
            event(role),
        )
        .await
    }

    #[tokio::test]
    async fn a_default_request_creates_identity_and_profile() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::visible_immediately());
        let staff = Arc::new(StubStaffRepository::default());

        let provisioned = run(&identity, &roles, &staff, Role::Staff).await.unwrap();

        assert_eq!(provisioned.role, Role::Staff);
        assert_eq!(provisioned.email, "new@example.com");
        assert_eq!(identity.created.load(Ordering::SeqCst), 1);
        assert_eq!(identity.deleted.load(Ordering::SeqCst), 0);
        assert!(roles.updates.lock().unwrap().is_empty());
        let inserted = staff.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].location, Some(Location::LocationA));
    }

    #[tokio::test]
    async fn a_site_lead_request_escalates_the_role_record() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::visible_immediately());
        let staff = Arc::new(StubStaffRepository::default());

        let provisioned = run(&identity, &roles, &staff, Role::SiteLead).await.unwrap();

        assert_eq!(provisioned.role, Role::SiteLead);
        assert_eq!(*roles.updates.lock().unwrap(), vec![Role::SiteLead]);
    }

    #[tokio::test]
    async fn a_failed_escalation_does_not_abort_the_workflow() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::failing_update());
        let staff = Arc::new(StubStaffRepository::default());

        let provisioned = run(&identity, &roles, &staff, Role::SiteLead).await.unwrap();

        // The caller asked for site-lead and that is what gets reported,
        // even though the record kept its default.
        assert_eq!(provisioned.role, Role::SiteLead);
        assert_eq!(staff.inserted.lock().unwrap().len(), 1);
        assert_eq!(identity.deleted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_duplicate_email_fails_before_any_profile_write() {
        let identity = Arc::new(StubIdentityProvider::failing_create());
        let roles = Arc::new(StubRoleRepository::visible_immediately());
        let staff = Arc::new(StubStaffRepository::default());

        let err = run(&identity, &roles, &staff, Role::Staff).await.unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(staff.inserted.lock().unwrap().is_empty());
        assert_eq!(identity.deleted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_failed_profile_insert_deletes_the_identity() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::visible_immediately());
        let staff = Arc::new(StubStaffRepository::failing_create());

        let err = run(&identity, &roles, &staff, Role::Staff).await.unwrap_err();

        assert!(matches!(err, AppError::NoRowsAffectedError(_)));
        assert_eq!(identity.created.load(Ordering::SeqCst), 1);
        assert_eq!(identity.deleted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn a_failed_rollback_is_reported_as_compensation_failure() {
        let identity = Arc::new(StubIdentityProvider::failing_delete());
        let roles = Arc::new(StubRoleRepository::visible_immediately());
        let staff = Arc::new(StubStaffRepository::failing_create());

        let err = run(&identity, &roles, &staff, Role::Staff).await.unwrap_err();

        assert!(matches!(err, AppError::CompensationFailed(_)));
    }

    #[tokio::test]
    async fn a_role_record_that_never_appears_rolls_the_identity_back() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::never_visible());
        let staff = Arc::new(StubStaffRepository::default());

        let err = run(&identity, &roles, &staff, Role::Staff).await.unwrap_err();

        assert!(matches!(err, AppError::RoleRecordUnavailable(_)));
        assert_eq!(identity.deleted.load(Ordering::SeqCst), 1);
        assert!(staff.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_slow_role_record_is_polled_until_it_appears() {
        let identity = Arc::new(StubIdentityProvider::new());
        let roles = Arc::new(StubRoleRepository::visible_after(3));
        let staff = Arc::new(StubStaffRepository::default());

        let provisioned = run(&identity, &roles, &staff, Role::Staff).await.unwrap();

        assert_eq!(provisioned.role, Role::Staff);
        assert!(roles.lookups.load(Ordering::SeqCst) >= 4);
        assert_eq!(staff.inserted.lock().unwrap().len(), 1);
    }
}
