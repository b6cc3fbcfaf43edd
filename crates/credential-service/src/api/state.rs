use std::sync::Arc;

use credential_core::IdentityResolver;

use crate::config::ServiceRole;
use crate::core::{DuplicatePolicy, IssuanceService, VerificationService};
use crate::storage::CredentialStore;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Route set this process serves
    pub role: ServiceRole,
    /// Issuance decision component
    pub issuance: IssuanceService,
    /// Verification lookup component
    pub verification: VerificationService,
    /// Identity of this worker, resolved once at startup
    pub worker_id: String,
}

impl AppState {
    /// Wire both services to one store and identity source
    pub fn new(
        role: ServiceRole,
        store: Arc<dyn CredentialStore>,
        identity: Arc<dyn IdentityResolver>,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        let worker_id = identity.resolve();
        Self {
            role,
            issuance: IssuanceService::new(store.clone(), identity)
                .with_duplicate_policy(duplicate_policy),
            verification: VerificationService::new(store),
            worker_id,
        }
    }
}
