//! Property-based tests for issuance sequences

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use credential_core::{IssueRequest, StaticIdentity, Status};
use credential_service::{CredentialStore, IssuanceService, MemoryStore, VerificationService};

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["CRED-1", "cred-1", "CRED-2", "CRED-3", ""])
        .prop_map(String::from)
}

proptest! {
    /// First issuance of a key succeeds, every later one is already_issued,
    /// and the store ends up with one record per distinct valid key.
    #[test]
    fn prop_issue_sequence_is_create_if_absent(keys in prop::collection::vec(key_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let issuance = IssuanceService::new(store.clone(), Arc::new(StaticIdentity::new("worker-p")));
            let verification = VerificationService::new(store.clone());
            let mut seen = HashSet::new();

            for key in &keys {
                let envelope = issuance
                    .issue(IssueRequest::new(key.as_str(), "Holder", "holder@example.com", "Certificate"))
                    .await
                    .unwrap();

                let expected = if key.is_empty() {
                    Status::Error
                } else if seen.insert(key.clone()) {
                    Status::Success
                } else {
                    Status::AlreadyIssued
                };
                prop_assert_eq!(envelope.status, expected);
            }

            prop_assert_eq!(store.count().await.unwrap(), seen.len());

            for key in &seen {
                let found = verification.verify(Some(key.as_str())).await.unwrap();
                prop_assert_eq!(found.status, Status::Success);
                prop_assert_eq!(&found.data().unwrap().credential_id, key);
            }
            Ok(())
        })?;
    }
}
