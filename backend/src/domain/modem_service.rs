//! Owner-scoped modem record services.
//!
//! This module implements the driving ports for modem records. Every
//! operation resolves against the caller's identity: reads are filtered to
//! the owner, and mutations first load the target through an owner-scoped
//! query so a record that is missing and a record owned by someone else are
//! indistinguishable to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{ModemCommand, ModemQuery, ModemRepository, ModemRepositoryError};
use crate::domain::{Error, FieldViolation, Modem, ModemDraft, UserId};

/// Modem record service implementing the driving ports.
///
/// # Concurrency
///
/// Concurrent update/delete of the same record is last-write-wins: each
/// mutation is a single owner-scoped statement and the store provides
/// row-level atomicity. There is no version column because the boundary
/// contract is a full-record replace with no version token.
#[derive(Clone)]
pub struct ModemService<R> {
    repo: Arc<R>,
}

impl<R> ModemService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> ModemService<R>
where
    R: ModemRepository,
{
    fn map_repository_error(error: ModemRepositoryError) -> Error {
        match error {
            ModemRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("modem repository unavailable: {message}"))
            }
            ModemRepositoryError::Query { message } => {
                Error::internal(format!("modem repository error: {message}"))
            }
        }
    }

    fn validation_error(violations: Vec<FieldViolation>) -> Error {
        Error::invalid_request("modem payload failed validation")
            .with_details(json!({ "violations": violations }))
    }

    fn check_draft(draft: &ModemDraft) -> Result<(), Error> {
        draft.validate().map_err(Self::validation_error)
    }

    /// Load a record through the owner-scoped query, or report NotFound.
    ///
    /// Shared by update and delete so both produce the same outward signal
    /// whether the record never existed or belongs to another account.
    async fn load_owned(&self, owner: &UserId, id: Uuid) -> Result<Modem, Error> {
        self.repo
            .find_by_id_and_owner(id, owner)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("modem not found"))
    }
}

#[async_trait]
impl<R> ModemQuery for ModemService<R>
where
    R: ModemRepository,
{
    async fn list_modems(&self, owner: &UserId) -> Result<Vec<Modem>, Error> {
        self.repo
            .list_by_owner(owner)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> ModemCommand for ModemService<R>
where
    R: ModemRepository,
{
    async fn create_modem(&self, owner: &UserId, draft: ModemDraft) -> Result<Modem, Error> {
        Self::check_draft(&draft)?;

        // No ownership check: the new record belongs to the caller by
        // construction.
        let modem = Modem::create(owner.clone(), draft);
        self.repo
            .insert(&modem)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(modem)
    }

    async fn update_modem(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: ModemDraft,
    ) -> Result<Modem, Error> {
        let mut modem = self.load_owned(owner, id).await?;
        Self::check_draft(&draft)?;

        modem.apply(draft);
        self.repo
            .update(&modem)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(modem)
    }

    async fn delete_modem(&self, owner: &UserId, id: Uuid) -> Result<(), Error> {
        self.load_owned(owner, id).await?;
        self.repo
            .delete(id, owner)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockModemRepository;
    use rstest::rstest;

    fn make_service(repo: MockModemRepository) -> ModemService<MockModemRepository> {
        ModemService::new(Arc::new(repo))
    }

    fn valid_draft() -> ModemDraft {
        ModemDraft {
            name: "Home Router".into(),
            device_type: "TP-Link Archer C7".into(),
            ip_address: "192.168.1.1".into(),
            username: "admin".into(),
            password: "admin123".into(),
            description: Some("Main home router".into()),
        }
    }

    #[tokio::test]
    async fn create_persists_with_caller_as_owner() {
        let owner = UserId::random();
        let expected_owner = owner.clone();
        let mut repo = MockModemRepository::new();
        repo.expect_insert()
            .withf(move |modem: &Modem| modem.owner_id == expected_owner)
            .times(1)
            .return_once(|_| Ok(()));

        let service = make_service(repo);
        let modem = service
            .create_modem(&owner, valid_draft())
            .await
            .expect("create succeeds");

        assert_eq!(modem.owner_id, owner);
        assert_eq!(modem.name, "Home Router");
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_before_touching_the_store() {
        let mut repo = MockModemRepository::new();
        repo.expect_insert().times(0);

        let service = make_service(repo);
        let draft = ModemDraft {
            ip_address: "1.2.3".into(),
            ..valid_draft()
        };
        let error = service
            .create_modem(&UserId::random(), draft)
            .await
            .expect_err("validation failure");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let violations = error
            .details()
            .and_then(|d| d.get("violations"))
            .and_then(|v| v.as_array())
            .expect("violation list");
        assert_eq!(
            violations
                .first()
                .and_then(|v| v.get("field"))
                .and_then(serde_json::Value::as_str),
            Some("ipAddress")
        );
    }

    #[tokio::test]
    async fn update_of_unowned_record_is_not_found_and_leaves_it_unchanged() {
        let mut repo = MockModemRepository::new();
        // Owner-scoped load misses; the mutation must never run.
        repo.expect_find_by_id_and_owner()
            .times(1)
            .return_once(|_, _| Ok(None));
        repo.expect_update().times(0);

        let service = make_service(repo);
        let error = service
            .update_modem(&UserId::random(), Uuid::new_v4(), valid_draft())
            .await
            .expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let owner = UserId::random();
        let existing = Modem::create(owner.clone(), valid_draft());
        let id = existing.id;
        let mut repo = MockModemRepository::new();
        repo.expect_find_by_id_and_owner()
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        repo.expect_update()
            .withf(move |modem: &Modem| modem.id == id && modem.name == "Office Modem")
            .times(1)
            .return_once(|_| Ok(()));

        let service = make_service(repo);
        let draft = ModemDraft {
            name: "Office Modem".into(),
            description: None,
            ..valid_draft()
        };
        let updated = service
            .update_modem(&owner, id, draft)
            .await
            .expect("update succeeds");

        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Office Modem");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn update_validates_only_after_ownership_is_established() {
        // A caller probing someone else's record with a bad payload must see
        // NotFound, not a validation error that confirms the record exists.
        let mut repo = MockModemRepository::new();
        repo.expect_find_by_id_and_owner()
            .times(1)
            .return_once(|_, _| Ok(None));

        let service = make_service(repo);
        let draft = ModemDraft {
            ip_address: "1.2.3".into(),
            ..valid_draft()
        };
        let error = service
            .update_modem(&UserId::random(), Uuid::new_v4(), draft)
            .await
            .expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_checks_ownership_before_deleting() {
        let owner = UserId::random();
        let existing = Modem::create(owner.clone(), valid_draft());
        let id = existing.id;
        let mut repo = MockModemRepository::new();
        repo.expect_find_by_id_and_owner()
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        repo.expect_delete()
            .withf(move |candidate: &Uuid, _owner: &UserId| *candidate == id)
            .times(1)
            .return_once(|_, _| Ok(()));

        let service = make_service(repo);
        service
            .delete_modem(&owner, id)
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn delete_of_unowned_record_is_not_found() {
        let mut repo = MockModemRepository::new();
        repo.expect_find_by_id_and_owner()
            .times(1)
            .return_once(|_, _| Ok(None));
        repo.expect_delete().times(0);

        let service = make_service(repo);
        let error = service
            .delete_modem(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(
        ModemRepositoryError::connection("refused"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(ModemRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn repository_errors_map_into_the_taxonomy(
        #[case] repo_error: ModemRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockModemRepository::new();
        repo.expect_list_by_owner()
            .times(1)
            .return_once(move |_| Err(repo_error));

        let service = make_service(repo);
        let error = service
            .list_modems(&UserId::random())
            .await
            .expect_err("repository failure");

        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn repeating_an_update_yields_the_same_stored_state() {
        use crate::domain::ports::InMemoryModemRepository;

        let owner = UserId::random();
        let repo = Arc::new(InMemoryModemRepository::new());
        let service = ModemService::new(Arc::clone(&repo));
        let created = service
            .create_modem(&owner, valid_draft())
            .await
            .expect("create");

        let replacement = ModemDraft {
            name: "Backup Router".into(),
            ..valid_draft()
        };
        let first = service
            .update_modem(&owner, created.id, replacement.clone())
            .await
            .expect("first update");
        let second = service
            .update_modem(&owner, created.id, replacement)
            .await
            .expect("second update");

        assert_eq!(first.name, second.name);
        assert_eq!(first.ip_address, second.ip_address);
        assert_eq!(first.created_at, second.created_at);
        let listed = service.list_modems(&owner).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|m| m.name.as_str()), Some("Backup Router"));
    }
}
