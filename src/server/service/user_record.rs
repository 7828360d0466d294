//! Per-user record store and its access rules.
//!
//! A record is addressed by (convention, user, descriptor). Who the "user" is depends on the
//! caller: normally the authenticated user; for a convention that proved its API secret and
//! has no user, the owner named by the `user` query parameter. Anonymous callers without
//! convention authorization can only read records their owner marked public.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{user::UserRepository, user_record::UserRecordRepository},
    error::{auth::AuthError, AppError},
    model::{
        convention::ConventionAccess,
        record::{CreateRecordParams, RecordAcl, RecordValue, UpdateRecordParams, UserRecord},
        user::User,
    },
};

/// Who is calling the record endpoints.
#[derive(Debug, Clone)]
pub struct RecordCaller {
    pub access: ConventionAccess,
    pub user: Option<User>,
    /// Whether `user` manages the convention.
    pub is_manager: bool,
}

impl RecordCaller {
    /// Catalogs are for the convention itself or its managers.
    pub fn may_list(&self) -> bool {
        self.access.authorized || self.is_manager
    }

    fn convention_id(&self) -> i32 {
        self.access.convention.id
    }
}

/// Answer to a record read.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLookup {
    /// Descriptors in use in the convention.
    Descriptors(Vec<String>),
    /// Every user's value for one descriptor.
    Values {
        values: Vec<RecordValue>,
        with_metadata: bool,
    },
    /// One record, `None` when the owner has no such record.
    Record(Option<UserRecord>),
}

/// What a read asks for, besides the descriptor.
#[derive(Debug, Clone, Default)]
pub struct RecordReadParams {
    pub owner_email: Option<String>,
    pub list: bool,
    pub all: bool,
}

pub struct UserRecordService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRecordService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the record owner for the caller.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The authenticated user, or for an authorized convention without
    ///   a user, the owner named by `owner_email`
    /// - `Ok(None)` - No owner could be determined
    /// - `Err(AppError::NotFound)` - Authorized convention named an unknown email
    pub async fn owner(
        &self,
        caller: &RecordCaller,
        owner_email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        if let Some(user) = &caller.user {
            return Ok(Some(user.clone()));
        }

        let Some(email) = owner_email.filter(|_| caller.access.authorized) else {
            return Ok(None);
        };

        let user = UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::debug!(
            "Convention {} queries records for {}",
            caller.convention_id(),
            user.email
        );

        Ok(Some(user))
    }

    /// Reads records.
    ///
    /// - No descriptor: the descriptor catalog.
    /// - `list`: the value catalog of the descriptor, when the caller may list.
    /// - Otherwise: the owner's record.
    ///
    /// An anonymous caller without convention authorization falls back to a public read.
    ///
    /// # Returns
    /// - `Ok(RecordLookup)` - The requested data
    /// - `Err(AuthError::UserNotInSession)` - Anonymous caller and no public record matched
    /// - `Err(AuthError::AccessDenied)` - Catalog requested by a user who is not a manager
    pub async fn retrieve(
        &self,
        caller: &RecordCaller,
        descriptor: Option<&str>,
        params: &RecordReadParams,
    ) -> Result<RecordLookup, AppError> {
        if caller.user.is_none() && !caller.access.authorized {
            return self.retrieve_public(caller, descriptor, params).await;
        }

        let repo = UserRecordRepository::new(self.db);

        let Some(descriptor) = descriptor else {
            if !caller.may_list() {
                return Err(
                    AuthError::AccessDenied("Not authorized to list record identifiers".into())
                        .into(),
                );
            }

            tracing::debug!(
                "Convention {} retrieves descriptor catalog",
                caller.convention_id()
            );
            let descriptors = repo.list_descriptors(caller.convention_id()).await?;
            return Ok(RecordLookup::Descriptors(descriptors));
        };

        if params.list && caller.may_list() {
            let values = repo
                .all_by_descriptor(caller.convention_id(), descriptor)
                .await?;
            return Ok(RecordLookup::Values {
                values,
                with_metadata: params.all,
            });
        }

        let Some(owner) = self.owner(caller, params.owner_email.as_deref()).await? else {
            return Ok(RecordLookup::Record(None));
        };

        let record = repo
            .find(caller.convention_id(), owner.id, descriptor)
            .await?;

        Ok(RecordLookup::Record(record))
    }

    /// Reads a record marked public. Every miss answers as unauthenticated.
    async fn retrieve_public(
        &self,
        caller: &RecordCaller,
        descriptor: Option<&str>,
        params: &RecordReadParams,
    ) -> Result<RecordLookup, AppError> {
        let denied = || AppError::from(AuthError::UserNotInSession);

        let (Some(descriptor), Some(email)) = (descriptor, params.owner_email.as_deref()) else {
            tracing::debug!("Public record access without descriptor or user");
            return Err(denied());
        };

        let Some(owner) = UserRepository::new(self.db).find_by_email(email).await? else {
            tracing::info!("Public record access for unknown user {}", email);
            return Err(denied());
        };

        let record = UserRecordRepository::new(self.db)
            .find(caller.convention_id(), owner.id, descriptor)
            .await?;

        match record {
            Some(record) if record.is_public_readable() => {
                Ok(RecordLookup::Record(Some(record)))
            }
            Some(record) => {
                tracing::debug!("Public record access denied, record is {}", record.acl);
                Err(denied())
            }
            None => {
                tracing::info!("Public record access, no record {} found", descriptor);
                Err(denied())
            }
        }
    }

    /// Stores a new record for the owner.
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - Created record
    /// - `Err(AppError::BadRequest)` - No owner, or invalid ACL
    /// - `Err(AppError::Duplicate)` - Owner already has a record with this descriptor; the
    ///   unique index catches concurrent inserts
    pub async fn create(
        &self,
        caller: &RecordCaller,
        owner_email: Option<&str>,
        descriptor: String,
        content_type: String,
        data: String,
        acl: Option<&str>,
    ) -> Result<UserRecord, AppError> {
        let owner = self.require_owner(caller, owner_email).await?;
        let acl = match acl {
            Some(acl) => parse_acl(acl)?,
            None => RecordAcl::default(),
        };

        let repo = UserRecordRepository::new(self.db);
        if repo
            .find(caller.convention_id(), owner.id, &descriptor)
            .await?
            .is_some()
        {
            return Err(AppError::Duplicate(format!(
                "Record '{}' already exists",
                descriptor
            )));
        }

        let record = repo
            .create(CreateRecordParams {
                convention_id: caller.convention_id(),
                user_id: owner.id,
                descriptor,
                content_type,
                data,
                acl,
            })
            .await?;

        Ok(record)
    }

    /// Replaces a record's data and content type, and its ACL when one is given.
    pub async fn update(
        &self,
        caller: &RecordCaller,
        owner_email: Option<&str>,
        descriptor: &str,
        content_type: String,
        data: String,
        acl: Option<&str>,
    ) -> Result<UserRecord, AppError> {
        let owner = self.require_owner(caller, owner_email).await?;
        let acl = acl.map(parse_acl).transpose()?;

        let repo = UserRecordRepository::new(self.db);
        let record = repo
            .find(caller.convention_id(), owner.id, descriptor)
            .await?
            .ok_or_else(|| record_not_found(descriptor))?;

        Ok(repo
            .update(
                record.id,
                UpdateRecordParams {
                    content_type,
                    data,
                    acl,
                },
            )
            .await?)
    }

    pub async fn delete(
        &self,
        caller: &RecordCaller,
        owner_email: Option<&str>,
        descriptor: &str,
    ) -> Result<(), AppError> {
        let owner = self.require_owner(caller, owner_email).await?;

        let repo = UserRecordRepository::new(self.db);
        let record = repo
            .find(caller.convention_id(), owner.id, descriptor)
            .await?
            .ok_or_else(|| record_not_found(descriptor))?;

        repo.delete(record.id).await?;

        Ok(())
    }

    async fn require_owner(
        &self,
        caller: &RecordCaller,
        owner_email: Option<&str>,
    ) -> Result<User, AppError> {
        if caller.user.is_none() && !caller.access.authorized {
            return Err(AuthError::UserNotInSession.into());
        }

        self.owner(caller, owner_email)
            .await?
            .ok_or_else(|| AppError::BadRequest("No user specified for the record".to_string()))
    }
}

fn parse_acl(acl: &str) -> Result<RecordAcl, AppError> {
    acl.parse().map_err(AppError::BadRequest)
}

fn record_not_found(descriptor: &str) -> AppError {
    AppError::NotFound(format!("Record '{}' not found", descriptor))
}
