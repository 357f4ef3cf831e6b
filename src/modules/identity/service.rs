use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use ecam_core::{
    PasswordHasher, ServiceError, ServiceResult,
    validation::{require_valid_email, require_valid_password},
};
use ecam_models::{IdentityId, Person, PersonCreate, PersonUpdate};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::{debug, instrument};

use crate::utils::db::unique_violation_target;

const PERSON_COLUMNS: &str = "id, first_name, last_name, email, password, created_at";

/// Creates, reads and updates [`Person`] records.
///
/// Emails are unique across all persons regardless of role, compared without
/// regard to case. Password secrets are produced by the configured
/// [`PasswordHasher`] and never leave this type except inside a `Person`.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    hasher: Arc<dyn PasswordHasher>,
}

fn clean_name(name: Option<&str>) -> Option<String> {
    name.map(|n| n.trim().to_string())
}

fn map_person_write_error(err: sqlx::Error, email: &str, context: &'static str) -> ServiceError {
    match unique_violation_target(&err).as_deref() {
        Some("persons.email") => ServiceError::duplicate_email(email),
        _ => ServiceError::Storage(anyhow::Error::new(err).context(context)),
    }
}

impl IdentityStore {
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    /// Creates a person in its own write transaction.
    #[instrument(skip(self, db, input), fields(email = %input.email))]
    pub async fn create(&self, db: &SqlitePool, input: PersonCreate) -> ServiceResult<Person> {
        let mut tx = ecam_db::begin_immediate(db)
            .await
            .context("Failed to begin transaction")?;
        let person = self.create_in(&mut tx, input).await?;
        tx.commit().await.context("Failed to commit person")?;
        Ok(person)
    }

    /// Creates a person on a connection that is already inside a write
    /// transaction. The caller commits.
    pub async fn create_in(
        &self,
        conn: &mut SqliteConnection,
        input: PersonCreate,
    ) -> ServiceResult<Person> {
        let email = require_valid_email(&input.email)?;
        require_valid_password(&input.password)?;

        if Self::exists_by_email(&mut *conn, &email).await? {
            return Err(ServiceError::duplicate_email(&email));
        }

        let secret = self.hasher.hash(&input.password)?;

        let sql = format!(
            "INSERT INTO persons (first_name, last_name, email, password, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {PERSON_COLUMNS}"
        );
        let person = sqlx::query_as::<_, Person>(&sql)
            .bind(clean_name(input.first_name.as_deref()).unwrap_or_default())
            .bind(clean_name(input.last_name.as_deref()).unwrap_or_default())
            .bind(&email)
            .bind(&secret)
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_person_write_error(e, &email, "Failed to insert person"))?;

        debug!(identity_id = %person.id, "Person created");
        Ok(person)
    }

    /// Applies `changes` to a person on a connection inside a write
    /// transaction. A changed email must stay unique and a new password is
    /// re-hashed.
    pub async fn update_in(
        &self,
        conn: &mut SqliteConnection,
        id: IdentityId,
        changes: PersonUpdate,
    ) -> ServiceResult<Person> {
        let email = match changes.email.as_deref() {
            Some(raw) => {
                let email = require_valid_email(raw)?;
                let taken: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM persons WHERE email = ? AND id <> ?)",
                )
                .bind(&email)
                .bind(id)
                .fetch_one(&mut *conn)
                .await
                .context("Failed to check email availability")?;
                if taken {
                    return Err(ServiceError::duplicate_email(&email));
                }
                Some(email)
            }
            None => None,
        };

        let secret = match changes.password.as_deref() {
            Some(password) => {
                require_valid_password(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let sql = format!(
            "UPDATE persons SET \
               first_name = COALESCE(?, first_name), \
               last_name = COALESCE(?, last_name), \
               email = COALESCE(?, email), \
               password = COALESCE(?, password) \
             WHERE id = ? RETURNING {PERSON_COLUMNS}"
        );
        let lookup_email = email.clone().unwrap_or_default();
        sqlx::query_as::<_, Person>(&sql)
            .bind(clean_name(changes.first_name.as_deref()))
            .bind(clean_name(changes.last_name.as_deref()))
            .bind(email)
            .bind(secret)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_person_write_error(e, &lookup_email, "Failed to update person"))?
            .ok_or_else(|| ServiceError::not_found("Person not found"))
    }

    /// Checks an email/password pair. Unknown emails and wrong passwords get
    /// the same error.
    #[instrument(skip(self, db, password))]
    pub async fn verify_credentials(
        &self,
        db: &SqlitePool,
        email: &str,
        password: &str,
    ) -> ServiceResult<Person> {
        let invalid = || ServiceError::unauthorized("Invalid email or password");

        let person = Self::find_by_email(db, email.trim())
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify(password, &person.password_secret)? {
            return Err(invalid());
        }

        Ok(person)
    }

    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> ServiceResult<Option<Person>>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {PERSON_COLUMNS} FROM persons WHERE email = ?");
        let person = sqlx::query_as::<_, Person>(&sql)
            .bind(email.trim())
            .fetch_optional(executor)
            .await
            .context("Failed to fetch person by email")?;
        Ok(person)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: IdentityId) -> ServiceResult<Option<Person>>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?");
        let person = sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .context("Failed to fetch person by ID")?;
        Ok(person)
    }

    pub async fn all<'e, E>(executor: E) -> ServiceResult<Vec<Person>>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {PERSON_COLUMNS} FROM persons ORDER BY id");
        let persons = sqlx::query_as::<_, Person>(&sql)
            .fetch_all(executor)
            .await
            .context("Failed to fetch persons")?;
        Ok(persons)
    }

    pub async fn count<'e, E>(executor: E) -> ServiceResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(executor)
            .await
            .context("Failed to count persons")?;
        Ok(count)
    }

    pub async fn exists_by_email<'e, E>(executor: E, email: &str) -> ServiceResult<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM persons WHERE email = ?)")
            .bind(email.trim())
            .fetch_one(executor)
            .await
            .context("Failed to check email existence")?;
        Ok(exists)
    }

    /// Deletes a person. Every role row that references it goes with it.
    #[instrument(skip(db))]
    pub async fn delete(db: &SqlitePool, id: IdentityId) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete person")?;
        Ok(result.rows_affected() > 0)
    }
}
