use anyhow::Context;
use ecam_core::{ServiceError, ServiceResult};
use ecam_models::IdentityId;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, instrument};

use crate::metrics::track_identity_created;
use crate::modules::identity::IdentityStore;
use crate::modules::roles::entity::{RoleEntity, select_sql};
use crate::utils::db::escape_like;

/// CRUD over one role table, keeping the backing identity in step.
///
/// Creation and updates run in a single `BEGIN IMMEDIATE` transaction
/// spanning both the `persons` row and the role row.
#[derive(Debug, Clone)]
pub struct RoleService<R: RoleEntity> {
    entity: R,
    identities: IdentityStore,
}

impl<R: RoleEntity> RoleService<R> {
    pub fn new(entity: R, identities: IdentityStore) -> Self {
        Self { entity, identities }
    }

    pub fn identities(&self) -> &IdentityStore {
        &self.identities
    }

    async fn fetch_record(
        conn: &mut SqliteConnection,
        id: R::Id,
    ) -> ServiceResult<Option<R::Record>> {
        let sql = format!("{} WHERE r.id = ?", select_sql::<R>());
        let record = sqlx::query_as::<_, R::Record>(&sql)
            .bind(Into::<i64>::into(id))
            .fetch_optional(&mut *conn)
            .await
            .with_context(|| format!("Failed to fetch {} by ID", R::ROLE))?;
        Ok(record)
    }

    /// Creates the identity and the role row together.
    ///
    /// Identity validation and duplicate email errors come back unchanged;
    /// nothing is persisted when any step fails.
    #[instrument(skip(self, db, dto), fields(role = %R::ROLE))]
    pub async fn create_from_dto(&self, db: &SqlitePool, dto: &R::Create) -> ServiceResult<R::Dto> {
        let mut tx = ecam_db::begin_immediate(db)
            .await
            .context("Failed to begin transaction")?;

        let person = self
            .identities
            .create_in(&mut tx, R::identity_create(dto))
            .await?;
        let id = self.attach(&mut tx, person.id, dto).await?;
        let record = Self::fetch_record(&mut tx, id).await?.ok_or_else(|| {
            ServiceError::Storage(anyhow::anyhow!("{} {} missing after insert", R::LABEL, id))
        })?;

        tx.commit()
            .await
            .with_context(|| format!("Failed to commit {} creation", R::ROLE))?;

        track_identity_created(R::ROLE);
        info!(id = %id, identity_id = %person.id, "{} created", R::LABEL);

        Ok(record.into())
    }

    /// Inserts the role row, refusing a second row of this role for the
    /// same identity.
    async fn attach(
        &self,
        conn: &mut SqliteConnection,
        identity_id: IdentityId,
        dto: &R::Create,
    ) -> ServiceResult<R::Id> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE person_id = ?)",
            R::TABLE
        );
        let already: bool = sqlx::query_scalar(&sql)
            .bind(identity_id)
            .fetch_one(&mut *conn)
            .await
            .context("Failed to check existing role row")?;

        if already {
            return Err(ServiceError::validation(format!(
                "Identity {} already has a {} record",
                identity_id,
                R::ROLE
            )));
        }

        self.entity
            .create_for_identity(conn, identity_id, dto)
            .await
    }

    #[instrument(skip(self, db), fields(role = %R::ROLE))]
    pub async fn get_all(&self, db: &SqlitePool) -> ServiceResult<Vec<R::Dto>> {
        let sql = format!("{} ORDER BY r.id", select_sql::<R>());
        let records = sqlx::query_as::<_, R::Record>(&sql)
            .fetch_all(db)
            .await
            .with_context(|| format!("Failed to fetch {}", R::TABLE))?;

        Ok(records.into_iter().map(R::Dto::from).collect())
    }

    #[instrument(skip(self, db), fields(role = %R::ROLE))]
    pub async fn get_by_id(&self, db: &SqlitePool, id: R::Id) -> ServiceResult<Option<R::Dto>> {
        let mut conn = db.acquire().await.context("Failed to acquire connection")?;
        Ok(Self::fetch_record(&mut conn, id).await?.map(R::Dto::from))
    }

    /// The role row belonging to an identity, used by `/me`.
    #[instrument(skip(self, db), fields(role = %R::ROLE))]
    pub async fn get_by_identity(
        &self,
        db: &SqlitePool,
        identity_id: IdentityId,
    ) -> ServiceResult<Option<R::Dto>> {
        let sql = format!("{} WHERE r.person_id = ?", select_sql::<R>());
        let record = sqlx::query_as::<_, R::Record>(&sql)
            .bind(identity_id)
            .fetch_optional(db)
            .await
            .with_context(|| format!("Failed to fetch {} by identity", R::ROLE))?;

        Ok(record.map(R::Dto::from))
    }

    pub async fn find_id_by_identity(
        &self,
        db: &SqlitePool,
        identity_id: IdentityId,
    ) -> ServiceResult<Option<R::Id>> {
        let sql = format!("SELECT id FROM {} WHERE person_id = ?", R::TABLE);
        let id: Option<i64> = sqlx::query_scalar(&sql)
            .bind(identity_id)
            .fetch_optional(db)
            .await
            .with_context(|| format!("Failed to fetch {} id by identity", R::ROLE))?;

        Ok(id.map(R::Id::from))
    }

    /// Case-insensitive substring match on email, first name and last name.
    #[instrument(skip(self, db), fields(role = %R::ROLE))]
    pub async fn search(&self, db: &SqlitePool, query: &str) -> ServiceResult<Vec<R::Dto>> {
        let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));
        let sql = format!(
            r"{} WHERE lower(p.email) LIKE ?1 ESCAPE '\'
                 OR lower(p.first_name) LIKE ?1 ESCAPE '\'
                 OR lower(p.last_name) LIKE ?1 ESCAPE '\'
               ORDER BY r.id",
            select_sql::<R>()
        );

        let records = sqlx::query_as::<_, R::Record>(&sql)
            .bind(pattern)
            .fetch_all(db)
            .await
            .with_context(|| format!("Failed to search {}", R::TABLE))?;

        Ok(records.into_iter().map(R::Dto::from).collect())
    }

    pub async fn count(&self, db: &SqlitePool) -> ServiceResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(db)
            .await
            .with_context(|| format!("Failed to count {}", R::TABLE))?;
        Ok(count)
    }

    pub async fn exists_by_email(&self, db: &SqlitePool, email: &str) -> ServiceResult<bool> {
        IdentityStore::exists_by_email(db, email).await
    }

    /// Applies the fields present in `dto` to the identity and the role row.
    #[instrument(skip(self, db, dto), fields(role = %R::ROLE))]
    pub async fn update(
        &self,
        db: &SqlitePool,
        id: R::Id,
        dto: &R::Update,
    ) -> ServiceResult<R::Dto> {
        let mut tx = ecam_db::begin_immediate(db)
            .await
            .context("Failed to begin transaction")?;

        let sql = format!("SELECT person_id FROM {} WHERE id = ?", R::TABLE);
        let identity_id: IdentityId = sqlx::query_scalar(&sql)
            .bind(Into::<i64>::into(id))
            .fetch_optional(&mut *tx)
            .await
            .with_context(|| format!("Failed to fetch {}", R::ROLE))?
            .ok_or_else(|| ServiceError::not_found(format!("{} not found", R::LABEL)))?;

        let person_update = R::identity_update(dto);
        if !person_update.is_empty() {
            self.identities
                .update_in(&mut tx, identity_id, person_update)
                .await?;
        }

        self.entity.apply_role_update(&mut tx, id, dto).await?;

        let record = Self::fetch_record(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("{} not found", R::LABEL)))?;

        tx.commit()
            .await
            .with_context(|| format!("Failed to commit {} update", R::ROLE))?;

        Ok(record.into())
    }

    /// Deletes the role row only. The identity stays.
    #[instrument(skip(self, db), fields(role = %R::ROLE))]
    pub async fn delete(&self, db: &SqlitePool, id: R::Id) -> ServiceResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql)
            .bind(Into::<i64>::into(id))
            .execute(db)
            .await
            .with_context(|| format!("Failed to delete {}", R::ROLE))?;

        Ok(result.rows_affected() > 0)
    }
}
