use anyhow::Context;
use async_trait::async_trait;
use ecam_core::{ServiceError, ServiceResult};
use ecam_models::CountResponse;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::modules::roles::{RoleEntity, RoleService};
use crate::validator::validate_value;

/// The seven operations every registered table answers.
///
/// Each operation stands alone; none relies on another having run first.
#[async_trait]
pub trait CrudHandler: Send + Sync {
    /// Lowercase table name this handler is registered under.
    fn table(&self) -> &'static str;

    async fn list(&self) -> ServiceResult<Vec<Value>>;

    async fn search(&self, query: &str) -> ServiceResult<Vec<Value>>;

    /// Fails with `NotFound` for an unknown id.
    async fn get_by_id(&self, id: i64) -> ServiceResult<Value>;

    async fn count(&self) -> ServiceResult<CountResponse>;

    async fn create(&self, body: Value) -> ServiceResult<Value>;

    async fn update(&self, id: i64, body: Value) -> ServiceResult<Value>;

    /// Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> ServiceResult<()>;
}

fn to_value<T: Serialize>(item: &T) -> ServiceResult<Value> {
    Ok(serde_json::to_value(item).context("Failed to serialize record")?)
}

fn to_values<T: Serialize>(items: &[T]) -> ServiceResult<Vec<Value>> {
    items.iter().map(to_value).collect()
}

/// Serves a role table through its [`RoleService`].
#[derive(Debug, Clone)]
pub struct RoleCrudHandler<R: RoleEntity> {
    db: SqlitePool,
    service: RoleService<R>,
}

impl<R: RoleEntity> RoleCrudHandler<R> {
    pub fn new(db: SqlitePool, service: RoleService<R>) -> Self {
        Self { db, service }
    }

    fn not_found() -> ServiceError {
        ServiceError::not_found(format!("{} not found", R::LABEL))
    }
}

#[async_trait]
impl<R: RoleEntity> CrudHandler for RoleCrudHandler<R> {
    fn table(&self) -> &'static str {
        R::TABLE
    }

    async fn list(&self) -> ServiceResult<Vec<Value>> {
        to_values(&self.service.get_all(&self.db).await?)
    }

    async fn search(&self, query: &str) -> ServiceResult<Vec<Value>> {
        to_values(&self.service.search(&self.db, query).await?)
    }

    async fn get_by_id(&self, id: i64) -> ServiceResult<Value> {
        let item = self
            .service
            .get_by_id(&self.db, R::Id::from(id))
            .await?
            .ok_or_else(Self::not_found)?;
        to_value(&item)
    }

    async fn count(&self) -> ServiceResult<CountResponse> {
        let count = self.service.count(&self.db).await?;
        Ok(CountResponse { count })
    }

    async fn create(&self, body: Value) -> ServiceResult<Value> {
        let dto: R::Create = validate_value(body)?;
        to_value(&self.service.create_from_dto(&self.db, &dto).await?)
    }

    async fn update(&self, id: i64, body: Value) -> ServiceResult<Value> {
        let dto: R::Update = validate_value(body)?;
        to_value(&self.service.update(&self.db, R::Id::from(id), &dto).await?)
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.service.delete(&self.db, R::Id::from(id)).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }
}
