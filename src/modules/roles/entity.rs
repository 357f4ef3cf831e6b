use std::fmt;

use async_trait::async_trait;
use ecam_auth::Role;
use ecam_core::ServiceResult;
use ecam_models::{IdentityId, PersonCreate, PersonUpdate, SelfServiceUpdate};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{FromRow, SqliteConnection, sqlite::SqliteRow};
use validator::Validate;

/// A role table that hangs off `persons`.
///
/// Implementors describe their table and their role-specific columns; the
/// shared identity handling, transactions and queries live in
/// [`RoleService`](super::service::RoleService).
#[async_trait]
pub trait RoleEntity: fmt::Debug + Default + Clone + Send + Sync + 'static {
    type Id: Copy
        + From<i64>
        + Into<i64>
        + fmt::Display
        + fmt::Debug
        + Serialize
        + Send
        + Sync
        + 'static;
    /// Row of the role table joined with its person.
    type Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;
    type Dto: Serialize + From<Self::Record> + Send + Sync + 'static;
    type Create: DeserializeOwned + Validate + fmt::Debug + Send + Sync + 'static;
    type Update: DeserializeOwned
        + Validate
        + SelfServiceUpdate
        + Default
        + fmt::Debug
        + Send
        + Sync
        + 'static;

    const ROLE: Role;
    const TABLE: &'static str;
    const LABEL: &'static str;
    /// Columns of the role table selected besides `id` and `person_id`.
    const EXTRA_COLUMNS: &'static [&'static str];

    fn identity_create(dto: &Self::Create) -> PersonCreate;

    fn identity_update(dto: &Self::Update) -> PersonUpdate;

    /// Inserts the role row for an identity created in the same transaction.
    async fn create_for_identity(
        &self,
        conn: &mut SqliteConnection,
        identity_id: IdentityId,
        dto: &Self::Create,
    ) -> ServiceResult<Self::Id>;

    /// Writes the role-specific fields present in `dto`.
    async fn apply_role_update(
        &self,
        _conn: &mut SqliteConnection,
        _id: Self::Id,
        _dto: &Self::Update,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

/// `SELECT` over a role table joined with `persons`, without a `WHERE`.
pub fn select_sql<R: RoleEntity>() -> String {
    let mut columns =
        String::from("r.id, r.person_id, p.first_name, p.last_name, p.email, p.created_at");
    for column in R::EXTRA_COLUMNS {
        columns.push_str(", r.");
        columns.push_str(column);
    }
    format!(
        "SELECT {columns} FROM {table} r JOIN persons p ON p.id = r.person_id",
        table = R::TABLE
    )
}
