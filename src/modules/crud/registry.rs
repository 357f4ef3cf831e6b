//! Table-keyed dispatch onto [`CrudHandler`]s.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ecam_core::{ServiceError, ServiceResult};
use ecam_models::CountResponse;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::metrics::track_crud_dispatch;
use crate::modules::crud::handler::CrudHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOperation {
    List,
    Search,
    GetById,
    Count,
    Create,
    Update,
    Delete,
}

impl CrudOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrudOperation::List => "list",
            CrudOperation::Search => "search",
            CrudOperation::GetById => "get_by_id",
            CrudOperation::Count => "count",
            CrudOperation::Create => "create",
            CrudOperation::Update => "update",
            CrudOperation::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrudRequest {
    pub table: String,
    pub operation: CrudOperation,
    pub id: Option<i64>,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl CrudRequest {
    pub fn new(table: impl Into<String>, operation: CrudOperation) -> Self {
        Self {
            table: table.into(),
            operation,
            id: None,
            query: None,
            body: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrudOutcome {
    Items(Vec<Value>),
    Item(Value),
    Count(CountResponse),
    Created(Value),
    Deleted,
}

/// Handlers by lowercase table name. Built once at startup and read-only
/// afterwards.
#[derive(Default, Clone)]
pub struct CrudRegistry {
    handlers: HashMap<String, Arc<dyn CrudHandler>>,
}

impl fmt::Debug for CrudRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudRegistry")
            .field("tables", &self.tables())
            .finish()
    }
}

impl CrudRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn CrudHandler>) {
        self.handlers
            .insert(handler.table().to_lowercase(), handler);
    }

    pub fn with_handler(mut self, handler: Arc<dyn CrudHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn handler(&self, table: &str) -> Option<&Arc<dyn CrudHandler>> {
        self.handlers.get(&table.trim().to_lowercase())
    }

    /// Registered table names, sorted.
    pub fn tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tables.sort_unstable();
        tables
    }

    /// Runs `request` against the handler for its table.
    ///
    /// An unregistered table is a `NotFound` error. A `List` with a
    /// non-blank query is answered by `search`.
    #[instrument(skip(self, request), fields(table = %request.table, operation = ?request.operation))]
    pub async fn dispatch(&self, request: CrudRequest) -> ServiceResult<CrudOutcome> {
        let handler = self.handler(&request.table).ok_or_else(|| {
            ServiceError::not_found(format!("Unknown table '{}'", request.table))
        })?;

        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let operation = match (request.operation, query) {
            (CrudOperation::List, Some(_)) => CrudOperation::Search,
            (operation, _) => operation,
        };

        let require_id = || {
            request
                .id
                .ok_or_else(|| ServiceError::validation("id is required"))
        };
        let require_body = || {
            request
                .body
                .clone()
                .ok_or_else(|| ServiceError::validation("Request body is required"))
        };

        debug!(operation = operation.as_str(), "Dispatching CRUD request");
        track_crud_dispatch(handler.table(), operation.as_str());

        let outcome = match operation {
            CrudOperation::List => CrudOutcome::Items(handler.list().await?),
            CrudOperation::Search => {
                CrudOutcome::Items(handler.search(query.unwrap_or_default()).await?)
            }
            CrudOperation::GetById => CrudOutcome::Item(handler.get_by_id(require_id()?).await?),
            CrudOperation::Count => CrudOutcome::Count(handler.count().await?),
            CrudOperation::Create => CrudOutcome::Created(handler.create(require_body()?).await?),
            CrudOperation::Update => {
                CrudOutcome::Item(handler.update(require_id()?, require_body()?).await?)
            }
            CrudOperation::Delete => {
                handler.delete(require_id()?).await?;
                CrudOutcome::Deleted
            }
        };

        Ok(outcome)
    }
}
