//! Persistence of classified error occurrences.
//!
//! The taxonomy only supplies the error code; storage itself belongs to an
//! [`OccurrenceRepository`] collaborator. [`InMemoryRepository`] is the default
//! backend for tests and ephemeral use, and [`ErrorStore`] layers the query
//! helpers (frequency, recency, category filtering) on top of any repository.
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::store::ErrorStore;
//!
//! # async fn example() -> agent_error_taxonomy::TaxonomyResult<()> {
//! let store = ErrorStore::in_memory();
//! let id = store.record_error(103, "agent-1", "model took too long").await?;
//! let occurrences = store.errors_by_agent("agent-1").await?;
//! assert_eq!(occurrences[0].id, id);
//! # Ok(())
//! # }
//! ```

use crate::core_types::{ErrorCategory, ErrorDefinition};
use crate::error::TaxonomyResult;
use crate::logging::{log_debug, log_info};
use crate::registry::ErrorRegistry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Upper bound on rows scanned by aggregate queries.
const SCAN_LIMIT: usize = 100_000;

/// A single recorded error occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOccurrence {
    /// Unique identifier (UUID v4)
    pub id: Uuid,
    /// Numeric error code from the taxonomy
    pub error_code: i64,
    /// When the error was observed (UTC)
    pub timestamp: DateTime<Utc>,
    /// Agent that produced the error
    pub agent_id: String,
    /// Free-form human-readable context
    pub context: String,
    /// Captured stack trace or backtrace text
    pub stack_trace: String,
}

impl ErrorOccurrence {
    /// New occurrence stamped now with a fresh id.
    pub fn new(error_code: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            error_code,
            timestamp: Utc::now(),
            agent_id: String::new(),
            context: String::new(),
            stack_trace: String::new(),
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = agent_id.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Override the observation time.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Storage backend for occurrences.
///
/// Implementations must be safe to share between tasks.
#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    /// Persist an occurrence, returning its id.
    async fn save(&self, occurrence: ErrorOccurrence) -> TaxonomyResult<Uuid>;

    async fn get(&self, id: Uuid) -> TaxonomyResult<Option<ErrorOccurrence>>;

    /// Delete by id; `true` if the record existed.
    async fn delete(&self, id: Uuid) -> TaxonomyResult<bool>;

    async fn find_by_agent(&self, agent_id: &str) -> TaxonomyResult<Vec<ErrorOccurrence>>;

    async fn find_by_code(&self, error_code: i64) -> TaxonomyResult<Vec<ErrorOccurrence>>;

    /// Page through occurrences in insertion order.
    async fn all(&self, limit: usize, offset: usize) -> TaxonomyResult<Vec<ErrorOccurrence>>;

    async fn count(&self) -> TaxonomyResult<usize>;
}

/// In-process repository keeping occurrences in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: RwLock<Vec<ErrorOccurrence>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OccurrenceRepository for InMemoryRepository {
    async fn save(&self, occurrence: ErrorOccurrence) -> TaxonomyResult<Uuid> {
        let id = occurrence.id;
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.id == id) {
            Some(existing) => *existing = occurrence,
            None => rows.push(occurrence),
        }
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> TaxonomyResult<Option<ErrorOccurrence>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> TaxonomyResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }

    async fn find_by_agent(&self, agent_id: &str) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.agent_id == agent_id)
            .cloned()
            .collect())
    }

    async fn find_by_code(&self, error_code: i64) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.error_code == error_code)
            .cloned()
            .collect())
    }

    async fn all(&self, limit: usize, offset: usize) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> TaxonomyResult<usize> {
        Ok(self.rows.read().await.len())
    }
}

/// Query façade over an [`OccurrenceRepository`].
#[derive(Clone)]
pub struct ErrorStore {
    repository: Arc<dyn OccurrenceRepository>,
}

impl std::fmt::Debug for ErrorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorStore").finish_non_exhaustive()
    }
}

impl ErrorStore {
    /// Store backed by `repository`.
    pub fn new(repository: Arc<dyn OccurrenceRepository>) -> Self {
        Self { repository }
    }

    /// Store backed by a fresh [`InMemoryRepository`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }

    /// Direct access to the underlying repository.
    pub fn repository(&self) -> &Arc<dyn OccurrenceRepository> {
        &self.repository
    }

    /// Persist a fully built occurrence.
    pub async fn record(&self, occurrence: ErrorOccurrence) -> TaxonomyResult<Uuid> {
        let error_code = occurrence.error_code;
        let id = self.repository.save(occurrence).await?;
        log_info!(
            occurrence_id = %id,
            error_code = error_code,
            "Error occurrence recorded"
        );
        Ok(id)
    }

    /// Persist a new occurrence for `error_code`, stamped now.
    pub async fn record_error(
        &self,
        error_code: i64,
        agent_id: &str,
        context: &str,
    ) -> TaxonomyResult<Uuid> {
        self.record(
            ErrorOccurrence::new(error_code)
                .with_agent(agent_id)
                .with_context(context),
        )
        .await
    }

    /// Persist an occurrence of an already classified definition.
    pub async fn record_agent_error(
        &self,
        definition: &ErrorDefinition,
        agent_id: &str,
        context: &str,
        stack_trace: &str,
    ) -> TaxonomyResult<Uuid> {
        self.record(
            ErrorOccurrence::new(definition.code())
                .with_agent(agent_id)
                .with_context(context)
                .with_stack_trace(stack_trace),
        )
        .await
    }

    pub async fn delete_occurrence(&self, id: Uuid) -> TaxonomyResult<bool> {
        let deleted = self.repository.delete(id).await?;
        log_debug!(occurrence_id = %id, deleted = deleted, "Delete occurrence");
        Ok(deleted)
    }

    pub async fn get_occurrence(&self, id: Uuid) -> TaxonomyResult<Option<ErrorOccurrence>> {
        self.repository.get(id).await
    }

    pub async fn errors_by_agent(&self, agent_id: &str) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        self.repository.find_by_agent(agent_id).await
    }

    pub async fn errors_by_code(&self, error_code: i64) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        self.repository.find_by_code(error_code).await
    }

    /// Occurrence count per code, ordered by code.
    pub async fn error_frequency(&self) -> TaxonomyResult<BTreeMap<i64, usize>> {
        let occurrences = self.repository.all(SCAN_LIMIT, 0).await?;
        let mut frequency = BTreeMap::new();
        for occurrence in occurrences {
            *frequency.entry(occurrence.error_code).or_insert(0) += 1;
        }
        Ok(frequency)
    }

    /// The `limit` most recent occurrences, newest first.
    pub async fn recent_errors(&self, limit: usize) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        let mut occurrences = self.repository.all(SCAN_LIMIT, 0).await?;
        occurrences.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        occurrences.truncate(limit);
        Ok(occurrences)
    }

    /// Occurrences whose code belongs to `category` in `registry`
    /// (the built-in registry when `None`).
    pub async fn errors_by_category(
        &self,
        category: ErrorCategory,
        registry: Option<&ErrorRegistry>,
    ) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        let registry = registry.unwrap_or_else(|| ErrorRegistry::builtin());
        let category_codes: HashSet<i64> = registry
            .by_category(category)
            .into_iter()
            .map(ErrorDefinition::code)
            .collect();

        let occurrences = self.repository.all(SCAN_LIMIT, 0).await?;
        Ok(occurrences
            .into_iter()
            .filter(|occurrence| category_codes.contains(&occurrence.error_code))
            .collect())
    }

    pub async fn total_count(&self) -> TaxonomyResult<usize> {
        self.repository.count().await
    }

    /// Paginated occurrences in repository order.
    pub async fn all_occurrences(
        &self,
        limit: usize,
        offset: usize,
    ) -> TaxonomyResult<Vec<ErrorOccurrence>> {
        self.repository.all(limit, offset).await
    }
}
