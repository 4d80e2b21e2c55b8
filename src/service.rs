//! Async service wrapper around the built-in registry and classifier.
//!
//! [`AsyncErrorRegistry`] counts requests and failures, reports health, and
//! (with the `events` feature) publishes an event for every lookup and
//! classification. The registry itself is immutable, so starting and stopping
//! only toggle the optional background health check and event emission.

use crate::classifier::classify_fault;
use crate::config::ServiceConfig;
use crate::core_types::{ErrorCategory, ErrorDefinition, Fault};
use crate::error::TaxonomyResult;
use crate::logging::{log_debug, log_info, log_warn};
use crate::registry::{errors_by_category, lookup_error, ErrorRegistry};
use crate::response::{build_response, ErrorResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[cfg(feature = "events")]
use crate::core_types::BusinessEvent;
#[cfg(feature = "events")]
use std::sync::Arc;
#[cfg(feature = "events")]
use crate::integration::{
    classified_event, lookup_failed_event, looked_up_event, BroadcastEventSink, EventSink,
};

/// Lifecycle state of an [`AsyncErrorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Running,
}

/// Async facade over the built-in taxonomy.
///
/// Every operation works whether or not the service is running; `start` and
/// `stop` only manage the background health check. Events are published
/// when `emit_events` is set and an event sink is attached.
pub struct AsyncErrorRegistry {
    config: ServiceConfig,
    state: Mutex<ServiceState>,
    health_task: Mutex<Option<JoinHandle<()>>>,
    request_count: AtomicU64,
    error_count: AtomicU64,
    #[cfg(feature = "events")]
    sink: Mutex<Option<Arc<dyn EventSink>>>,
}

impl std::fmt::Debug for AsyncErrorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncErrorRegistry")
            .field("config", &self.config)
            .field("request_count", &self.request_count())
            .field("error_count", &self.error_count())
            .finish_non_exhaustive()
    }
}

impl Default for AsyncErrorRegistry {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl AsyncErrorRegistry {
    /// Service using `config`. With the `events` feature a
    /// [`BroadcastEventSink`] is attached by default.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ServiceState::Stopped),
            health_task: Mutex::new(None),
            request_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            #[cfg(feature = "events")]
            sink: Mutex::new(Some(Arc::new(BroadcastEventSink::default()))),
        }
    }

    /// Validate `config` before building the service.
    pub fn try_new(config: ServiceConfig) -> TaxonomyResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Service configured from the environment, see [`ServiceConfig::from_env`].
    pub fn from_env() -> TaxonomyResult<Self> {
        Ok(Self::new(ServiceConfig::from_env()?))
    }

    /// Replace the event sink.
    #[cfg(feature = "events")]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        *self.sink.get_mut() = Some(sink);
        self
    }

    /// The attached sink, if any.
    #[cfg(feature = "events")]
    pub async fn sink(&self) -> Option<Arc<dyn EventSink>> {
        self.sink.lock().await.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub async fn state(&self) -> ServiceState {
        *self.state.lock().await
    }

    /// Start the service. Starting a running service is a no-op.
    pub async fn start(&self) -> TaxonomyResult<()> {
        let mut state = self.state.lock().await;
        if *state == ServiceState::Running {
            return Ok(());
        }
        self.config.validate()?;

        if !self.config.health_check_interval.is_zero() {
            let interval = self.config.health_check_interval;
            let name = self.config.name.clone();
            let handle = tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    ticker.tick().await;
                    let healthy = !ErrorRegistry::builtin().is_empty();
                    if healthy {
                        log_debug!(service = %name, "Health check passed");
                    } else {
                        log_warn!(service = %name, "Health check failed: registry is empty");
                    }
                }
            });
            *self.health_task.lock().await = Some(handle);
        }

        *state = ServiceState::Running;
        log_info!(
            service = %self.config.name,
            registry_size = self.registry_size(),
            "Error registry service started"
        );
        Ok(())
    }

    /// Stop the service, cancelling the health check and detaching the
    /// event sink. Stopping a stopped service is a no-op.
    pub async fn stop(&self) -> TaxonomyResult<()> {
        let mut state = self.state.lock().await;
        if *state == ServiceState::Stopped {
            return Ok(());
        }

        if let Some(handle) = self.health_task.lock().await.take() {
            handle.abort();
        }
        #[cfg(feature = "events")]
        {
            *self.sink.lock().await = None;
        }

        *state = ServiceState::Stopped;
        log_info!(
            service = %self.config.name,
            requests = self.request_count(),
            errors = self.error_count(),
            "Error registry service stopped"
        );
        Ok(())
    }

    /// `true` while the built-in registry holds at least one definition.
    pub async fn health_check(&self) -> bool {
        !ErrorRegistry::builtin().is_empty()
    }

    /// Resolve `code`, publishing `error.looked_up` or `error.lookup_failed`.
    pub async fn lookup_error(&self, code: i64) -> TaxonomyResult<&'static ErrorDefinition> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        match lookup_error(code) {
            Ok(definition) => {
                #[cfg(feature = "events")]
                self.emit(looked_up_event(definition, "")).await;
                Ok(definition)
            }
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                #[cfg(feature = "events")]
                self.emit(lookup_failed_event(code)).await;
                Err(e)
            }
        }
    }

    /// Classify `fault`, publishing `error.classified`.
    pub async fn classify(&self, fault: &Fault) -> &'static ErrorDefinition {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let definition = classify_fault(fault);
        #[cfg(feature = "events")]
        self.emit(classified_event(definition, "", "")).await;
        definition
    }

    /// Classify an arbitrary error value, see [`Fault::from_error`].
    pub async fn classify_error(
        &self,
        error: &(dyn std::error::Error + Send + Sync + 'static),
    ) -> &'static ErrorDefinition {
        self.classify(&Fault::from_error(error)).await
    }

    pub async fn errors_by_category(&self, category: ErrorCategory) -> Vec<&'static ErrorDefinition> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        errors_by_category(category)
    }

    pub async fn create_error_response(
        &self,
        definition: &ErrorDefinition,
        details: Option<&str>,
    ) -> ErrorResponse {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        build_response(definition, details)
    }

    /// Every built-in definition ordered by code.
    pub async fn list_all_errors(&self) -> Vec<&'static ErrorDefinition> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        ErrorRegistry::builtin().all()
    }

    /// Not counted as a request.
    pub fn registry_size(&self) -> usize {
        ErrorRegistry::builtin().len()
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Publish best-effort; delivery failures are logged, never returned.
    #[cfg(feature = "events")]
    async fn emit(&self, event: BusinessEvent) {
        if !self.config.emit_events {
            return;
        }
        let Some(sink) = self.sink().await else {
            return;
        };
        let event = BusinessEvent {
            source: self.config.name.clone(),
            ..event
        };
        let event_type = event.event_type.clone();
        if let Err(e) = sink.publish(event).await {
            log_warn!(
                event_type = %event_type,
                error = %e,
                "Dropping taxonomy event"
            );
        }
    }
}

impl Drop for AsyncErrorRegistry {
    fn drop(&mut self) {
        if let Some(handle) = self.health_task.get_mut().take() {
            handle.abort();
        }
    }
}

/// Run `f` against a started service and stop it afterwards, whatever `f`
/// returned.
pub async fn with_running_service<F, Fut, T>(service: &AsyncErrorRegistry, f: F) -> TaxonomyResult<T>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = TaxonomyResult<T>>,
{
    service.start().await?;
    let result = f().await;
    service.stop().await?;
    result
}

