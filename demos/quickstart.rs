//! Quickstart: classify a failure, report it, record it and ask for advice.
//!
//! Run with `cargo run --example quickstart`.

use agent_error_taxonomy::store::ErrorStore;
use agent_error_taxonomy::suggestions::RecoverySuggester;
use agent_error_taxonomy::{
    build_response, classify_error, lookup_error, AgentFailure, AsyncErrorRegistry, ErrorCategory,
    Fault, FaultKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A tool call failed because the upstream API timed out
    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "search API took 30s");
    let definition = classify_error(&failure);
    println!(
        "classified as [{}] {} (retryable: {})",
        definition.code(),
        definition.name(),
        definition.retryable()
    );

    let response = build_response(definition, Some("search tool"));
    println!("{}", serde_json::to_string_pretty(&response.to_json())?);

    // Wrapped failures propagate with `?`
    let wrapped = AgentFailure::with_details(lookup_error(201)?.clone(), "crm_lookup");
    println!("{wrapped}");

    let store = ErrorStore::in_memory();
    store
        .record_agent_error(definition, "agent-7", "search tool", "")
        .await?;
    println!("recorded: {:?}", store.error_frequency().await?);

    let suggestion = RecoverySuggester::default()
        .suggest(definition.code(), "search tool", "agent-7")
        .await;
    println!("suggestion ({}): {}", suggestion.confidence, suggestion.suggestion);
    for step in &suggestion.steps {
        println!("  - {step}");
    }

    let service = AsyncErrorRegistry::from_env()?;
    service.start().await?;
    let oom = service.classify(&Fault::of(FaultKind::OutOfMemory)).await;
    let security = service.errors_by_category(ErrorCategory::Security).await;
    println!(
        "service: {} -> {}, {} security codes, {} requests",
        FaultKind::OutOfMemory,
        oom.name(),
        security.len(),
        service.request_count()
    );
    service.stop().await?;

    Ok(())
}
