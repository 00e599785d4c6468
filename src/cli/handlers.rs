//! CLI command handlers

use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::api;
use crate::config::AppConfig;
use crate::embeddings::build_store;
use crate::embeddings::EmbeddingClient;
use crate::knowledge::KnowledgeBase;
use crate::rag::FaqService;
use crate::FundRagError;
use crate::Result;

/// Interactive read-eval loop: prompt, answer, repeat until "exit"
pub async fn handle_chat(config: &AppConfig) -> Result<()> {
    let service = FaqService::from_config(config)?;

    println!("Mutual Fund FAQ Assistant");
    println!("=========================");
    println!("I can answer factual questions about:");
    println!("- Expense ratio");
    println!("- Exit load");
    println!("- Minimum SIP");
    println!("- Minimum lump sum");
    println!("- Lock-in (for ELSS)");
    println!("- Riskometer");
    println!("- Benchmark");
    println!("- How to download statements");
    println!("\nI cannot provide investment advice, recommendations, or comparisons.");
    println!("Type \"exit\" to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("Your question: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if question.is_empty() {
            continue;
        }

        let result = service.answer(question).await;
        println!("\nAnswer: {}", result.answer);
        if let Some(url) = &result.source_url {
            println!("Source: {url}");
        }
        println!();
    }

    Ok(())
}

/// Start the HTTP server, applying any host/port overrides
pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = Arc::new(FaqService::from_config(&config)?);
    api::serve_api(&config, service).await
}

/// Build the embeddings snapshot from the knowledge base (offline job)
pub async fn handle_build(config: &AppConfig, concurrency: usize, force: bool) -> Result<()> {
    let snapshot_path = config.snapshot_path();
    if Path::new(snapshot_path).exists() && !force {
        return Err(FundRagError::Config(format!(
            "Snapshot {snapshot_path} already exists; pass --force to rebuild"
        )));
    }

    if !config.embeddings_configured() {
        return Err(FundRagError::Config(
            "No embedding provider configured; set [embeddings] in config.toml \
             (and GOOGLE_API_KEY for Gemini)"
                .to_string(),
        ));
    }

    let knowledge = KnowledgeBase::from_file(config.knowledge_base_path())?;
    let client = EmbeddingClient::from_config(config)?;

    info!("Building embeddings from {}", config.knowledge_base_path());
    let store = build_store(&knowledge, &client, concurrency).await?;
    store.save(snapshot_path)?;

    println!("Generated {} embeddings", store.len());
    println!("Vector store saved to {snapshot_path}");
    Ok(())
}

/// Print the effective configuration with the API key masked
pub fn handle_config(config: &AppConfig) -> Result<()> {
    let mut display = config.clone();
    if !display.embeddings.api_key.is_empty() {
        display.embeddings.api_key = "***".to_string();
    }

    let rendered = toml::to_string_pretty(&display)
        .map_err(|e| FundRagError::Config(format!("Failed to render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}
