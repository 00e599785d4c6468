//! Offline embedding build job: knowledge base -> vector store snapshot.
//!
//! One embedding call per fact, two per expense-ratio entry (direct and
//! regular are separate retrieval targets). Facts are planned in
//! deterministic knowledge-base order first, then embedded with bounded
//! concurrency; `generate_batch` preserves input order, so insertion
//! order (and with it tie-break stability) is reproducible across builds.

use tracing::info;

use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::knowledge::FactType;
use crate::knowledge::KnowledgeBase;
use crate::store::FactRecord;
use crate::store::PlanKind;
use crate::store::VectorStore;

/// Lay out every fact in the knowledge base as a record with its
/// canonical embedded text, in deterministic order.
pub fn plan_records(knowledge: &KnowledgeBase) -> Vec<FactRecord> {
    let mut records = Vec::new();

    for (scheme, facts) in &knowledge.schemes {
        if let Some(ratio) = &facts.expense_ratio {
            records.push(FactRecord {
                scheme: Some(scheme.clone()),
                fact_type: FactType::ExpenseRatio,
                fact_sub_type: Some(PlanKind::Direct),
                platform: None,
                description: None,
                value: Some(ratio.direct.clone()),
                source_url: ratio.source_url.clone(),
                text: format!("{scheme} expense ratio direct plan is {}", ratio.direct),
            });
            records.push(FactRecord {
                scheme: Some(scheme.clone()),
                fact_type: FactType::ExpenseRatio,
                fact_sub_type: Some(PlanKind::Regular),
                platform: None,
                description: None,
                value: Some(ratio.regular.clone()),
                source_url: ratio.source_url.clone(),
                text: format!("{scheme} expense ratio regular plan is {}", ratio.regular),
            });
        }

        for (fact_type, fact) in facts.simple_facts() {
            records.push(FactRecord {
                scheme: Some(scheme.clone()),
                fact_type,
                fact_sub_type: None,
                platform: None,
                description: None,
                value: Some(fact.value.clone()),
                source_url: fact.source_url.clone(),
                text: format!("{scheme} {} is {}", fact_type.label(), fact.value),
            });
        }
    }

    for (platform, info) in &knowledge.statement_download {
        records.push(FactRecord {
            scheme: None,
            fact_type: FactType::StatementDownload,
            fact_sub_type: None,
            platform: Some(platform.clone()),
            description: Some(info.description.clone()),
            value: None,
            source_url: info.source_url.clone(),
            text: format!(
                "How to download statements from {platform}: {}",
                info.description
            ),
        });
    }

    records
}

/// Embed every knowledge base fact and assemble the vector store
pub async fn build_store(
    knowledge: &KnowledgeBase,
    client: &EmbeddingClient,
    concurrency: usize,
) -> Result<VectorStore> {
    let records = plan_records(knowledge);
    info!("Embedding {} knowledge base facts", records.len());

    let texts: Vec<&str> = records.iter().map(|record| record.text.as_str()).collect();
    let vectors = client.generate_batch(texts, concurrency).await?;

    let mut store = VectorStore::new();
    for (vector, record) in vectors.into_iter().zip(records) {
        store.add(vector, record);
    }

    Ok(store)
}
