//! Performance advisor: turns a store scorecard into one short coaching
//! paragraph via the configured LLM provider.
//!
//! The advisor is strictly best-effort: when no provider is configured, or
//! the single attempt fails, the caller gets `None` and the dashboard
//! renders without an insight.

use std::sync::Arc;

use contracts::dashboards::d100_scorecard::StoreScorecard;
use once_cell::sync::OnceCell;

use crate::shared::config::Config;
use crate::shared::llm::{ChatMessage, LlmProvider, OpenAiProvider};

static ADVISOR: OnceCell<Option<Arc<dyn LlmProvider>>> = OnceCell::new();

/// Build the advisor from the `[llm]` config section. Called once at
/// startup; an absent section disables insights for the whole process.
pub fn initialize_advisor(config: &Config) {
    let provider: Option<Arc<dyn LlmProvider>> = match &config.llm {
        Some(llm) => {
            let provider = match &llm.api_endpoint {
                Some(endpoint) => OpenAiProvider::new_with_endpoint(
                    endpoint.clone(),
                    llm.api_key.clone(),
                    llm.model.clone(),
                    llm.temperature,
                    llm.max_tokens,
                ),
                None => OpenAiProvider::new(
                    llm.api_key.clone(),
                    llm.model.clone(),
                    llm.temperature,
                    llm.max_tokens,
                ),
            };
            tracing::info!("Advisor enabled: {} / {}", provider.provider_name(), llm.model);
            Some(Arc::new(provider))
        }
        None => {
            tracing::info!("No [llm] section in config, advisor disabled");
            None
        }
    };

    if ADVISOR.set(provider).is_err() {
        tracing::warn!("Advisor already initialized");
    }
}

/// Generate an insight for one scorecard. Single attempt, no retry.
pub async fn generate(card: &StoreScorecard) -> Option<String> {
    let provider = ADVISOR.get().and_then(|p| p.as_ref())?;

    let messages = vec![
        ChatMessage::system(SYSTEM_PROMPT.to_string()),
        ChatMessage::user(render_snapshot(card)),
    ];

    match provider.chat_completion(messages).await {
        Ok(response) => {
            let text = response.content.trim().to_string();
            if text.is_empty() {
                tracing::warn!("Advisor returned an empty completion for {}", card.code);
                None
            } else {
                tracing::info!(
                    "Advisor insight for {} ({} tokens)",
                    card.code,
                    response.tokens_used.unwrap_or(0)
                );
                Some(text)
            }
        }
        Err(e) => {
            tracing::warn!("Advisor call failed for {}: {}", card.code, e);
            None
        }
    }
}

const SYSTEM_PROMPT: &str = "Você é um consultor de varejo experiente. \
Analise o desempenho da loja e escreva um parágrafo curto (3 a 4 frases), \
em português, com uma recomendação prática para o gerente. Seja direto e \
específico, sem saudações nem listas.";

/// Render the scorecard as the user prompt: header lines plus one line
/// per KPI with target, actual and completion percentage.
fn render_snapshot(card: &StoreScorecard) -> String {
    let mut lines = Vec::with_capacity(card.kpis.len() + 3);
    lines.push(format!("Loja: {} ({})", card.fantasia, card.code));
    lines.push(format!("Gerente: {}", card.manager));
    lines.push(format!(
        "Desempenho geral: {}% (nível {})",
        card.performance, card.tier_name
    ));
    for kpi in &card.kpis {
        lines.push(format!(
            "- {} [{}]: meta {} {}, realizado {} {} ({}%)",
            kpi.name,
            kpi.category.display_name(),
            kpi.target,
            kpi.unit,
            kpi.actual,
            kpi.unit,
            kpi.display_pct
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_scorecard::service::build_scorecard;
    use contracts::domain::a001_store::aggregate::Store;

    #[test]
    fn snapshot_lists_every_kpi_with_its_completion() {
        let mut store = Store::new_for_insert(
            "LOJA-1".into(),
            "Loja Centro".into(),
            "Centro Comércio LTDA".into(),
            "Ana Souza".into(),
        );
        store.kpis[0].actual = store.kpis[0].target / 2.0;
        let card = build_scorecard(&store).unwrap();

        let prompt = render_snapshot(&card);
        assert!(prompt.contains("Loja: Loja Centro (LOJA-1)"));
        assert!(prompt.contains("Gerente: Ana Souza"));
        for kpi in &card.kpis {
            assert!(prompt.contains(&kpi.name));
        }
        assert!(prompt.contains("(50%)"));
        assert_eq!(prompt.lines().count(), 3 + card.kpis.len());
    }
}
