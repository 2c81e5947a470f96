use tracing::{info, warn};

use crate::models::{Period, SummaryStat};
use crate::services::llm_service::LlmService;

/// Returned when the provider answers with nothing usable.
pub const EMPTY_INSIGHT: &str = "Unable to generate insights at this time.";
/// Returned when the provider is disabled or the call fails.
pub const UNAVAILABLE_INSIGHT: &str = "AI Insights currently unavailable. Please check your connection.";

/// Generate a short analyst-style summary of the given performance table.
///
/// Never fails: any provider error collapses into a fixed placeholder string.
pub async fn generate_market_insight(
    llm_service: &LlmService,
    summary: &[SummaryStat],
    period: Period,
) -> String {
    if summary.is_empty() {
        return EMPTY_INSIGHT.to_string();
    }

    info!("Generating market insight for {} instruments (period: {})", summary.len(), period.code());

    let prompt = build_insight_prompt(summary, period);

    match llm_service.generate_completion(prompt).await {
        Ok(text) if text.trim().is_empty() => {
            warn!("LLM returned an empty insight");
            EMPTY_INSIGHT.to_string()
        }
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("AI insight error: {}", e);
            UNAVAILABLE_INSIGHT.to_string()
        }
    }
}

fn build_insight_prompt(summary: &[SummaryStat], period: Period) -> String {
    let context = summary
        .iter()
        .map(|s| format!("{} ({}): {}% change", s.name, s.symbol, s.percent_change))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Act as a senior financial analyst. Based on the following market performance of US indices \
         and sectors over the last {}: {}.\n\
         Provide a concise, professional 3-sentence summary of which areas are leading, which are lagging, \
         and a brief hypothetical macro reason why (e.g. interest rates, earnings, or rotation).",
        period.label(),
        context
    )
}
