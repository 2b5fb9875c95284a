//! # punk-accounting
//!
//! Token and cost accounting over a transcript.
//!
//! [`TokenRates`] holds the per-token prices for the active model;
//! [`UsageStats`] aggregates input/output token totals and monetary cost over
//! the full message sequence. Aggregation is always recomputed from scratch —
//! the only cached state is the per-message `tokens` field the estimator
//! filled in when the message was created.
//!
//! ## External interactions
//!
//! - **Display**: the CLI renders [`UsageStats`] totals and
//!   [`format_cost`] output after each exchange and in the export metadata.

use punk_core::{Message, Role};
use serde::{Deserialize, Serialize};

/// Per-token pricing for one model. Exactly one value is active at a time;
/// switching models swaps in a whole new pair, never a half-updated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRates {
    /// Monetary cost per input token.
    pub input_price: f64,
    /// Monetary cost per output token.
    pub output_price: f64,
    /// The model identifier the rates apply to.
    pub model: String,
}

impl TokenRates {
    /// Returns the rate pair for a model name.
    ///
    /// Unrecognized names fall back to the gemini-2.0-flash pair — and, like
    /// the fallback pricing, the recorded model name is the fallback model's.
    /// This is the explicit default case, not an error.
    pub fn for_model(model: &str) -> Self {
        match model {
            "gpt-3.5-turbo" => Self {
                // $0.5 / $1.5 per 1M tokens
                input_price: 0.0005 / 1000.0,
                output_price: 0.0015 / 1000.0,
                model: "gpt-3.5-turbo".to_string(),
            },
            _ => Self {
                // $0.1 / $0.4 per 1M tokens; also the default pair
                input_price: 0.1 / 1_000_000.0,
                output_price: 0.4 / 1_000_000.0,
                model: "gemini-2.0-flash".to_string(),
            },
        }
    }
}

impl Default for TokenRates {
    fn default() -> Self {
        Self::for_model("gemini-2.0-flash")
    }
}

/// Aggregated token totals and costs for a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsageStats {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub input_cost: f64,
    pub output_cost: f64,
}

impl UsageStats {
    /// Computes usage over the full ordered message sequence.
    ///
    /// `user` messages count toward input, `assistant` messages toward
    /// output; `system`-role transcript messages are ignored. The system
    /// prompt is not stored as a message, so its token estimate is passed in
    /// separately and counted once per computation at the input rate.
    /// Messages without a token estimate contribute 0.
    pub fn compute(messages: &[Message], rates: &TokenRates, system_prompt_tokens: u32) -> Self {
        let mut stats = UsageStats {
            input_tokens: u64::from(system_prompt_tokens),
            output_tokens: 0,
            input_cost: f64::from(system_prompt_tokens) * rates.input_price,
            output_cost: 0.0,
        };
        for message in messages {
            let tokens = message.tokens.unwrap_or(0);
            match message.role {
                Role::User => {
                    stats.input_tokens += u64::from(tokens);
                    stats.input_cost += f64::from(tokens) * rates.input_price;
                }
                Role::Assistant => {
                    stats.output_tokens += u64::from(tokens);
                    stats.output_cost += f64::from(tokens) * rates.output_price;
                }
                Role::System => {}
            }
        }
        stats
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    pub fn total_cost(&self) -> f64 {
        self.input_cost + self.output_cost
    }
}

/// Formats a cost for display with exactly 6 digits after the decimal point.
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.6}")
}
