//! Narrated expense breakdown
//!
//! Produces the lines handed to a speech synthesizer: an intro, one line per
//! category, and a closing total. The currency label is used verbatim.

use crate::models::BudgetState;
use crate::services::summary::{category_totals, total_expenses};

/// Intro line used when settings don't override it
pub const DEFAULT_INTRO: &str = "Here's the breakdown of your expenses:";

/// Build the narration lines for a state
///
/// Categories appear in name order. An empty ledger yields the intro and a
/// zero total.
pub fn narrate(state: &BudgetState, intro: &str) -> Vec<String> {
    let currency = state.currency;
    let totals = category_totals(&state.ledger);

    let mut lines = Vec::with_capacity(totals.len() + 2);
    lines.push(intro.to_string());
    lines.extend(totals.iter().map(|(category, amount)| {
        format!(
            "For {}, you spent {}",
            category,
            amount.format_labeled(currency)
        )
    }));
    lines.push(format!(
        "Your total expenses are {}",
        total_expenses(&state.ledger).format_labeled(currency)
    ));

    lines
}

/// Join narration lines into the single text block a synthesizer takes
pub fn narration_text(lines: &[String]) -> String {
    lines.join("\n")
}
