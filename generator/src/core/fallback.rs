//! Deterministic replies used when no provider answers

use shared::{Workshop, WorkshopStatus};

/// Canned assistant reply built from the workshop's current state
pub fn chat_reply(workshop: &Workshop, message: &str) -> String {
    let step = match workshop.status {
        WorkshopStatus::Draft => "start by importing the ResearchApp or CognitionTwo reports",
        WorkshopStatus::InProgress if workshop.use_cases.is_empty() => "reconcile the imported use cases",
        WorkshopStatus::InProgress if workshop.pending_challenges() > 0 => "resolve the pending challenges",
        WorkshopStatus::InProgress if workshop.validation_summary.is_none() => "validate the benefit estimates",
        WorkshopStatus::InProgress => "review the prioritization on the decision dashboard",
        WorkshopStatus::Completed => "share the final recommendations",
    };

    let topic = message.trim();
    let topic = if topic.chars().count() > 80 {
        format!("{}...", topic.chars().take(80).collect::<String>())
    } else {
        topic.to_string()
    };

    format!(
        "The assistant is running without a language model, so it cannot answer \"{topic}\" directly. \
{} currently has {} use case(s) and {} pending challenge(s); the suggested next step is to {step}.",
        workshop.company_name,
        workshop.use_cases.len(),
        workshop.pending_challenges(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_workshop_points_at_import() {
        let workshop = Workshop::new("Acme".into(), "Retail".into(), "Lee".into());
        let reply = chat_reply(&workshop, "What next?");
        assert!(reply.contains("importing"));
        assert!(reply.contains("Acme currently has 0 use case(s)"));
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let workshop = Workshop::new("Acme".into(), "Retail".into(), "Lee".into());
        let reply = chat_reply(&workshop, &"x".repeat(500));
        assert!(reply.contains(&format!("{}...", "x".repeat(80))));
        assert!(!reply.contains(&"x".repeat(81)));
    }
}
