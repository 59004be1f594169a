use crate::dto::agent_dto::AgentPayload;
use crate::dto::field::number_of;
use crate::model::agent::Agent;
use crate::schema::{check_text, now, trimmed_text, ValidationResult};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const REGION_MIN_LEN: usize = 2;
pub const REGION_MAX_LEN: usize = 50;
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

/// Checks every business field of an agent. All failures are collected.
pub fn validate_agent(payload: &AgentPayload) -> ValidationResult {
    let mut errors = Vec::new();

    check_text(&mut errors, "Name", payload.name.as_ref(), NAME_MIN_LEN, NAME_MAX_LEN);
    check_text(&mut errors, "Region", payload.region.as_ref(), REGION_MIN_LEN, REGION_MAX_LEN);

    // NaN fails both comparisons, so it has to be checked on its own.
    let rating = number_of(payload.rating.as_ref());
    if rating.is_nan() || rating < RATING_MIN || rating > RATING_MAX {
        errors.push("Rating must be a number between 1 and 5".to_string());
    }

    let fee = number_of(payload.fee.as_ref());
    if fee.is_nan() || fee < 0.0 {
        errors.push("Fee must be a positive number".to_string());
    }

    let sales = number_of(payload.sales.as_ref());
    if sales.is_nan() || sales < 0.0 {
        errors.push("Sales must be a positive number".to_string());
    }

    ValidationResult::from_errors(errors)
}

fn number_or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Normalizes an agent for storage and stamps `updated_at`.
///
/// Does not validate: a fee of `"abc"` silently becomes 0. Run [`validate_agent`] first.
pub fn sanitize_agent(payload: &AgentPayload) -> Agent {
    Agent {
        id: None,
        name: trimmed_text(payload.name.as_ref()),
        region: trimmed_text(payload.region.as_ref()),
        rating: number_or_zero(number_of(payload.rating.as_ref())),
        fee: number_or_zero(number_of(payload.fee.as_ref())),
        sales: number_or_zero(number_of(payload.sales.as_ref())),
        created_at: None,
        updated_at: Some(now()),
    }
}

/// A new agent document with both timestamps set
pub fn create_agent_document(payload: &AgentPayload) -> Agent {
    let mut agent = sanitize_agent(payload);
    let timestamp = now();
    agent.created_at = Some(timestamp.clone());
    agent.updated_at = Some(timestamp);
    agent
}
