use crate::dto::field::{present, FieldValue};
use crate::model::agent::Agent;
use serde::{Deserialize, Serialize};

/// Body of POST /record and PATCH /record/{id}. A key sent as `null` is kept
/// as a value and counts as 0 for the numeric fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentPayload {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub region: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub fee: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub sales: Option<FieldValue>,
}

/// An agent as returned to clients, with the identifier as a hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponseDto {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: String,
    pub region: String,
    pub rating: f64,
    pub fee: f64,
    pub sales: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Agent> for AgentResponseDto {
    fn from(agent: Agent) -> Self {
        AgentResponseDto {
            id: agent.id.map(|id| id.to_hex()),
            name: agent.name,
            region: agent.region,
            rating: agent.rating,
            fee: agent.fee,
            sales: agent.sales,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}
