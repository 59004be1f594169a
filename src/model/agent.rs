use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A sales agent listing as stored in the `records` collection.
///
/// `id` and `created_at` are skipped when unset, so a sanitized agent can be
/// used directly as a `$set` update without touching either field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub region: String,
    pub rating: f64,
    pub fee: f64,
    pub sales: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
