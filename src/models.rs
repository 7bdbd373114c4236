//! Frontend Models
//!
//! Data structures matching the CRM API entities.

use serde::{Deserialize, Serialize};

/// Lead record (matches API). Many leads reference exactly one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Monetary value of the deal
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub note: Option<String>,
    /// Where this lead came from (ad campaign, referral, ...)
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub stage_id: u32,
}

/// Pipeline stage (kanban column).
///
/// `count` is derived client-side from the leads actually loaded; the
/// server-supplied value is never trusted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: u32,
    pub name: String,
    /// Ordinal position, ascending left to right
    pub position: i32,
    #[serde(default)]
    pub count: u32,
}

/// Authenticated user summary, refreshed on every successful verify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u32,
    pub name: String,
    pub email: String,
}

/// Persisted session: the API token and the user it belongs to.
/// Always stored and cleared as one unit, never half-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub api_token: String,
    pub user: SessionUser,
}

/// Lead list filters sent to the API as query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilters {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub assigned_sales: Option<String>,
    pub search: Option<String>,
}

impl LeadFilters {
    /// Query-parameter pairs for the leads endpoint, skipping empty filters.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.date_from {
            pairs.push(("date_from", v.clone()));
        }
        if let Some(v) = &self.date_to {
            pairs.push(("date_to", v.clone()));
        }
        if let Some(v) = &self.assigned_sales {
            pairs.push(("assigned_sales", v.clone()));
        }
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        pairs
    }
}

/// Partial lead update, sent by the explicit save action.
/// Only set fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.company.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.value.is_none()
            && self.note.is_none()
            && self.source.is_none()
    }

    /// Merge set fields into a lead, leaving unset fields alone.
    pub fn apply_to(&self, lead: &mut Lead) {
        if let Some(v) = &self.name {
            lead.name = v.clone();
        }
        if let Some(v) = &self.company {
            lead.company = Some(v.clone());
        }
        if let Some(v) = &self.email {
            lead.email = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            lead.phone = Some(v.clone());
        }
        if let Some(v) = self.value {
            lead.value = v;
        }
        if let Some(v) = &self.note {
            lead.note = Some(v.clone());
        }
        if let Some(v) = &self.source {
            lead.source = Some(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut lead = Lead {
            id: 1,
            name: "Acme deal".to_string(),
            company: Some("Acme".to_string()),
            email: None,
            phone: None,
            value: 100.0,
            note: None,
            source: Some("referral".to_string()),
            created_at: None,
            updated_at: None,
            stage_id: 1,
        };

        let patch = LeadPatch {
            note: Some("called twice".to_string()),
            value: Some(250.0),
            ..Default::default()
        };
        patch.apply_to(&mut lead);

        assert_eq!(lead.note.as_deref(), Some("called twice"));
        assert_eq!(lead.value, 250.0);
        // Untouched fields survive
        assert_eq!(lead.name, "Acme deal");
        assert_eq!(lead.source.as_deref(), Some("referral"));
    }

    #[test]
    fn test_patch_skips_unset_fields_on_wire() {
        let patch = LeadPatch {
            note: Some("hi".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"note":"hi"}"#);
    }

    #[test]
    fn test_filters_to_query_pairs() {
        let filters = LeadFilters {
            date_from: Some("2024-01-01".to_string()),
            search: Some("acme".to_string()),
            ..Default::default()
        };
        let pairs = filters.to_query_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("date_from", "2024-01-01".to_string()));
        assert_eq!(pairs[1], ("search", "acme".to_string()));
    }

    #[test]
    fn test_stage_count_defaults_to_zero() {
        let stage: Stage = serde_json::from_str(r#"{"id":3,"name":"Won","position":5}"#).unwrap();
        assert_eq!(stage.count, 0);
    }
}
