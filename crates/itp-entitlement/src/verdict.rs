//! # Entitlement Verdict
//!
//! Wire form: `{"entitled": true, "schemaUrl": ..., "href": ...}` or
//! `{"entitled": false}`. An entitled verdict always carries both fields,
//! so the credential builder never sees a half-filled one.

use serde::{Deserialize, Serialize};

/// The outcome of evaluating one claim against one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "VerdictWire", try_from = "VerdictWire")]
pub enum EntitlementVerdict {
    Entitled {
        /// Credential schema to attach; varies by deployment network.
        schema_url: String,
        /// Evidence URI for the credential subject.
        href: String,
    },
    NotEntitled,
}

impl EntitlementVerdict {
    pub fn entitled(schema_url: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Entitled {
            schema_url: schema_url.into(),
            href: href.into(),
        }
    }

    pub fn is_entitled(&self) -> bool {
        matches!(self, Self::Entitled { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct VerdictWire {
    entitled: bool,
    #[serde(rename = "schemaUrl", default, skip_serializing_if = "Option::is_none")]
    schema_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
}

impl From<EntitlementVerdict> for VerdictWire {
    fn from(v: EntitlementVerdict) -> Self {
        match v {
            EntitlementVerdict::Entitled { schema_url, href } => Self {
                entitled: true,
                schema_url: Some(schema_url),
                href: Some(href),
            },
            EntitlementVerdict::NotEntitled => Self {
                entitled: false,
                schema_url: None,
                href: None,
            },
        }
    }
}

impl TryFrom<VerdictWire> for EntitlementVerdict {
    type Error = String;

    fn try_from(w: VerdictWire) -> Result<Self, Self::Error> {
        if !w.entitled {
            return Ok(Self::NotEntitled);
        }
        match (w.schema_url, w.href) {
            (Some(schema_url), Some(href)) => Ok(Self::Entitled { schema_url, href }),
            _ => Err("an entitled verdict requires schemaUrl and href".to_string()),
        }
    }
}
