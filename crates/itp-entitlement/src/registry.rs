//! # Entitlement Registry
//!
//! Exact-match map from attribute-set-type to rule. Populated before the
//! server starts; read-only afterwards. A lookup miss is terminal: there is
//! no default rule.

use std::collections::HashMap;
use std::sync::Arc;

use itp_core::AttributeSetType;

use crate::error::RegistryError;
use crate::rule::{
    EntitlementRule, OrderDetailsRule, ONDC_PROOF_OF_PURCHASE, ONDC_PROOF_OF_PURCHASE_TESTNET,
};

/// Rules indexed by attribute-set-type.
#[derive(Clone, Default)]
pub struct EntitlementRegistry {
    rules: HashMap<AttributeSetType, Arc<dyn EntitlementRule>>,
}

impl EntitlementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ONDC proof-of-purchase rules for the production and test
    /// networks.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(
            AttributeSetType::new(ONDC_PROOF_OF_PURCHASE),
            OrderDetailsRule::ondc_proof_of_purchase(),
        )?;
        registry.register(
            AttributeSetType::new(ONDC_PROOF_OF_PURCHASE_TESTNET),
            OrderDetailsRule::ondc_proof_of_purchase_testnet(),
        )?;
        Ok(registry)
    }

    /// Register `rule` under `attribute_set_type`.
    ///
    /// Rejects an identifier that is already registered or whose ticket type
    /// is empty (`dsnp://1#`).
    pub fn register(
        &mut self,
        attribute_set_type: AttributeSetType,
        rule: impl EntitlementRule + 'static,
    ) -> Result<(), RegistryError> {
        if attribute_set_type.ticket_type().is_empty() {
            return Err(RegistryError::EmptyTicketType(attribute_set_type));
        }
        if self.rules.contains_key(&attribute_set_type) {
            return Err(RegistryError::Duplicate(attribute_set_type));
        }
        tracing::debug!(
            attribute_set_type = %attribute_set_type,
            rule = rule.name(),
            "registered entitlement rule"
        );
        self.rules.insert(attribute_set_type, Arc::new(rule));
        Ok(())
    }

    /// The rule registered under exactly `attribute_set_type`.
    pub fn lookup(
        &self,
        attribute_set_type: &AttributeSetType,
    ) -> Result<&dyn EntitlementRule, RegistryError> {
        self.rules
            .get(attribute_set_type)
            .map(|rule| rule.as_ref())
            .ok_or_else(|| RegistryError::NotFound(attribute_set_type.clone()))
    }

    /// All registered identifiers, sorted.
    pub fn registered_types(&self) -> Vec<&AttributeSetType> {
        let mut types: Vec<_> = self.rules.keys().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for EntitlementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}
