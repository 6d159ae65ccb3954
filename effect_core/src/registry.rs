//! ModifierRegistry - the process-wide catalog of effect variants
//!
//! Built once at startup by [`crate::catalog::standard_catalog`] (or by a
//! host registering its own variants), then read-only. Registration order
//! determines ids, so it must be deterministic; the registry is not meant
//! to be mutated once combat resolution has begun.

use crate::modifier::{Modifier, ModifierDef, ModifierId, ModifierRecord, ModifierSpec};
use crate::types::Rarity;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Registry failure: bad variant definitions at registration time, or
/// unknown identities at lookup time
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate modifier name: {0}")]
    DuplicateName(String),
    #[error("modifier '{name}' has non-positive scaling {scaling}")]
    InvalidScaling { name: String, scaling: f64 },
    #[error("unknown modifier id: {0}")]
    UnknownId(ModifierId),
    #[error("unknown modifier name: {0}")]
    UnknownName(String),
}

/// Catalog of every registered effect variant, indexed by id, by display
/// name and by rarity tier
#[derive(Debug, Default)]
pub struct ModifierRegistry {
    specs: Vec<Arc<ModifierSpec>>,
    by_name: HashMap<String, ModifierId>,
    by_rarity: HashMap<Rarity, Vec<Arc<ModifierSpec>>>,
}

impl ModifierRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one variant. Ids are assigned sequentially in call order.
    /// Fails fast on configuration errors: a duplicate display name or a
    /// scaling divisor that would break generation.
    pub fn register(&mut self, def: ModifierDef) -> Result<Arc<ModifierSpec>, RegistryError> {
        if def.scaling <= 0.0 {
            return Err(RegistryError::InvalidScaling {
                name: def.name,
                scaling: def.scaling,
            });
        }
        if self.by_name.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }

        let id = ModifierId(self.specs.len() as u32);
        let spec = Arc::new(ModifierSpec::from_def(def, id));
        self.by_name.insert(spec.name().to_string(), id);
        if let Some(rarity) = spec.rarity() {
            self.by_rarity
                .entry(rarity)
                .or_default()
                .push(Arc::clone(&spec));
        }
        self.specs.push(Arc::clone(&spec));
        Ok(spec)
    }

    /// Look up a variant descriptor by id
    pub fn spec(&self, id: ModifierId) -> Result<&Arc<ModifierSpec>, RegistryError> {
        self.specs
            .get(id.0 as usize)
            .ok_or(RegistryError::UnknownId(id))
    }

    /// Look up a variant descriptor by display name
    pub fn spec_by_name(&self, name: &str) -> Result<&Arc<ModifierSpec>, RegistryError> {
        let id = self
            .by_name
            .get(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        self.spec(*id)
    }

    /// Build a fresh permanent instance of a variant by id
    pub fn get(&self, id: ModifierId, strength: i32) -> Result<Modifier, RegistryError> {
        Ok(Modifier::permanent(self.spec(id)?, strength))
    }

    /// Build a fresh permanent instance of a variant by display name
    pub fn get_by_name(&self, name: &str, strength: i32) -> Result<Modifier, RegistryError> {
        Ok(Modifier::permanent(self.spec_by_name(name)?, strength))
    }

    /// Procedurally generate an instance of a variant for a level
    pub fn generate(&self, id: ModifierId, level: u32) -> Result<Modifier, RegistryError> {
        Ok(Modifier::generate(self.spec(id)?, level))
    }

    /// Rebuild an instance from a persisted record
    pub fn hydrate(&self, record: &ModifierRecord) -> Result<Modifier, RegistryError> {
        self.get(record.id, record.strength)
    }

    /// Variants of one rarity tier, in registration order. Internal
    /// sub-effects appear in no tier.
    pub fn by_rarity(&self, rarity: Rarity) -> &[Arc<ModifierSpec>] {
        self.by_rarity.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick one variant of a tier uniformly at random. Returns `None` for
    /// an empty tier. Weighted selection policy belongs to the caller.
    pub fn random_by_rarity<R: Rng>(
        &self,
        rarity: Rarity,
        rng: &mut R,
    ) -> Option<&Arc<ModifierSpec>> {
        let tier = self.by_rarity(rarity);
        if tier.is_empty() {
            return None;
        }
        Some(&tier[rng.gen_range(0..tier.len())])
    }

    /// All registered variants, in registration order
    pub fn all(&self) -> &[Arc<ModifierSpec>] {
        &self.specs
    }

    /// Number of registered variants
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Behavior;
    use crate::types::Phase;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn def(name: &str, rarity: Option<Rarity>) -> ModifierDef {
        ModifierDef::new(
            name,
            "test effect {str}",
            rarity,
            Phase::PreAttack,
            Behavior::Berserk,
        )
        .with_scaling(2.0)
    }

    #[test]
    fn test_sequential_ids() {
        let mut reg = ModifierRegistry::new();
        let a = reg.register(def("A", Some(Rarity::Common))).unwrap();
        let b = reg.register(def("B", Some(Rarity::Rare))).unwrap();
        assert_eq!(a.id(), ModifierId(0));
        assert_eq!(b.id(), ModifierId(1));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = ModifierRegistry::new();
        reg.register(def("A", Some(Rarity::Common))).unwrap();
        let err = reg.register(def("A", Some(Rarity::Rare))).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(_)));
    }

    #[test]
    fn test_zero_scaling_rejected() {
        let mut reg = ModifierRegistry::new();
        let bad = def("A", Some(Rarity::Common)).with_scaling(0.0);
        let err = reg.register(bad).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidScaling { .. }));
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let mut reg = ModifierRegistry::new();
        reg.register(def("Frenzy", Some(Rarity::Common))).unwrap();

        let by_id = reg.get(ModifierId(0), 5).unwrap();
        let by_name = reg.get_by_name("Frenzy", 5).unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id.strength, 5);

        assert!(matches!(
            reg.get(ModifierId(9), 1),
            Err(RegistryError::UnknownId(_))
        ));
        assert!(matches!(
            reg.get_by_name("Fury", 1),
            Err(RegistryError::UnknownName(_))
        ));
    }

    #[test]
    fn test_rarity_listing_excludes_internal() {
        let mut reg = ModifierRegistry::new();
        reg.register(def("A", Some(Rarity::Common))).unwrap();
        reg.register(def("B", None)).unwrap();
        reg.register(def("C", Some(Rarity::Common))).unwrap();

        let commons = reg.by_rarity(Rarity::Common);
        assert_eq!(commons.len(), 2);
        assert_eq!(commons[0].name(), "A");
        assert_eq!(commons[1].name(), "C");
        assert!(reg.by_rarity(Rarity::Legendary).is_empty());
    }

    #[test]
    fn test_random_pick_stays_in_tier() {
        let mut reg = ModifierRegistry::new();
        reg.register(def("A", Some(Rarity::Common))).unwrap();
        reg.register(def("B", Some(Rarity::Rare))).unwrap();
        reg.register(def("C", Some(Rarity::Rare))).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let pick = reg.random_by_rarity(Rarity::Rare, &mut rng).unwrap();
            assert_eq!(pick.rarity(), Some(Rarity::Rare));
        }
        assert!(reg.random_by_rarity(Rarity::Legendary, &mut rng).is_none());
    }

    #[test]
    fn test_hydrate_round_trip() {
        let mut reg = ModifierRegistry::new();
        reg.register(def("A", Some(Rarity::Common))).unwrap();

        let original = reg.generate(ModifierId(0), 8).unwrap();
        let record = original.record();
        let json = serde_json::to_string(&record).unwrap();
        let back: crate::modifier::ModifierRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reg.hydrate(&back).unwrap(), original);
    }
}
