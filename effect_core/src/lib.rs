//! effect_core - Combat effect and modifier engine
//!
//! This library provides:
//! - ModifierRegistry: The catalog of effect variants and their ids
//! - Modifier: Live effect instances with strength and duration
//! - Damage: The eight-category damage value effects transform
//! - Phase dispatch: Running every relevant modifier at a combat moment
//!
//! The host game owns the combat loop and the entities; entities take part
//! by implementing [`CombatActor`], and the loop calls the dispatch
//! functions at each phase of an exchange.

pub mod actor;
pub mod catalog;
pub mod context;
pub mod damage;
pub mod dispatch;
pub mod modifier;
pub mod registry;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export core types for convenience
pub use actor::{CombatActor, CombatLog};
pub use catalog::standard_catalog;
pub use context::ModifierContext;
pub use damage::{Damage, DamageCategory};
pub use dispatch::{apply_damage_phase, fold_value, run_actor_phase};
pub use modifier::{
    Behavior, Modifier, ModifierDef, ModifierId, ModifierRecord, ModifierResult, ModifierSpec,
};
pub use registry::{ModifierRegistry, RegistryError};
pub use types::{Phase, Rarity};
