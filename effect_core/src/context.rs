//! ModifierContext - the per-invocation role bag handed to an effect
//!
//! The combat orchestrator assembles one context per modifier invocation.
//! Every role is optional: an effect whose role is absent quietly does
//! nothing instead of failing, so a modifier wired into a phase that does
//! not supply its inputs degrades to a no-op. Which roles a phase supplies
//! is documented on the dispatch functions.

use crate::actor::{CombatActor, CombatLog};
use crate::damage::Damage;

/// Typed invocation context. One field per recognized role.
#[derive(Default)]
pub struct ModifierContext<'a> {
    /// The in-flight damage value, present in attack/defend phases
    pub damage: Option<Damage>,
    /// Actor dealing the action
    pub attacker: Option<&'a mut dyn CombatActor>,
    /// Actor receiving the action
    pub defender: Option<&'a mut dyn CombatActor>,
    /// Actor the firing modifier is attached to (combat-start, turn-start
    /// and max-HP phases)
    pub entity: Option<&'a mut dyn CombatActor>,
    /// The owning actor's adversary, for aura-style effects
    pub opponent: Option<&'a mut dyn CombatActor>,
    /// Raw numeric input for max-HP and reward folding
    pub value: Option<i64>,
    /// Combat log sink, if any
    pub log: Option<&'a mut dyn CombatLog>,
}

impl<'a> ModifierContext<'a> {
    /// An empty context; populate it with the `with_*` builders
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damage(mut self, damage: Damage) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_attacker(mut self, actor: &'a mut dyn CombatActor) -> Self {
        self.attacker = Some(actor);
        self
    }

    pub fn with_defender(mut self, actor: &'a mut dyn CombatActor) -> Self {
        self.defender = Some(actor);
        self
    }

    pub fn with_entity(mut self, actor: &'a mut dyn CombatActor) -> Self {
        self.entity = Some(actor);
        self
    }

    pub fn with_opponent(mut self, actor: &'a mut dyn CombatActor) -> Self {
        self.opponent = Some(actor);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_log(mut self, log: &'a mut dyn CombatLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Write a line to the combat log; a no-op when no sink is present
    pub fn write(&mut self, text: &str) {
        if let Some(log) = self.log.as_deref_mut() {
            log.write(text);
        }
    }
}
