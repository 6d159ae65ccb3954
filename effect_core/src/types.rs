//! Core enums shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trigger point in a combat turn at which a modifier fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Once, before the first turn of a fight
    CombatStart,
    /// On the attacker, before outgoing damage is finalized
    PreAttack,
    /// On the defender, before resistances are finalized
    PreDefend,
    /// On the attacker, while the hit is being resolved
    MidAttack,
    /// On the defender, while the hit is being resolved
    MidDefend,
    /// On the attacker, after the hit has landed
    PostAttack,
    /// On the defender, after the hit has landed
    PostDefend,
    /// When combat rewards are computed
    Rewards,
    /// When an actor's maximum HP is computed
    MaxHp,
    /// At the start of each of the owner's turns
    TurnStart,
}

impl Phase {
    /// Get all phases, in turn order
    pub fn all() -> &'static [Phase] {
        &[
            Phase::CombatStart,
            Phase::PreAttack,
            Phase::PreDefend,
            Phase::MidAttack,
            Phase::MidDefend,
            Phase::PostAttack,
            Phase::PostDefend,
            Phase::Rewards,
            Phase::MaxHp,
            Phase::TurnStart,
        ]
    }

    /// Whether this phase dispatches the attacker's modifiers.
    /// Defend-side phases dispatch the defender's instead.
    pub fn is_attack_side(self) -> bool {
        matches!(self, Phase::PreAttack | Phase::MidAttack | Phase::PostAttack)
    }
}

/// Rarity tier of an independently-generatable modifier.
///
/// Internal sub-effects spawned by other modifiers carry no tier at all
/// (`Option<Rarity>` is `None` on their spec) and never appear in tier
/// listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Get all rarity tiers, commonest first
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Legendary,
        ]
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}
