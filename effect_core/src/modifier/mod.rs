//! Modifier - effect descriptors and the instances attached to actors
//!
//! A [`ModifierSpec`] is the immutable, catalog-level description of one
//! effect variant: identity, rarity, phase, generation parameters and a
//! [`Behavior`] tag. A [`Modifier`] is one live instance of a spec with a
//! concrete strength and a remaining duration. Instances are created by
//! procedural generation (permanent, duration -1) or spawned mid-combat by
//! another effect (timed).

pub mod behavior;

pub use behavior::Behavior;

use crate::context::ModifierContext;
use crate::damage::Damage;
use crate::types::{Phase, Rarity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Catalog identity of a modifier variant. Sequential per catalog build;
/// stable for a given registration order, not across catalog revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierId(pub u32);

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Definition handed to the registry when registering a variant.
/// The registry assigns the id and turns this into a [`ModifierSpec`].
#[derive(Debug, Clone)]
pub struct ModifierDef {
    pub name: String,
    /// Description template; `{str}` is replaced by the instance strength
    pub description: String,
    /// `None` marks an internal sub-effect excluded from every tier listing
    pub rarity: Option<Rarity>,
    pub phase: Phase,
    /// Secondary sort key within a phase; 0 fires before 1
    pub op_order: u8,
    pub min_strength: i32,
    /// 0 means uncapped
    pub max_strength: i32,
    /// Generation divisor: strength grows by one per `scaling` levels
    pub scaling: f64,
    pub behavior: Behavior,
}

impl ModifierDef {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rarity: Option<Rarity>,
        phase: Phase,
        behavior: Behavior,
    ) -> Self {
        ModifierDef {
            name: name.into(),
            description: description.into(),
            rarity,
            phase,
            op_order: 0,
            min_strength: 1,
            max_strength: 0,
            scaling: 1.0,
            behavior,
        }
    }

    pub fn with_op_order(mut self, op_order: u8) -> Self {
        self.op_order = op_order;
        self
    }

    pub fn with_strength_range(mut self, min: i32, max: i32) -> Self {
        self.min_strength = min;
        self.max_strength = max;
        self
    }

    pub fn with_scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }
}

/// Immutable, shared description of one effect variant
#[derive(Debug)]
pub struct ModifierSpec {
    id: ModifierId,
    name: String,
    description: String,
    rarity: Option<Rarity>,
    phase: Phase,
    op_order: u8,
    min_strength: i32,
    max_strength: i32,
    scaling: f64,
    behavior: Behavior,
}

impl ModifierSpec {
    pub(crate) fn from_def(def: ModifierDef, id: ModifierId) -> Self {
        ModifierSpec {
            id,
            name: def.name,
            description: def.description,
            rarity: def.rarity,
            phase: def.phase,
            op_order: def.op_order,
            min_strength: def.min_strength,
            max_strength: def.max_strength,
            scaling: def.scaling,
            behavior: def.behavior,
        }
    }

    pub fn id(&self) -> ModifierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rarity(&self) -> Option<Rarity> {
        self.rarity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn op_order(&self) -> u8 {
        self.op_order
    }

    pub fn min_strength(&self) -> i32 {
        self.min_strength
    }

    pub fn max_strength(&self) -> i32 {
        self.max_strength
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    pub(crate) fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Description with the `{str}` placeholder resolved
    pub fn describe(&self, strength: i32) -> String {
        self.description.replace("{str}", &strength.to_string())
    }
}

/// Value produced by one modifier invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModifierResult {
    /// The behavior ran; nothing for the orchestrator to fold back
    Applied,
    /// An updated damage value the orchestrator must fold into the attack
    Damage(Damage),
    /// An updated numeric value (max-HP and reward folding)
    Value(i64),
    /// Duration was 0: nothing ran, the instance can be discarded
    Expired,
}

impl ModifierResult {
    pub fn as_damage(&self) -> Option<Damage> {
        match self {
            ModifierResult::Damage(d) => Some(*d),
            _ => None,
        }
    }
}

/// One live modifier instance
#[derive(Debug, Clone)]
pub struct Modifier {
    spec: Arc<ModifierSpec>,
    /// Scaled magnitude of the effect
    pub strength: i32,
    /// Turns remaining: -1 permanent, 0 expired, >0 counting down
    pub duration: i32,
}

impl Modifier {
    /// Duration value of a non-expiring modifier
    pub const PERMANENT: i32 = -1;

    /// Build a permanent instance of a variant with an explicit strength
    pub fn permanent(spec: &Arc<ModifierSpec>, strength: i32) -> Modifier {
        Modifier {
            spec: Arc::clone(spec),
            strength,
            duration: Modifier::PERMANENT,
        }
    }

    /// Build a timed instance
    pub fn timed(spec: &Arc<ModifierSpec>, strength: i32, duration: i32) -> Modifier {
        Modifier {
            spec: Arc::clone(spec),
            strength,
            duration,
        }
    }

    /// Procedurally generate a permanent instance for an entity or zone
    /// level: `strength = min + floor(level / scaling)`, clamped to the
    /// max when one is set. Pure and deterministic.
    pub fn generate(spec: &Arc<ModifierSpec>, level: u32) -> Modifier {
        let mut strength = spec.min_strength + (level as f64 / spec.scaling).floor() as i32;
        if spec.max_strength != 0 && strength > spec.max_strength {
            strength = spec.max_strength;
        }
        Modifier::permanent(spec, strength)
    }

    pub fn id(&self) -> ModifierId {
        self.spec.id()
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn rarity(&self) -> Option<Rarity> {
        self.spec.rarity()
    }

    pub fn phase(&self) -> Phase {
        self.spec.phase()
    }

    pub fn op_order(&self) -> u8 {
        self.spec.op_order()
    }

    pub fn spec(&self) -> &Arc<ModifierSpec> {
        &self.spec
    }

    /// Description with this instance's strength substituted in
    pub fn description(&self) -> String {
        self.spec.describe(self.strength)
    }

    /// Strength as a fraction (strength 50 => 0.5)
    pub(crate) fn fstrength(&self) -> f64 {
        self.strength as f64 / 100.0
    }

    /// Snapshot for persistence: identity and strength only. Duration is
    /// combat-local state and is not stored.
    pub fn record(&self) -> ModifierRecord {
        ModifierRecord {
            id: self.id(),
            strength: self.strength,
        }
    }

    /// Run this modifier against a context.
    ///
    /// An expired instance (duration 0) does nothing and reports
    /// [`ModifierResult::Expired`]. A counting instance decrements first
    /// and then runs its behavior, so the invocation that reaches zero
    /// still executes. Permanent instances always execute.
    pub fn apply(&mut self, ctx: &mut ModifierContext) -> ModifierResult {
        if self.duration == 0 {
            return ModifierResult::Expired;
        }
        if self.duration > 0 {
            self.duration -= 1;
        }
        behavior::invoke(self, ctx)
    }
}

impl PartialEq for Modifier {
    /// Two instances are the same effect iff id and strength match.
    /// Duration is deliberately excluded: the same buff from two sources
    /// can be mid-countdown and still deduplicate.
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.strength == other.strength
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rarity() {
            Some(rarity) => write!(f, "{} ({}) - {}", self.name(), rarity, self.description()),
            None => write!(f, "{} - {}", self.name(), self.description()),
        }
    }
}

/// Serializable snapshot of a generated modifier, as stored on equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierRecord {
    pub id: ModifierId,
    pub strength: i32,
}
