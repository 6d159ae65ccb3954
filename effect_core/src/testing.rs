//! Shared test double for the unit suites. A [`TestActor`] carries its own
//! HP, modifier lists and a scripted roll queue, so every randomized
//! effect can be pinned to an exact outcome.

use crate::actor::CombatActor;
use crate::modifier::Modifier;
use crate::types::Phase;
use std::collections::VecDeque;

pub(crate) struct TestActor {
    name: String,
    hp: i32,
    max_hp: i32,
    rolls: VecDeque<u32>,
    statics: Vec<Modifier>,
    timed: Vec<Modifier>,
    player: bool,
    offhand_shield: bool,
    offhand_weapon: bool,
    artifacts: usize,
}

impl TestActor {
    /// A fresh actor at full HP with no modifiers and no scripted rolls
    pub(crate) fn new(name: &str, max_hp: i32) -> Self {
        TestActor {
            name: name.to_string(),
            hp: max_hp,
            max_hp,
            rolls: VecDeque::new(),
            statics: Vec::new(),
            timed: Vec::new(),
            player: false,
            offhand_shield: false,
            offhand_weapon: false,
            artifacts: 0,
        }
    }

    /// Script the next die rolls, in order. Once the queue is drained every
    /// roll comes up max.
    pub(crate) fn with_rolls(mut self, rolls: &[u32]) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Attach a permanent modifier, as if granted by equipment
    pub(crate) fn with_static(mut self, m: Modifier) -> Self {
        self.statics.push(m);
        self
    }

    /// Attach a timed modifier directly
    pub(crate) fn with_timed(mut self, m: Modifier) -> Self {
        self.timed.push(m);
        self
    }

    pub(crate) fn as_player(mut self) -> Self {
        self.player = true;
        self
    }

    pub(crate) fn with_offhand_shield(mut self) -> Self {
        self.offhand_shield = true;
        self
    }

    pub(crate) fn with_offhand_weapon(mut self) -> Self {
        self.offhand_weapon = true;
        self
    }

    pub(crate) fn with_artifacts(mut self, count: usize) -> Self {
        self.artifacts = count;
        self
    }
}

impl CombatActor for TestActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn set_hp(&mut self, hp: i32) {
        self.hp = hp;
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn roll(&mut self, faces: u32) -> u32 {
        self.rolls.pop_front().unwrap_or(faces)
    }

    fn entity_modifiers(&self, phase: Phase) -> Vec<Modifier> {
        self.statics
            .iter()
            .filter(|m| m.phase() == phase)
            .cloned()
            .collect()
    }

    fn timed_modifiers(&self) -> &[Modifier] {
        &self.timed
    }

    fn timed_modifiers_mut(&mut self) -> &mut Vec<Modifier> {
        &mut self.timed
    }

    fn is_player(&self) -> bool {
        self.player
    }

    fn has_offhand_shield(&self) -> bool {
        self.offhand_shield
    }

    fn has_offhand_weapon(&self) -> bool {
        self.offhand_weapon
    }

    fn artifact_count(&self) -> usize {
        self.artifacts
    }
}
