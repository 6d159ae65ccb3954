//! CombatActor - the capability an entity needs to take part in combat
//!
//! The engine never owns entities. Players, enemies and summons live in the
//! host application; they opt into combat by implementing [`CombatActor`].
//! Timed modifiers inflicted during a fight are stored on the actor itself
//! so they follow it through the whole combat.

use crate::modifier::Modifier;
use crate::types::Phase;

/// Capability trait for anything that can fight
pub trait CombatActor {
    /// Display name used in combat log lines
    fn name(&self) -> &str;

    /// Current hit points
    fn hp(&self) -> i32;

    /// Overwrite current hit points
    fn set_hp(&mut self, hp: i32);

    /// Maximum hit points
    fn max_hp(&self) -> i32;

    /// Roll a uniform die: a value in `1..=faces`
    fn roll(&mut self, faces: u32) -> u32;

    /// Fresh instances of the actor's permanent modifiers for one phase
    /// (from equipment, innate traits, and so on). These are expected to
    /// have duration -1; finite-duration effects belong on the timed list.
    fn entity_modifiers(&self, phase: Phase) -> Vec<Modifier> {
        let _ = phase;
        Vec::new()
    }

    /// Timed modifiers currently inflicted on this actor
    fn timed_modifiers(&self) -> &[Modifier];

    /// Mutable access to the timed-modifier list, used by dispatch and by
    /// effects that spawn sub-effects
    fn timed_modifiers_mut(&mut self) -> &mut Vec<Modifier>;

    /// Whether this actor is a player character. Several effects scale
    /// differently for non-players.
    fn is_player(&self) -> bool {
        false
    }

    /// Whether a shield is equipped in the secondary slot
    fn has_offhand_shield(&self) -> bool {
        false
    }

    /// Whether a weapon is equipped in the secondary slot
    fn has_offhand_weapon(&self) -> bool {
        false
    }

    /// Number of artifacts the actor owns
    fn artifact_count(&self) -> usize {
        0
    }

    /// Current HP as a fraction of max HP
    fn hp_percent(&self) -> f64 {
        let max = self.max_hp();
        if max <= 0 {
            return 0.0;
        }
        self.hp() as f64 / max as f64
    }

    /// Whether the actor is dead
    fn is_dead(&self) -> bool {
        self.hp() <= 0
    }

    /// Adjust hit points by a signed amount. HP clamps at zero, and at max
    /// HP unless `overheal` is set. Returns true if this killed the actor.
    fn modify_hp(&mut self, amount: i32, overheal: bool) -> bool {
        let mut hp = self.hp() + amount;
        if hp <= 0 {
            self.set_hp(0);
            return true;
        }
        if !overheal {
            hp = hp.min(self.max_hp());
        }
        self.set_hp(hp);
        false
    }

    /// Short HP readout for log lines
    fn hp_string(&self) -> String {
        format!("{}/{} HP", self.hp(), self.max_hp())
    }

    /// Uniform value in `[0, 1)`, derived from a 10 000-sided die so
    /// scripted rolls stay deterministic under test
    fn roll_fraction(&mut self) -> f64 {
        (self.roll(10_000) - 1) as f64 / 10_000.0
    }
}

/// Best-effort combat log sink. Absence of a sink is never an error.
pub trait CombatLog {
    /// Append one line to the log
    fn write(&mut self, text: &str);
}

impl CombatLog for Vec<String> {
    fn write(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use crate::actor::{CombatActor, CombatLog};
    use crate::testing::TestActor;

    #[test]
    fn test_modify_hp_clamps_at_zero_and_max() {
        let mut actor = TestActor::new("dummy", 50);
        assert!(!actor.modify_hp(-20, false));
        assert_eq!(actor.hp(), 30);

        assert!(actor.modify_hp(-99, false));
        assert_eq!(actor.hp(), 0);
        assert!(actor.is_dead());

        actor.set_hp(45);
        actor.modify_hp(20, false);
        assert_eq!(actor.hp(), 50);
    }

    #[test]
    fn test_modify_hp_overheal_passes_max() {
        let mut actor = TestActor::new("dummy", 50);
        actor.modify_hp(30, true);
        assert_eq!(actor.hp(), 80);
    }

    #[test]
    fn test_hp_percent_and_string() {
        let mut actor = TestActor::new("dummy", 200);
        actor.set_hp(50);
        assert!((actor.hp_percent() - 0.25).abs() < f64::EPSILON);
        assert_eq!(actor.hp_string(), "50/200 HP");
    }

    #[test]
    fn test_vec_log_sink() {
        let mut log: Vec<String> = Vec::new();
        log.write("hello");
        assert_eq!(log, vec!["hello".to_string()]);
    }

    #[test]
    fn test_roll_fraction_range() {
        let mut actor = TestActor::new("dummy", 10).with_rolls(&[1, 10_000]);
        assert!((actor.roll_fraction() - 0.0).abs() < f64::EPSILON);
        assert!((actor.roll_fraction() - 0.9999).abs() < f64::EPSILON);
    }
}
