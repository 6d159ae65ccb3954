//! Phase dispatch - running every relevant modifier at a combat moment
//!
//! The host combat loop calls one dispatch function per phase. Dispatch
//! gathers the owning actor's permanent modifiers for the phase together
//! with its matching timed modifiers, orders them by `op_order` (ties keep
//! insertion order, permanent before timed), runs each one, folds returned
//! damage or value updates, and prunes instances whose duration ran out.
//!
//! The owner's timed list is detached while the pass runs, so effects that
//! spawn sub-effects onto the owner append to a fresh list that is merged
//! back afterwards.

use crate::actor::{CombatActor, CombatLog};
use crate::context::ModifierContext;
use crate::damage::Damage;
use crate::modifier::{Modifier, ModifierResult};
use crate::types::Phase;
use std::mem;

/// One modifier queued for a pass. Instances lifted off the owner's timed
/// list are flagged so they can be put back; gear instances are rebuilt
/// fresh every pass and are simply dropped afterwards.
struct Slot {
    m: Modifier,
    from_timed: bool,
}

/// Pull the owner's modifiers for one phase: fresh permanent instances
/// first, then its timed instances for the phase, stable-sorted by
/// `op_order`. Timed instances not in the phase are returned separately so
/// they can be put back untouched. Leaves the owner's timed list empty.
fn collect_phase(owner: &mut dyn CombatActor, phase: Phase) -> (Vec<Slot>, Vec<Modifier>) {
    let mut active: Vec<Slot> = owner
        .entity_modifiers(phase)
        .into_iter()
        .map(|m| Slot {
            m,
            from_timed: false,
        })
        .collect();
    let mut stash = Vec::new();
    for m in mem::take(owner.timed_modifiers_mut()) {
        if m.phase() == phase {
            active.push(Slot {
                m,
                from_timed: true,
            });
        } else {
            stash.push(m);
        }
    }
    active.sort_by_key(|slot| slot.m.op_order());
    (active, stash)
}

/// Merge the timed list back onto the owner after a pass: untouched
/// out-of-phase instances, then surviving in-phase timed instances, then
/// anything spawned onto the owner while the pass ran.
fn restore_timed(owner: &mut dyn CombatActor, stash: Vec<Modifier>, survivors: Vec<Modifier>) {
    let list = owner.timed_modifiers_mut();
    let spawned = mem::take(list);
    list.extend(stash);
    list.extend(survivors);
    list.extend(spawned);
}

/// Keep the timed instances that can still fire. Gear instances are
/// rebuilt every pass and never survive; a timed instance survives unless
/// its countdown ran out.
fn surviving_timed(active: Vec<Slot>) -> Vec<Modifier> {
    active
        .into_iter()
        .filter(|slot| slot.from_timed && slot.m.duration != 0)
        .map(|slot| slot.m)
        .collect()
}

/// Run one damage phase of an exchange and return the updated damage.
///
/// Attack-side phases run the attacker's modifiers, defend-side phases the
/// defender's. The context supplies both actors, the in-flight damage and
/// the log; every returned damage update is folded, including an empty one
/// (a nullified hit stays nullified).
pub fn apply_damage_phase(
    phase: Phase,
    damage: Damage,
    attacker: &mut dyn CombatActor,
    defender: &mut dyn CombatActor,
    log: &mut dyn CombatLog,
) -> Damage {
    let (mut active, stash) = {
        let owner: &mut dyn CombatActor = if phase.is_attack_side() {
            &mut *attacker
        } else {
            &mut *defender
        };
        collect_phase(owner, phase)
    };

    let mut current = damage;
    for slot in &mut active {
        let mut ctx = ModifierContext::new()
            .with_damage(current)
            .with_attacker(&mut *attacker)
            .with_defender(&mut *defender)
            .with_log(&mut *log);
        if let ModifierResult::Damage(updated) = slot.m.apply(&mut ctx) {
            current = updated;
        }
    }

    let survivors = surviving_timed(active);
    let owner: &mut dyn CombatActor = if phase.is_attack_side() {
        attacker
    } else {
        defender
    };
    restore_timed(owner, stash, survivors);
    current
}

/// Run a standalone actor phase (combat start, turn start). The context
/// supplies the owning entity, its opponent when one is in reach, and the
/// log; there is no in-flight damage to fold.
pub fn run_actor_phase(
    phase: Phase,
    entity: &mut dyn CombatActor,
    mut opponent: Option<&mut dyn CombatActor>,
    log: &mut dyn CombatLog,
) {
    let (mut active, stash) = collect_phase(entity, phase);

    for slot in &mut active {
        let mut ctx = ModifierContext::new()
            .with_entity(&mut *entity)
            .with_log(&mut *log);
        if let Some(op) = opponent.as_deref_mut() {
            ctx = ctx.with_opponent(op);
        }
        slot.m.apply(&mut ctx);
    }

    let survivors = surviving_timed(active);
    restore_timed(entity, stash, survivors);
}

/// Fold a numeric value through one phase (max-HP computation, rewards)
/// and return the result. Modifiers that do not understand the value phase
/// leave it unchanged.
pub fn fold_value(
    phase: Phase,
    value: i64,
    entity: &mut dyn CombatActor,
    log: &mut dyn CombatLog,
) -> i64 {
    let (mut active, stash) = collect_phase(entity, phase);

    let mut current = value;
    for slot in &mut active {
        let mut ctx = ModifierContext::new()
            .with_value(current)
            .with_entity(&mut *entity)
            .with_log(&mut *log);
        if let ModifierResult::Value(updated) = slot.m.apply(&mut ctx) {
            current = updated;
        }
    }

    let survivors = surviving_timed(active);
    restore_timed(entity, stash, survivors);
    current
}
