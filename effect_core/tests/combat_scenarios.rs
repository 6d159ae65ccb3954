//! Integration test: Build catalog -> Generate gear -> Run combat phases
//!
//! These tests drive the engine the way a host combat loop does, through
//! the public API only: a real actor implementation, seeded dice, and the
//! standard catalog.

use effect_core::{
    apply_damage_phase, run_actor_phase, standard_catalog, CombatActor, Damage, DamageCategory,
    Modifier, ModifierRecord, Phase,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Minimal host-side combatant backed by a seeded RNG
struct Fighter {
    name: String,
    hp: i32,
    max_hp: i32,
    gear: Vec<Modifier>,
    timed: Vec<Modifier>,
    player: bool,
    rng: ChaCha8Rng,
}

impl Fighter {
    fn new(name: &str, max_hp: i32, seed: u64) -> Self {
        Fighter {
            name: name.to_string(),
            hp: max_hp,
            max_hp,
            gear: Vec::new(),
            timed: Vec::new(),
            player: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn with_gear(mut self, m: Modifier) -> Self {
        self.gear.push(m);
        self
    }
}

impl CombatActor for Fighter {
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
        self.rng.gen_range(1..=faces)
    }

    fn entity_modifiers(&self, phase: Phase) -> Vec<Modifier> {
        self.gear
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
}

fn slash(amount: i32) -> Damage {
    Damage::empty().with(DamageCategory::Slash, amount)
}

#[test]
fn poison_runs_its_full_course() {
    let registry = standard_catalog().unwrap();
    let mut log: Vec<String> = Vec::new();

    let poison = registry.get_by_name("Poison Tipped", 3).unwrap();
    let mut attacker = Fighter::new("assassin", 30, 1).with_gear(poison);
    let mut victim = Fighter::new("knight", 60, 2);

    // the strike inflicts the tick on the victim
    let out = apply_damage_phase(
        Phase::PreAttack,
        slash(5),
        &mut attacker,
        &mut victim,
        &mut log,
    );
    assert_eq!(out.slash, 5);
    assert_eq!(victim.timed_modifiers().len(), 1);
    assert_eq!(victim.timed_modifiers()[0].name(), "Poison");
    assert_eq!(victim.timed_modifiers()[0].duration, 6);

    // strength 3 poison ticks 3 damage for 6 turns, then falls off
    for turn in 1..=6 {
        run_actor_phase(Phase::TurnStart, &mut victim, None, &mut log);
        assert_eq!(victim.hp(), 60 - 3 * turn);
    }
    assert!(victim.timed_modifiers().is_empty());

    run_actor_phase(Phase::TurnStart, &mut victim, None, &mut log);
    assert_eq!(victim.hp(), 42);
    assert_eq!(log.iter().filter(|l| l.contains("poison")).count(), 6);
}

#[test]
fn eldritch_shield_blocks_then_breaks() {
    let registry = standard_catalog().unwrap();
    let mut log: Vec<String> = Vec::new();

    let shield = registry.get_by_name("Eldritch Shield", 2).unwrap();
    let mut mage = Fighter::new("mage", 40, 3).with_gear(shield);
    let mut brute = Fighter::new("brute", 50, 4);

    run_actor_phase(Phase::CombatStart, &mut mage, Some(&mut brute), &mut log);
    assert_eq!(mage.timed_modifiers().len(), 1);
    assert_eq!(mage.timed_modifiers()[0].duration, 2);

    // two real hits are nullified, the third lands
    for _ in 0..2 {
        let out = apply_damage_phase(
            Phase::MidDefend,
            slash(12),
            &mut brute,
            &mut mage,
            &mut log,
        );
        assert!(out.is_empty());
    }
    assert!(mage.timed_modifiers().is_empty());

    let out = apply_damage_phase(
        Phase::MidDefend,
        slash(12),
        &mut brute,
        &mut mage,
        &mut log,
    );
    assert_eq!(out.slash, 12);
    assert!(log.iter().any(|l| l.contains("breaks")));
}

#[test]
fn unyielding_will_revives_once_per_charge() {
    let registry = standard_catalog().unwrap();
    let mut log: Vec<String> = Vec::new();

    let will = registry.get_by_name("Unyielding Will", 1).unwrap();
    let mut hero = Fighter::new("hero", 40, 5).with_gear(will);
    let mut wraith = Fighter::new("wraith", 40, 6);

    run_actor_phase(Phase::CombatStart, &mut hero, Some(&mut wraith), &mut log);
    assert_eq!(hero.timed_modifiers().len(), 1);

    // turns where the hero survives must not consume the charge
    for _ in 0..3 {
        apply_damage_phase(
            Phase::PostDefend,
            Damage::empty(),
            &mut wraith,
            &mut hero,
            &mut log,
        );
        assert_eq!(hero.timed_modifiers().len(), 1);
    }

    hero.set_hp(0);
    apply_damage_phase(
        Phase::PostDefend,
        Damage::empty(),
        &mut wraith,
        &mut hero,
        &mut log,
    );
    assert_eq!(hero.hp(), 20);
    assert!(hero.timed_modifiers().is_empty());

    // the second death is final
    hero.set_hp(0);
    apply_damage_phase(
        Phase::PostDefend,
        Damage::empty(),
        &mut wraith,
        &mut hero,
        &mut log,
    );
    assert!(hero.is_dead());
}

#[test]
fn generated_gear_respects_op_ordering() {
    let registry = standard_catalog().unwrap();
    let mut log: Vec<String> = Vec::new();

    // level 40: affinity strength 1 + 40/2 = 21, optimized the same
    let affinity = registry.spec_by_name("Slash Affinity").unwrap();
    let optimized = registry.spec_by_name("Slash Optimized").unwrap();
    let mut attacker = Fighter::new("duelist", 30, 7)
        .with_gear(Modifier::generate(optimized, 40))
        .with_gear(Modifier::generate(affinity, 40));
    let mut target = Fighter::new("dummy", 99, 8);

    let out = apply_damage_phase(
        Phase::PreAttack,
        slash(100),
        &mut attacker,
        &mut target,
        &mut log,
    );
    // multiply by 121% first, then add 21 flat
    assert_eq!(out.slash, 142);
}

#[test]
fn records_rebuild_equipped_gear() {
    let registry = standard_catalog().unwrap();

    let rolled = vec![
        registry
            .spec_by_name("Vampiric")
            .map(|s| Modifier::generate(s, 60))
            .unwrap(),
        registry
            .spec_by_name("Thorns")
            .map(|s| Modifier::generate(s, 60))
            .unwrap(),
    ];

    let records: Vec<ModifierRecord> = rolled.iter().map(Modifier::record).collect();
    let json = serde_json::to_string(&records).unwrap();
    let stored: Vec<ModifierRecord> = serde_json::from_str(&json).unwrap();

    let rebuilt: Vec<Modifier> = stored
        .iter()
        .map(|r| registry.hydrate(r).unwrap())
        .collect();
    assert_eq!(rebuilt, rolled);
    assert_eq!(rebuilt[0].name(), "Vampiric");
}

#[test]
fn seeded_duel_runs_to_completion() {
    let registry = standard_catalog().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut log: Vec<String> = Vec::new();

    let mut red = Fighter::new("red", 80, 11);
    let mut blue = Fighter::new("blue", 80, 12);
    red.player = true;
    for name in ["Berserk", "Fire Absorption", "Brutality"] {
        let spec = registry.spec_by_name(name).unwrap();
        red.gear.push(Modifier::generate(spec, 15));
    }
    for name in ["Poison Tipped", "Thorns", "Dread Aura"] {
        let spec = registry.spec_by_name(name).unwrap();
        blue.gear.push(Modifier::generate(spec, 15));
    }

    run_actor_phase(Phase::CombatStart, &mut red, Some(&mut blue), &mut log);
    run_actor_phase(Phase::CombatStart, &mut blue, Some(&mut red), &mut log);

    let mut turns = 0;
    while !red.is_dead() && !blue.is_dead() && turns < 60 {
        turns += 1;
        let (atk, def) = if turns % 2 == 1 {
            (&mut red, &mut blue)
        } else {
            (&mut blue, &mut red)
        };

        run_actor_phase(Phase::TurnStart, &mut *atk, Some(&mut *def), &mut log);
        if atk.is_dead() || def.is_dead() {
            break;
        }

        let mut dmg = Damage::generate(&mut rng, 14, &[]);
        dmg = apply_damage_phase(Phase::PreAttack, dmg, &mut *atk, &mut *def, &mut log);
        let resist = apply_damage_phase(
            Phase::PreDefend,
            Damage::empty(),
            &mut *atk,
            &mut *def,
            &mut log,
        );
        dmg = dmg - resist;
        dmg = apply_damage_phase(Phase::MidDefend, dmg, &mut *atk, &mut *def, &mut log);
        let total = dmg.total();
        def.modify_hp(-total, false);
        apply_damage_phase(Phase::PostAttack, dmg, &mut *atk, &mut *def, &mut log);
        apply_damage_phase(Phase::PostDefend, dmg, &mut *atk, &mut *def, &mut log);
    }

    assert!(red.is_dead() || blue.is_dead(), "duel never resolved");
    assert!(!log.is_empty());
}
