//! Example Arena - a scripted two-fighter duel demonstrating effect_core
//!
//! This demo shows:
//! - Building the standard effect catalog
//! - Rolling gear modifiers by rarity and level
//! - Driving the phase dispatch functions from a host combat loop
//! - The combat log produced by the effects themselves

use effect_core::{
    apply_damage_phase, fold_value, run_actor_phase, standard_catalog, CombatActor, CombatLog,
    Damage, Modifier, ModifierRegistry, Phase, Rarity, RegistryError,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Log sink that prints each line as it happens
struct ConsoleLog;

impl CombatLog for ConsoleLog {
    fn write(&mut self, text: &str) {
        println!("  {text}");
    }
}

/// One arena combatant: rolled gear modifiers, rolled base damage and
/// resistance, and its own seeded die
struct Fighter {
    name: String,
    hp: i32,
    max_hp: i32,
    base_damage: Damage,
    base_resist: Damage,
    gear: Vec<Modifier>,
    timed: Vec<Modifier>,
    player: bool,
    rng: ChaCha8Rng,
}

impl Fighter {
    fn new(
        name: &str,
        level: u32,
        player: bool,
        registry: &ModifierRegistry,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut gear = Vec::new();
        for _ in 0..4 {
            let rarity = roll_rarity(rng);
            if let Some(spec) = registry.random_by_rarity(rarity, rng) {
                gear.push(Modifier::generate(spec, level));
            }
        }

        Fighter {
            name: name.to_string(),
            hp: 0,
            max_hp: 0,
            base_damage: Damage::generate(rng, 8 + level * 2, &[]),
            base_resist: Damage::generate(rng, 4 + level, &[]),
            gear,
            timed: Vec::new(),
            player,
            rng: ChaCha8Rng::seed_from_u64(rng.gen()),
        }
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

/// Weighted rarity roll: commons dominate, legendaries are scarce
fn roll_rarity(rng: &mut ChaCha8Rng) -> Rarity {
    match rng.gen_range(0..100) {
        0..=59 => Rarity::Common,
        60..=84 => Rarity::Uncommon,
        85..=96 => Rarity::Rare,
        _ => Rarity::Legendary,
    }
}

/// Resolve one attack through every damage phase of the exchange
fn resolve_attack(attacker: &mut Fighter, defender: &mut Fighter, log: &mut dyn CombatLog) {
    let mut attack = attacker.base_damage;
    attack = apply_damage_phase(Phase::PreAttack, attack, attacker, defender, log);

    let resist = apply_damage_phase(
        Phase::PreDefend,
        defender.base_resist,
        attacker,
        defender,
        log,
    );

    let mut landed = attack - resist;
    landed = apply_damage_phase(Phase::MidAttack, landed, attacker, defender, log);
    landed = apply_damage_phase(Phase::MidDefend, landed, attacker, defender, log);

    let total = landed.total();
    defender.modify_hp(-total, false);
    println!(
        "  {} hits {} for {} damage ({}). [{}]",
        attacker.name,
        defender.name,
        total,
        defender.hp_string(),
        landed
    );

    apply_damage_phase(Phase::PostAttack, landed, attacker, defender, log);
    apply_damage_phase(Phase::PostDefend, landed, attacker, defender, log);
}

fn main() -> Result<(), RegistryError> {
    let registry = standard_catalog()?;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut log = ConsoleLog;

    let mut hero = Fighter::new("Aldric", 12, true, &registry, &mut rng);
    let mut ogre = Fighter::new("Gorehowl", 10, false, &registry, &mut rng);

    for fighter in [&mut hero, &mut ogre] {
        fighter.max_hp = fold_value(Phase::MaxHp, 50, fighter, &mut log) as i32;
        fighter.hp = fighter.max_hp;
    }

    println!("=== Arena: {} vs {} ===", hero.name, ogre.name);
    for fighter in [&hero, &ogre] {
        println!("{} ({})", fighter.name, fighter.hp_string());
        for m in &fighter.gear {
            println!("  * {m}");
        }
    }

    println!("\n--- Combat start ---");
    run_actor_phase(Phase::CombatStart, &mut hero, Some(&mut ogre), &mut log);
    run_actor_phase(Phase::CombatStart, &mut ogre, Some(&mut hero), &mut log);

    for turn in 1..=30 {
        println!("\n--- Turn {turn} ---");

        run_actor_phase(Phase::TurnStart, &mut hero, Some(&mut ogre), &mut log);
        if hero.is_dead() || ogre.is_dead() {
            break;
        }
        resolve_attack(&mut hero, &mut ogre, &mut log);
        if ogre.is_dead() {
            break;
        }

        run_actor_phase(Phase::TurnStart, &mut ogre, Some(&mut hero), &mut log);
        if hero.is_dead() || ogre.is_dead() {
            break;
        }
        resolve_attack(&mut ogre, &mut hero, &mut log);
        if hero.is_dead() {
            break;
        }
    }

    println!();
    let hero_won = !hero.is_dead();
    let winner = if hero_won { &hero } else { &ogre };
    println!("=== {} wins ({}) ===", winner.name, winner.hp_string());

    if hero_won {
        let xp = fold_value(Phase::Rewards, 100, &mut hero, &mut log);
        println!("{} earns {} XP", hero.name, xp);
    }

    Ok(())
}
