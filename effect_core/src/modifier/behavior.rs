//! Behavior - what each effect variant actually does
//!
//! One enum variant per behavior template. Variants that spawn a timed
//! sub-effect hold the `Arc<ModifierSpec>` of the variant they spawn, so a
//! sub-effect is an ordinary catalog entry parameterized through its
//! constructor instead of a closure over its parent.
//!
//! Every role an arm reads is optional: a missing role degrades to a
//! no-op (the in-flight damage passes through untouched).

use crate::context::ModifierContext;
use crate::damage::{Damage, DamageCategory};
use crate::modifier::{Modifier, ModifierResult, ModifierSpec};
use std::sync::Arc;

/// Behavior tag carried by every [`ModifierSpec`]
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Scale one damage category by `(100 + strength)%`
    CategoryMult { category: DamageCategory },
    /// Add `strength` flat to one damage category
    CategoryBonus { category: DamageCategory },
    /// Heal `strength%` of one incoming category, at least 1 HP on a hit
    CategoryAbsorb { category: DamageCategory },
    /// Flat bonus to every dealt category if the target is at full health
    SneakAttack,
    /// Kill the target outright below `strength%` health
    Execute,
    /// Double damage while the attacker is below `strength%` health
    Berserk,
    /// Scale damage by a random factor in `0.8 + [0, strength%)`
    ChaosBrand,
    /// 20% chance (d10 > 8) of dealing `strength%` damage
    LuckyHit,
    /// Inflict the poison tick on the target
    InflictPoison { tick: Arc<ModifierSpec> },
    /// Internal: `strength` poison damage at the start of each turn
    PoisonTick,
    /// Grant the barrier sub-effect for `strength` charges at combat start
    GrantShield { barrier: Arc<ModifierSpec> },
    /// Internal: nullify any real hit, consuming a charge
    ShieldBarrier,
    /// Leech `strength%` of damage dealt as HP, at least 1
    Vampiric,
    /// Grant `strength` revive charges at combat start
    GrantRevives { charge: Arc<ModifierSpec> },
    /// Internal: revive at half max HP, restoring the charge when unused
    SecondWind,
    /// Gain `strength` HP (overheal allowed) at combat start
    BloodThirst,
    /// Increase computed max HP by `strength%`
    MaxHpBoost,
    /// `strength%` more damage with a shield in the secondary slot
    Bashing,
    /// Deal `strength` damage back to any attacker
    Thorns,
    /// Add `strength` damage to one uniformly chosen category
    RouletteBonus,
    /// Grant one `strength%`-of-max-HP revive charge at combat start
    GrantDivineRevive { charge: Arc<ModifierSpec> },
    /// Internal: revive at `strength%` max HP, restoring the charge when unused
    DivineSpark,
    /// Deal `strength` unblockable damage after the hit resolves
    Brutal,
    /// `strength * 10%` more damage, costing `strength` HP per attack
    Ferocity,
    /// Regenerate `strength` HP at the start of each turn
    Regenerate,
    /// `strength%` more damage per owned artifact
    ArtifactSynergy,
    /// Deal `strength` damage to the opponent at the start of each turn
    DreadAura,
    /// `strength%` more damage with weapons in both hands
    Akimbo,
    /// Summon a shade that follows the owner for the whole combat
    SummonShade { shade: Arc<ModifierSpec> },
    /// Internal: 40% chance (d100 < 40) of `strength` unblockable damage
    ShadeStrike,
    /// `strength%` more damage when the target is a player
    PlayerBane,
}

/// Execute a modifier's behavior against a context. Duration bookkeeping
/// has already happened in [`Modifier::apply`]; conditional effects that
/// did not consume their charge hand it back here (`duration += 1`).
pub(crate) fn invoke(m: &mut Modifier, ctx: &mut ModifierContext<'_>) -> ModifierResult {
    let spec = Arc::clone(&m.spec);
    match spec.behavior() {
        Behavior::CategoryMult { category } => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let factor = (100 + m.strength) as f64 / 100.0;
            ModifierResult::Damage(damage.scale_category(*category, factor))
        }

        Behavior::CategoryBonus { category } => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            ModifierResult::Damage(damage.add_category(*category, m.strength))
        }

        Behavior::CategoryAbsorb { category } => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let hit = damage.get(*category);
            if hit > 0 {
                if let Some(defender) = ctx.defender.as_deref_mut() {
                    let healed = ((hit as f64 * m.fstrength()) as i32).max(1);
                    defender.modify_hp(healed, true);
                    let text = format!(
                        "{} heals {} HP from {} damage. ({})",
                        defender.name(),
                        healed,
                        category.label(),
                        defender.hp_string()
                    );
                    ctx.write(&text);
                }
            }
            ModifierResult::Applied
        }

        Behavior::SneakAttack => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let at_full = ctx
                .defender
                .as_deref()
                .map(|d| d.hp_percent() >= 1.0)
                .unwrap_or(false);
            if at_full {
                ctx.write(&format!("Sneak attack! +{} damage", m.strength));
                ModifierResult::Damage(damage.with_bonus(m.strength))
            } else {
                ModifierResult::Damage(damage)
            }
        }

        Behavior::Execute => {
            if let Some(target) = ctx.defender.as_deref_mut() {
                if target.hp_percent() <= m.fstrength() {
                    target.set_hp(0);
                    ctx.write("Obliteration.");
                }
            }
            passthrough(ctx)
        }

        Behavior::Berserk => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let raging = ctx
                .attacker
                .as_deref()
                .map(|a| a.hp_percent() <= m.fstrength())
                .unwrap_or(false);
            if raging {
                ModifierResult::Damage(damage.scale(2.0))
            } else {
                ModifierResult::Damage(damage)
            }
        }

        Behavior::ChaosBrand => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let Some(attacker) = ctx.attacker.as_deref_mut() else {
                return ModifierResult::Damage(damage);
            };
            let factor = 0.8 + attacker.roll_fraction() * m.fstrength();
            let text = format!("Chaos: {}%", (factor * 100.0) as i32);
            ctx.write(&text);
            ModifierResult::Damage(damage.scale(factor))
        }

        Behavior::LuckyHit => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let Some(attacker) = ctx.attacker.as_deref_mut() else {
                return ModifierResult::Damage(damage);
            };
            if attacker.roll(10) > 8 {
                ctx.write("Lucky Hit!");
                ModifierResult::Damage(damage.scale(m.fstrength()))
            } else {
                ModifierResult::Damage(damage)
            }
        }

        Behavior::InflictPoison { tick } => {
            if let Some(target) = ctx.defender.as_deref_mut() {
                target
                    .timed_modifiers_mut()
                    .push(Modifier::timed(tick, m.strength, m.strength * 2));
            }
            passthrough(ctx)
        }

        Behavior::PoisonTick => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity.modify_hp(-m.strength, false);
                let text = format!(
                    "{} takes {} poison dmg. ({})",
                    entity.name(),
                    m.strength,
                    entity.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::GrantShield { barrier } => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity
                    .timed_modifiers_mut()
                    .push(Modifier::timed(barrier, 0, m.strength));
                let text = format!("An Eldritch Shield forms around {}", entity.name());
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::ShieldBarrier => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            if damage.total() > 1 {
                if let Some(defender) = ctx.defender.as_deref() {
                    let text = if m.duration == 0 {
                        format!("{}'s shield nullifies the hit and it breaks!", defender.name())
                    } else {
                        format!("{}'s shield nullifies the hit.", defender.name())
                    };
                    ctx.write(&text);
                }
                ModifierResult::Damage(Damage::empty())
            } else {
                // chip hit, the charge was not consumed
                m.duration += 1;
                ModifierResult::Damage(damage)
            }
        }

        Behavior::Vampiric => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            if let Some(attacker) = ctx.attacker.as_deref_mut() {
                let healed = ((damage.total() as f64 * m.fstrength()) as i32).max(1);
                attacker.modify_hp(healed, false);
                let text = format!(
                    "{} leeches {} HP. ({})",
                    attacker.name(),
                    healed,
                    attacker.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::GrantRevives { charge } => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity
                    .timed_modifiers_mut()
                    .push(Modifier::timed(charge, 1, m.strength));
            }
            ModifierResult::Applied
        }

        Behavior::SecondWind => {
            if let Some(defender) = ctx.defender.as_deref_mut() {
                if defender.hp() == 0 {
                    let text = format!("{} still stands.", defender.name());
                    let heal = defender.max_hp() / 2;
                    defender.modify_hp(heal, false);
                    ctx.write(&text);
                } else {
                    m.duration += 1;
                }
            }
            ModifierResult::Applied
        }

        Behavior::BloodThirst => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity.modify_hp(m.strength, true);
                let text = format!(
                    "{}'s blood thirst heals them for {} HP ({}).",
                    entity.name(),
                    m.strength,
                    entity.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::MaxHpBoost => {
            let Some(value) = ctx.value else {
                return ModifierResult::Applied;
            };
            ModifierResult::Value((value as f64 * (1.0 + m.fstrength())) as i64)
        }

        Behavior::Bashing => {
            scale_if_equipped(m, ctx, 1.2, |a| a.has_offhand_shield())
        }

        Behavior::Thorns => {
            if let Some(attacker) = ctx.attacker.as_deref_mut() {
                attacker.modify_hp(-m.strength, false);
                let text = format!(
                    "{} loses {} HP from thorns. ({})",
                    attacker.name(),
                    m.strength,
                    attacker.hp_string()
                );
                ctx.write(&text);
            }
            passthrough(ctx)
        }

        Behavior::RouletteBonus => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let Some(attacker) = ctx.attacker.as_deref_mut() else {
                return ModifierResult::Damage(damage);
            };
            let category = DamageCategory::ALL[(attacker.roll(8) - 1) as usize];
            ModifierResult::Damage(damage.add_category(category, m.strength))
        }

        Behavior::GrantDivineRevive { charge } => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity
                    .timed_modifiers_mut()
                    .push(Modifier::timed(charge, m.strength, 1));
            }
            ModifierResult::Applied
        }

        Behavior::DivineSpark => {
            if let Some(defender) = ctx.defender.as_deref_mut() {
                if defender.is_dead() {
                    let heal = (defender.max_hp() as f64 * m.fstrength()) as i32;
                    defender.modify_hp(heal, false);
                    let text = format!(
                        "The Idiot God blessing revives {}! ({})",
                        defender.name(),
                        defender.hp_string()
                    );
                    ctx.write(&text);
                } else {
                    m.duration += 1;
                }
            }
            ModifierResult::Applied
        }

        Behavior::Brutal => {
            if let Some(target) = ctx.defender.as_deref_mut() {
                target.modify_hp(-m.strength, false);
                let text = format!(
                    "{} is brutalized for {} dmg. ({})",
                    target.name(),
                    m.strength,
                    target.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::Ferocity => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            if let Some(attacker) = ctx.attacker.as_deref_mut() {
                attacker.modify_hp(-m.strength, false);
                let text = format!(
                    "{} loses {} HP from the ferocity of the attack. ({})",
                    attacker.name(),
                    m.strength,
                    attacker.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Damage(damage.scale(1.0 + m.strength as f64 / 10.0))
        }

        Behavior::Regenerate => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity.modify_hp(m.strength, false);
                let text = format!(
                    "{} regenerates {} HP. ({})",
                    entity.name(),
                    m.strength,
                    entity.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::ArtifactSynergy => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let Some(attacker) = ctx.attacker.as_deref() else {
                return ModifierResult::Damage(damage);
            };
            if attacker.is_player() {
                let artifacts = attacker.artifact_count();
                if artifacts > 0 {
                    ModifierResult::Damage(damage.scale(1.0 + m.fstrength() * artifacts as f64))
                } else {
                    ModifierResult::Damage(damage)
                }
            } else {
                ModifierResult::Damage(damage.scale(1.5))
            }
        }

        Behavior::DreadAura => {
            if let Some(opponent) = ctx.opponent.as_deref_mut() {
                opponent.modify_hp(-m.strength, false);
                let text = format!(
                    "{} takes {} Dread damage. ({})",
                    opponent.name(),
                    m.strength,
                    opponent.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::Akimbo => {
            scale_if_equipped(m, ctx, 1.2, |a| a.has_offhand_weapon())
        }

        Behavior::SummonShade { shade } => {
            if let Some(entity) = ctx.entity.as_deref_mut() {
                entity
                    .timed_modifiers_mut()
                    .push(Modifier::permanent(shade, m.strength));
                let text = format!("A Shade Helper spawns for {}", entity.name());
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::ShadeStrike => {
            let owner_name = match ctx.entity.as_deref_mut() {
                Some(entity) => {
                    if entity.roll(100) >= 40 {
                        return ModifierResult::Applied;
                    }
                    entity.name().to_string()
                }
                None => return ModifierResult::Applied,
            };
            if let Some(opponent) = ctx.opponent.as_deref_mut() {
                opponent.modify_hp(-m.strength, false);
                let text = format!(
                    "{}'s Shade Helper attacks {} for {} damage ({}).",
                    owner_name,
                    opponent.name(),
                    m.strength,
                    opponent.hp_string()
                );
                ctx.write(&text);
            }
            ModifierResult::Applied
        }

        Behavior::PlayerBane => {
            let Some(damage) = ctx.damage else {
                return ModifierResult::Applied;
            };
            let is_player = ctx
                .defender
                .as_deref()
                .map(|d| d.is_player())
                .unwrap_or(false);
            if is_player {
                ModifierResult::Damage(damage.scale(1.0 + m.fstrength()))
            } else {
                ModifierResult::Damage(damage)
            }
        }
    }
}

/// Hand the in-flight damage back untouched, or report `Applied` when the
/// phase carried none
fn passthrough(ctx: &ModifierContext<'_>) -> ModifierResult {
    match ctx.damage {
        Some(damage) => ModifierResult::Damage(damage),
        None => ModifierResult::Applied,
    }
}

/// Shared body of the two offhand-conditional effects. Non-players get the
/// fixed `npc_factor`; players get `strength%` when the predicate holds.
fn scale_if_equipped(
    m: &Modifier,
    ctx: &mut ModifierContext<'_>,
    npc_factor: f64,
    equipped: impl Fn(&dyn crate::actor::CombatActor) -> bool,
) -> ModifierResult {
    let Some(damage) = ctx.damage else {
        return ModifierResult::Applied;
    };
    let Some(attacker) = ctx.attacker.as_deref() else {
        return ModifierResult::Damage(damage);
    };
    if attacker.is_player() {
        if equipped(attacker) {
            ModifierResult::Damage(damage.scale(1.0 + m.fstrength()))
        } else {
            ModifierResult::Damage(damage)
        }
    } else {
        ModifierResult::Damage(damage.scale(npc_factor))
    }
}
