//! Standard effect catalog
//!
//! Builds the full registry in one explicit, fixed order so ids are
//! reproducible: first the 32 auto-derived category modifiers (8 categories
//! x attack/defend, multiplier then flat bonus), then the named effects.
//! Internal sub-effect variants are registered immediately before the
//! effect that spawns them, since the spawner's behavior holds the
//! sub-effect's spec.

use crate::damage::DamageCategory;
use crate::modifier::{Behavior, ModifierDef};
use crate::registry::{ModifierRegistry, RegistryError};
use crate::types::{Phase, Rarity};

/// Which side of an exchange a category modifier is generated for
#[derive(Clone, Copy, PartialEq)]
enum Side {
    Attack,
    Defend,
}

impl Side {
    fn phase(self) -> Phase {
        match self {
            Side::Attack => Phase::PreAttack,
            Side::Defend => Phase::PreDefend,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Side::Attack => "damage",
            Side::Defend => "resistance",
        }
    }
}

fn category_mult(category: DamageCategory, side: Side) -> ModifierDef {
    let name = match side {
        Side::Attack => format!("{} Affinity", category.title()),
        Side::Defend => format!("{} Resistant", category.title()),
    };
    let description = format!("Increases {} {} by {{str}}%", category.label(), side.noun());
    ModifierDef::new(
        name,
        description,
        Some(Rarity::Common),
        side.phase(),
        Behavior::CategoryMult { category },
    )
    .with_strength_range(1, 100)
    .with_scaling(2.0)
}

fn category_bonus(category: DamageCategory, side: Side) -> ModifierDef {
    let name = match side {
        Side::Attack => format!("{} Optimized", category.title()),
        Side::Defend => format!("{} Shielded", category.title()),
    };
    let description = format!("{} {} +{{str}}", category.label(), side.noun());
    ModifierDef::new(
        name,
        description,
        Some(Rarity::Common),
        side.phase(),
        Behavior::CategoryBonus { category },
    )
    .with_op_order(1)
    .with_scaling(2.0)
}

fn category_absorb(category: DamageCategory) -> ModifierDef {
    ModifierDef::new(
        format!("{} Absorption", category.title()),
        format!(
            "absorb {{str}}% of incoming {} damage as HP",
            category.label()
        ),
        Some(Rarity::Uncommon),
        Phase::MidDefend,
        Behavior::CategoryAbsorb { category },
    )
    .with_strength_range(1, 100)
    .with_scaling(2.0)
}

/// Build the standard catalog. Call once at startup.
pub fn standard_catalog() -> Result<ModifierRegistry, RegistryError> {
    let mut reg = ModifierRegistry::new();

    // 32 auto-derived category modifiers
    for side in [Side::Attack, Side::Defend] {
        for category in DamageCategory::ALL {
            reg.register(category_mult(category, side))?;
        }
    }
    for side in [Side::Attack, Side::Defend] {
        for category in DamageCategory::ALL {
            reg.register(category_bonus(category, side))?;
        }
    }

    reg.register(
        ModifierDef::new(
            "Sneak Attack",
            "Deal {str} bonus damage of each type if the target is at full health",
            Some(Rarity::Uncommon),
            Phase::PreAttack,
            Behavior::SneakAttack,
        )
        .with_op_order(1)
        .with_scaling(0.5),
    )?;

    reg.register(
        ModifierDef::new(
            "Obliteration",
            "Instantly kill the target if its health is below {str}%",
            Some(Rarity::Rare),
            Phase::PreAttack,
            Behavior::Execute,
        )
        .with_strength_range(1, 50)
        .with_scaling(5.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Berserk",
            "Doubles damage if HP goes under {str}%.",
            Some(Rarity::Uncommon),
            Phase::PreAttack,
            Behavior::Berserk,
        )
        .with_strength_range(1, 60)
        .with_scaling(2.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Chaos Brand",
            "Randomly scales the attack damage by a number in a range from 80% to {str}%",
            Some(Rarity::Uncommon),
            Phase::PreAttack,
            Behavior::ChaosBrand,
        )
        .with_strength_range(100, 200)
        .with_scaling(0.5),
    )?;

    reg.register(
        ModifierDef::new(
            "Lucky Hit",
            "Gives 20% chance of dealing {str}% damage",
            Some(Rarity::Uncommon),
            Phase::PreAttack,
            Behavior::LuckyHit,
        )
        .with_strength_range(100, 500)
        .with_scaling(0.6),
    )?;

    let poison_tick = reg.register(ModifierDef::new(
        "Poison",
        "Takes {str} poison damage at the start of each turn",
        None,
        Phase::TurnStart,
        Behavior::PoisonTick,
    ))?;
    reg.register(
        ModifierDef::new(
            "Poison Tipped",
            "Inflicts the target with poison for {str} turns (2 x {str} damage per turn)",
            Some(Rarity::Rare),
            Phase::PreAttack,
            Behavior::InflictPoison { tick: poison_tick },
        )
        .with_strength_range(1, 10)
        .with_scaling(10.0),
    )?;

    let barrier = reg.register(ModifierDef::new(
        "Eldritch Barrier",
        "Nullifies incoming hits while charges remain",
        None,
        Phase::MidDefend,
        Behavior::ShieldBarrier,
    ))?;
    reg.register(
        ModifierDef::new(
            "Eldritch Shield",
            "Any hits will only do 1 damage for the first {str} attacks received.",
            Some(Rarity::Rare),
            Phase::CombatStart,
            Behavior::GrantShield { barrier },
        )
        .with_strength_range(1, 3)
        .with_scaling(30.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Vampiric",
            "Gains {str}% of the damage dealt as hp",
            Some(Rarity::Legendary),
            Phase::PostAttack,
            Behavior::Vampiric,
        )
        .with_strength_range(1, 10)
        .with_scaling(20.0),
    )?;

    let second_wind = reg.register(ModifierDef::new(
        "Second Wind",
        "Revives at half max HP when killed",
        None,
        Phase::PostDefend,
        Behavior::SecondWind,
    ))?;
    reg.register(
        ModifierDef::new(
            "Unyielding Will",
            "Gives {str} free revives per combat",
            Some(Rarity::Legendary),
            Phase::CombatStart,
            Behavior::GrantRevives {
                charge: second_wind,
            },
        )
        .with_strength_range(1, 2)
        .with_scaling(80.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Blood Thirst",
            "Gain {str} HP at the start of combat.",
            Some(Rarity::Rare),
            Phase::CombatStart,
            Behavior::BloodThirst,
        )
        .with_strength_range(1, 20)
        .with_scaling(5.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Blessed",
            "Increases max HP by {str}%.",
            Some(Rarity::Uncommon),
            Phase::MaxHp,
            Behavior::MaxHpBoost,
        )
        .with_strength_range(1, 50)
        .with_scaling(2.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Bashing",
            "Deal {str}% more damage if a shield is equipped in the secondary slot",
            Some(Rarity::Legendary),
            Phase::PreAttack,
            Behavior::Bashing,
        )
        .with_strength_range(1, 50)
        .with_scaling(2.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Thorns",
            "Any attacker will receive {str} damage.",
            Some(Rarity::Uncommon),
            Phase::PreDefend,
            Behavior::Thorns,
        )
        .with_scaling(5.0),
    )?;

    for category in [
        DamageCategory::Fire,
        DamageCategory::Acid,
        DamageCategory::Freeze,
        DamageCategory::Electric,
    ] {
        reg.register(category_absorb(category))?;
    }

    reg.register(
        ModifierDef::new(
            "Roulette Attack",
            "Deal +{str} damage of a random type",
            Some(Rarity::Rare),
            Phase::PreAttack,
            Behavior::RouletteBonus,
        )
        .with_scaling(3.5),
    )?;

    let divine_spark = reg.register(ModifierDef::new(
        "Divine Spark",
        "Revives at {str}% max HP when killed",
        None,
        Phase::PostDefend,
        Behavior::DivineSpark,
    ))?;
    reg.register(
        ModifierDef::new(
            "Idiot God Blessing",
            "Gives you 1 free revive per combat (restores {str}% hp).",
            Some(Rarity::Legendary),
            Phase::CombatStart,
            Behavior::GrantDivineRevive {
                charge: divine_spark,
            },
        )
        .with_strength_range(10, 100)
        .with_scaling(5.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Brutality",
            "Deal +{str} unblockable damage",
            Some(Rarity::Uncommon),
            Phase::PostAttack,
            Behavior::Brutal,
        )
        .with_scaling(3.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Ferocity",
            "Deal {str}0% more damage but also take {str} damage when attacking",
            Some(Rarity::Rare),
            Phase::PreAttack,
            Behavior::Ferocity,
        )
        .with_strength_range(1, 10)
        .with_scaling(10.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Lamb's Embrace",
            "Regenerate {str} HP at the start of the turn",
            Some(Rarity::Rare),
            Phase::TurnStart,
            Behavior::Regenerate,
        )
        .with_scaling(3.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Eldritch Synergy",
            "Deal {str}% more damage for each owned artifact",
            Some(Rarity::Legendary),
            Phase::PreAttack,
            Behavior::ArtifactSynergy,
        )
        .with_scaling(4.0),
    )?;

    reg.register(
        ModifierDef::new(
            "Dread Aura",
            "Deal {str} damage at the start of your turn",
            Some(Rarity::Uncommon),
            Phase::TurnStart,
            Behavior::DreadAura,
        )
        .with_scaling(1.5),
    )?;

    reg.register(
        ModifierDef::new(
            "Akimbo",
            "Deal {str}% more damage if you have weapons in both primary & secondary slots",
            Some(Rarity::Legendary),
            Phase::PreAttack,
            Behavior::Akimbo,
        )
        .with_strength_range(1, 50)
        .with_scaling(2.0),
    )?;

    reg.register(category_absorb(DamageCategory::Occult))?;

    reg.register(
        ModifierDef::new(
            "Hearth-breaker",
            "Deal {str}% more damage if the target of the attack is a Player/Shade",
            Some(Rarity::Rare),
            Phase::PreAttack,
            Behavior::PlayerBane,
        )
        .with_strength_range(1, 100)
        .with_scaling(2.0),
    )?;

    let shade = reg.register(ModifierDef::new(
        "Shade",
        "40% chance of dealing {str} unblockable damage each turn",
        None,
        Phase::TurnStart,
        Behavior::ShadeStrike,
    ))?;
    reg.register(
        ModifierDef::new(
            "Shade Helper",
            "Grants a Shade helper that has a 40% chance of dealing {str} unblockable damage.",
            Some(Rarity::Legendary),
            Phase::CombatStart,
            Behavior::SummonShade { shade },
        )
        .with_scaling(0.3),
    )?;

    Ok(reg)
}
