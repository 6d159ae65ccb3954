//! Damage - the per-category damage/resistance value effects transform
//!
//! A `Damage` is a small Copy record of eight integer damage categories.
//! It doubles as a resistance record: subtracting one from the other is
//! how an attack is resolved against a defense. Every operation returns a
//! new value; nothing mutates a `Damage` a caller does not own.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// One of the eight damage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    Slash,
    Pierce,
    Blunt,
    Occult,
    Fire,
    Acid,
    Freeze,
    Electric,
}

impl DamageCategory {
    /// All categories, in canonical order
    pub const ALL: [DamageCategory; 8] = [
        DamageCategory::Slash,
        DamageCategory::Pierce,
        DamageCategory::Blunt,
        DamageCategory::Occult,
        DamageCategory::Fire,
        DamageCategory::Acid,
        DamageCategory::Freeze,
        DamageCategory::Electric,
    ];

    /// Lowercase label used in descriptions and log lines
    pub fn label(self) -> &'static str {
        match self {
            DamageCategory::Slash => "slash",
            DamageCategory::Pierce => "pierce",
            DamageCategory::Blunt => "blunt",
            DamageCategory::Occult => "occult",
            DamageCategory::Fire => "fire",
            DamageCategory::Acid => "acid",
            DamageCategory::Freeze => "freeze",
            DamageCategory::Electric => "electric",
        }
    }

    /// Capitalized label used in modifier names
    pub fn title(self) -> &'static str {
        match self {
            DamageCategory::Slash => "Slash",
            DamageCategory::Pierce => "Pierce",
            DamageCategory::Blunt => "Blunt",
            DamageCategory::Occult => "Occult",
            DamageCategory::Fire => "Fire",
            DamageCategory::Acid => "Acid",
            DamageCategory::Freeze => "Freeze",
            DamageCategory::Electric => "Electric",
        }
    }
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category damage (or resistance) amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub slash: i32,
    pub pierce: i32,
    pub blunt: i32,
    pub occult: i32,
    pub fire: i32,
    pub acid: i32,
    pub freeze: i32,
    pub electric: i32,
}

impl Damage {
    /// A landed attack always deals at least this much
    pub const MIN_DAMAGE: i32 = 1;

    /// All categories zero
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set one category, builder style
    pub fn with(mut self, category: DamageCategory, amount: i32) -> Self {
        *self.get_mut(category) = amount;
        self
    }

    /// Get one category's amount
    pub fn get(&self, category: DamageCategory) -> i32 {
        match category {
            DamageCategory::Slash => self.slash,
            DamageCategory::Pierce => self.pierce,
            DamageCategory::Blunt => self.blunt,
            DamageCategory::Occult => self.occult,
            DamageCategory::Fire => self.fire,
            DamageCategory::Acid => self.acid,
            DamageCategory::Freeze => self.freeze,
            DamageCategory::Electric => self.electric,
        }
    }

    fn get_mut(&mut self, category: DamageCategory) -> &mut i32 {
        match category {
            DamageCategory::Slash => &mut self.slash,
            DamageCategory::Pierce => &mut self.pierce,
            DamageCategory::Blunt => &mut self.blunt,
            DamageCategory::Occult => &mut self.occult,
            DamageCategory::Fire => &mut self.fire,
            DamageCategory::Acid => &mut self.acid,
            DamageCategory::Freeze => &mut self.freeze,
            DamageCategory::Electric => &mut self.electric,
        }
    }

    /// Raw sum over all categories
    fn raw_total(&self) -> i32 {
        DamageCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Total damage dealt by the attack, never less than [`Self::MIN_DAMAGE`]
    pub fn total(&self) -> i32 {
        self.raw_total().max(Self::MIN_DAMAGE)
    }

    /// Whether every category is zero
    pub fn is_empty(&self) -> bool {
        self.raw_total() == 0
    }

    /// Scale every category by a factor, truncating toward zero
    pub fn scale(&self, factor: f64) -> Damage {
        let mut out = *self;
        for cat in DamageCategory::ALL {
            *out.get_mut(cat) = (self.get(cat) as f64 * factor) as i32;
        }
        out
    }

    /// Scale one category by a factor, truncating toward zero
    pub fn scale_category(&self, category: DamageCategory, factor: f64) -> Damage {
        let mut out = *self;
        *out.get_mut(category) = (self.get(category) as f64 * factor) as i32;
        out
    }

    /// Add a flat amount to one category
    pub fn add_category(&self, category: DamageCategory, amount: i32) -> Damage {
        let mut out = *self;
        *out.get_mut(category) += amount;
        out
    }

    /// Add a flat bonus to every category that already deals damage.
    /// Zero categories stay zero so a bonus never invents a damage type.
    pub fn with_bonus(&self, bonus: i32) -> Damage {
        let mut out = *self;
        for cat in DamageCategory::ALL {
            if self.get(cat) != 0 {
                *out.get_mut(cat) += bonus;
            }
        }
        out
    }

    /// Spread `points` single damage points uniformly over the categories
    /// not listed in `exclude`. Used when rolling weapon and monster damage.
    pub fn generate<R: Rng>(rng: &mut R, points: u32, exclude: &[DamageCategory]) -> Damage {
        let pool: Vec<DamageCategory> = DamageCategory::ALL
            .iter()
            .copied()
            .filter(|c| !exclude.contains(c))
            .collect();
        let mut out = Damage::empty();
        if pool.is_empty() {
            return out;
        }
        for _ in 0..points {
            let cat = pool[rng.gen_range(0..pool.len())];
            *out.get_mut(cat) += 1;
        }
        out
    }
}

impl Add for Damage {
    type Output = Damage;

    fn add(self, rhs: Damage) -> Damage {
        let mut out = self;
        for cat in DamageCategory::ALL {
            *out.get_mut(cat) = self.get(cat) + rhs.get(cat);
        }
        out
    }
}

impl Sub for Damage {
    type Output = Damage;

    /// Attack-versus-resistance subtraction. Each category clamps at zero,
    /// and a category the attack never dealt stays zero no matter how much
    /// resistance the defender has.
    fn sub(self, rhs: Damage) -> Damage {
        let mut out = Damage::empty();
        for cat in DamageCategory::ALL {
            let dealt = self.get(cat);
            if dealt != 0 {
                *out.get_mut(cat) = (dealt - rhs.get(cat)).max(0);
            }
        }
        out
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cat in DamageCategory::ALL {
            let amount = self.get(cat);
            if amount > 0 {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", cat.label(), amount)?;
                first = false;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_total_has_floor_of_one() {
        assert_eq!(Damage::empty().total(), 1);
        let d = Damage::empty().with(DamageCategory::Fire, 4);
        assert_eq!(d.total(), 4);
    }

    #[test]
    fn test_scale_truncates() {
        let d = Damage::empty().with(DamageCategory::Slash, 5);
        assert_eq!(d.scale(1.5).slash, 7);
        assert_eq!(d.scale(0.5).slash, 2);
    }

    #[test]
    fn test_scale_category_leaves_others_alone() {
        let d = Damage::empty()
            .with(DamageCategory::Slash, 10)
            .with(DamageCategory::Fire, 10);
        let scaled = d.scale_category(DamageCategory::Fire, 2.0);
        assert_eq!(scaled.fire, 20);
        assert_eq!(scaled.slash, 10);
    }

    #[test]
    fn test_bonus_skips_zero_categories() {
        let d = Damage::empty().with(DamageCategory::Pierce, 3);
        let boosted = d.with_bonus(5);
        assert_eq!(boosted.pierce, 8);
        assert_eq!(boosted.slash, 0);
        assert_eq!(boosted.raw_total(), 8);
    }

    #[test]
    fn test_sub_clamps_and_respects_zero() {
        let attack = Damage::empty()
            .with(DamageCategory::Blunt, 10)
            .with(DamageCategory::Acid, 2);
        let resist = Damage::empty()
            .with(DamageCategory::Blunt, 4)
            .with(DamageCategory::Acid, 9)
            .with(DamageCategory::Fire, 50);
        let landed = attack - resist;
        assert_eq!(landed.blunt, 6);
        assert_eq!(landed.acid, 0);
        assert_eq!(landed.fire, 0);
    }

    #[test]
    fn test_generate_conserves_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let d = Damage::generate(&mut rng, 40, &[DamageCategory::Occult]);
        assert_eq!(d.raw_total(), 40);
        assert_eq!(d.occult, 0);
    }

    #[test]
    fn test_display_lists_nonzero_only() {
        let d = Damage::empty()
            .with(DamageCategory::Slash, 2)
            .with(DamageCategory::Electric, 1);
        assert_eq!(d.to_string(), "slash: 2, electric: 1");
        assert_eq!(Damage::empty().to_string(), "none");
    }
}
