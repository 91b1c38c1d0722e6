//! Score tracking. Points double as the currency for abilities.

/// Abilities bought with score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ability {
    Emp,
    Invincibility,
    Shield,
}

impl Ability {
    /// Activation requires the score to be strictly greater than this.
    pub fn threshold(self) -> u32 {
        match self {
            Ability::Emp => 20,
            Ability::Invincibility => 100,
            Ability::Shield => 50,
        }
    }

    pub fn cost(self) -> u32 {
        match self {
            Ability::Emp => 20,
            Ability::Invincibility => 100,
            Ability::Shield => 50,
        }
    }
}

/// Points for an enemy shot down.
pub const ENEMY_POINTS: u32 = 10;
/// Points for a bomb shot down or absorbed while invincible.
pub const BOMB_POINTS: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new(initial: u32) -> Self {
        Self { value: initial }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    /// Deduct `cost` if the score exceeds `threshold`. Returns whether the
    /// deduction happened; on `false` the score is untouched.
    pub fn subtract(&mut self, threshold: u32, cost: u32) -> bool {
        if self.value <= threshold {
            return false;
        }
        self.value = self.value.saturating_sub(cost);
        true
    }

    /// Pay for `ability` using its own threshold and cost.
    pub fn spend(&mut self, ability: Ability) -> bool {
        self.subtract(ability.threshold(), ability.cost())
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(10_000)
    }
}
