//! Dice used to resolve attack and defense rolls.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DiceType {
    D4,
    D6,
}

impl DiceType {
    pub const fn max_face(self) -> u32 {
        match self {
            DiceType::D4 => 4,
            DiceType::D6 => 6,
        }
    }
}

/// Which die a player rolls for attack and which for defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceAssignment {
    pub attack: DiceType,
    pub defense: DiceType,
}

impl DiceAssignment {
    pub const ATTACK_D6: Self = Self {
        attack: DiceType::D6,
        defense: DiceType::D4,
    };
    pub const DEFENSE_D6: Self = Self {
        attack: DiceType::D4,
        defense: DiceType::D6,
    };
}

impl Default for DiceAssignment {
    fn default() -> Self {
        Self::ATTACK_D6
    }
}

/// Whether a roll resolved an attack or a defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RollKind {
    Attack,
    Defense,
}
