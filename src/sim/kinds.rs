//! Closed enums for characters, obstacles and cities, with per-kind lookup tables

use serde::{Deserialize, Serialize};

/// Playable character kinds, in shop order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum CharacterKind {
    #[default]
    Default,
    Ninja,
    Robot,
    Alien,
    Superhero,
    Flash,
    Wizard,
    Spy,
    Pirate,
    Zombie,
}

/// Physics and collision traits resolved once per runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindTraits {
    /// Multiplier applied to gravity each tick
    pub gravity_scale: f32,
    /// Multiplier applied to the jump impulse for charge-consuming jumps
    pub jump_scale: f32,
    /// Airborne bonus jump, re-armed on landing
    pub double_jump: bool,
    /// Multiplier for the bonus jump
    pub air_jump_scale: f32,
    /// Coin pickups may grant a shield
    pub shield_chance: bool,
}

impl KindTraits {
    const PLAIN: Self = Self {
        gravity_scale: 1.0,
        jump_scale: 1.0,
        double_jump: false,
        air_jump_scale: 1.0,
        shield_chance: false,
    };
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 10] = [
        CharacterKind::Default,
        CharacterKind::Ninja,
        CharacterKind::Robot,
        CharacterKind::Alien,
        CharacterKind::Superhero,
        CharacterKind::Flash,
        CharacterKind::Wizard,
        CharacterKind::Spy,
        CharacterKind::Pirate,
        CharacterKind::Zombie,
    ];

    /// Token used in the save record
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Default => "default",
            CharacterKind::Ninja => "ninja",
            CharacterKind::Robot => "robot",
            CharacterKind::Alien => "alien",
            CharacterKind::Superhero => "superhero",
            CharacterKind::Flash => "flash",
            CharacterKind::Wizard => "wizard",
            CharacterKind::Spy => "spy",
            CharacterKind::Pirate => "pirate",
            CharacterKind::Zombie => "zombie",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterKind::Default => "Default",
            CharacterKind::Ninja => "Ninja",
            CharacterKind::Robot => "Robot",
            CharacterKind::Alien => "Alien",
            CharacterKind::Superhero => "Superhero",
            CharacterKind::Flash => "Flash",
            CharacterKind::Wizard => "Wizard",
            CharacterKind::Spy => "Spy",
            CharacterKind::Pirate => "Pirate",
            CharacterKind::Zombie => "Zombie",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CharacterKind::Default => "The basic runner.",
            CharacterKind::Ninja => "Chance to gain a shield.",
            CharacterKind::Robot => "Heavy but strong.",
            CharacterKind::Alien => "Jumps with low gravity.",
            CharacterKind::Superhero => "Can perform a double jump.",
            CharacterKind::Flash => "A very fast runner.",
            CharacterKind::Wizard => "A magical runner.",
            CharacterKind::Spy => "A stealthy agent.",
            CharacterKind::Pirate => "A swashbuckling adventurer.",
            CharacterKind::Zombie => "A spooky, shambling runner.",
        }
    }

    /// Shop price in coins
    pub fn cost(&self) -> u64 {
        match self {
            CharacterKind::Default => 0,
            CharacterKind::Ninja => 100,
            CharacterKind::Robot => 200,
            CharacterKind::Alien => 300,
            CharacterKind::Superhero => 400,
            CharacterKind::Flash => 500,
            CharacterKind::Wizard => 600,
            CharacterKind::Spy => 700,
            CharacterKind::Pirate => 800,
            CharacterKind::Zombie => 900,
        }
    }

    pub fn traits(&self) -> KindTraits {
        match self {
            CharacterKind::Ninja => KindTraits {
                shield_chance: true,
                ..KindTraits::PLAIN
            },
            CharacterKind::Alien => KindTraits {
                gravity_scale: 0.3,
                jump_scale: 0.7,
                ..KindTraits::PLAIN
            },
            CharacterKind::Superhero => KindTraits {
                double_jump: true,
                air_jump_scale: 1.2,
                ..KindTraits::PLAIN
            },
            CharacterKind::Default
            | CharacterKind::Robot
            | CharacterKind::Flash
            | CharacterKind::Wizard
            | CharacterKind::Spy
            | CharacterKind::Pirate
            | CharacterKind::Zombie => KindTraits::PLAIN,
        }
    }
}

/// Street furniture the runner has to clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Trashcan,
    Bench,
    Box,
    Cone,
    Barrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Car,
        ObstacleKind::Trashcan,
        ObstacleKind::Bench,
        ObstacleKind::Box,
        ObstacleKind::Cone,
        ObstacleKind::Barrier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Car => "car",
            ObstacleKind::Trashcan => "trashcan",
            ObstacleKind::Bench => "bench",
            ObstacleKind::Box => "box",
            ObstacleKind::Cone => "cone",
            ObstacleKind::Barrier => "barrier",
        }
    }
}

/// City the run takes place in (purely visual for the core)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CityTheme {
    #[default]
    Giza,
    London,
    Paris,
    Rome,
    NewYork,
}

impl CityTheme {
    pub const ALL: [CityTheme; 5] = [
        CityTheme::Giza,
        CityTheme::London,
        CityTheme::Paris,
        CityTheme::Rome,
        CityTheme::NewYork,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CityTheme::Giza => "Giza",
            CityTheme::London => "London",
            CityTheme::Paris => "Paris",
            CityTheme::Rome => "Rome",
            CityTheme::NewYork => "New York",
        }
    }

    /// Flag drawn in the corner of the city backdrop
    pub fn nation(&self) -> &'static str {
        match self {
            CityTheme::Giza => "egypt",
            CityTheme::London => "uk",
            CityTheme::Paris => "france",
            CityTheme::Rome => "italy",
            CityTheme::NewYork => "usa",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_tokens_round_trip() {
        for kind in CharacterKind::ALL {
            assert_eq!(CharacterKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(CharacterKind::from_str(" Ninja "), Some(CharacterKind::Ninja));
        assert_eq!(CharacterKind::from_str("dragon"), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(CharacterKind::Ninja.traits().shield_chance);
        assert!(CharacterKind::Alien.traits().gravity_scale < 1.0);
        assert!(CharacterKind::Superhero.traits().double_jump);
        let plain = CharacterKind::Default.traits();
        assert!(!plain.shield_chance && plain.gravity_scale == 1.0 && !plain.double_jump);
    }

    #[test]
    fn test_costs_ascend_in_shop_order() {
        assert_eq!(CharacterKind::Default.cost(), 0);
        for pair in CharacterKind::ALL.windows(2) {
            assert!(pair[0].cost() < pair[1].cost());
        }
    }
}
