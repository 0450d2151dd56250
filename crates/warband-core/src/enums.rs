//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The human-controlled hero.
    Player,
    /// AI units fighting alongside the player.
    Ally,
    /// AI units fighting against the player.
    Enemy,
}

impl Team {
    /// Whether a unit on `self` may damage a unit on `other`.
    pub fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Enemy, Team::Player | Team::Ally) | (Team::Player | Team::Ally, Team::Enemy)
        )
    }
}

/// Unit / hero class. Drives stats, dash type and ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitClass {
    Warrior,
    /// Shield bearer; the only AI class that blocks.
    Knight,
    Archer,
    Mage,
    Cleric,
    Rogue,
    Necromancer,
}

impl UnitClass {
    pub const ALL: [UnitClass; 7] = [
        UnitClass::Warrior,
        UnitClass::Knight,
        UnitClass::Archer,
        UnitClass::Mage,
        UnitClass::Cleric,
        UnitClass::Rogue,
        UnitClass::Necromancer,
    ];

    /// Display name used in notifications.
    pub fn name(self) -> &'static str {
        match self {
            UnitClass::Warrior => "Warrior",
            UnitClass::Knight => "Knight",
            UnitClass::Archer => "Archer",
            UnitClass::Mage => "Mage",
            UnitClass::Cleric => "Cleric",
            UnitClass::Rogue => "Rogue",
            UnitClass::Necromancer => "Necromancer",
        }
    }

    /// Whether units of this class carry a shield and may enter a blocking stance.
    pub fn has_shield(self) -> bool {
        matches!(self, UnitClass::Knight)
    }
}

/// How a unit delivers its basic attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
}

/// Order given to the allied army.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllyCommand {
    /// Stay near the player, engage only nearby enemies.
    #[default]
    Follow,
    /// Engage the nearest enemy anywhere on the field.
    Charge,
}

impl AllyCommand {
    pub fn toggled(self) -> Self {
        match self {
            AllyCommand::Follow => AllyCommand::Charge,
            AllyCommand::Charge => AllyCommand::Follow,
        }
    }
}

/// Battle rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleMode {
    /// One engagement: victory once the hostile roster is wiped out.
    #[default]
    Skirmish,
    /// Escalating waves until the player falls.
    Endless,
}

/// Terminal outcome of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Player dash flavour, selected by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashKind {
    /// Ballistic jump forward, area damage on landing.
    Leap,
    /// Fast ground rush that strikes every enemy it passes through.
    Charge,
    /// Short invulnerable roll.
    Roll,
    /// Instant blink forward.
    Teleport,
}

/// Class special action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Area stun and damage around the caster.
    GroundSlam,
    /// Tight area stun with heavier stagger.
    ShieldBash,
    /// Damage burst over an area ahead of the caster.
    Meteor,
    /// Fan of arrows.
    Volley,
    /// Area heal for the caster and nearby allies.
    Sanctuary,
    /// Stealth plus a next-hit damage multiplier.
    Vanish,
    /// Raise nearby enemy corpses as allies.
    RaiseDead,
}

/// Which pipeline step owns (advances and resolves) a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player,
    Ally,
    Enemy,
    Ability,
}

/// Named phases of a normalized attack swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    Windup,
    Strike,
    Recovery,
}

/// Notification severity for the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}
