#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use crate::commands::BattleCommand;
    use crate::components::{Health, UnitState};
    use crate::config::{ArmyEntry, BattleConfig, ConfigError};
    use crate::enums::*;
    use crate::input::{InputState, Key, MouseButton};
    use crate::stats::class_stats;
    use crate::types::*;

    #[test]
    fn test_team_hostility() {
        assert!(Team::Enemy.is_hostile_to(Team::Player));
        assert!(Team::Enemy.is_hostile_to(Team::Ally));
        assert!(Team::Player.is_hostile_to(Team::Enemy));
        assert!(Team::Ally.is_hostile_to(Team::Enemy));
        assert!(!Team::Ally.is_hostile_to(Team::Player));
        assert!(!Team::Enemy.is_hostile_to(Team::Enemy));
    }

    #[test]
    fn test_only_knights_carry_shields() {
        let shielded: Vec<UnitClass> = UnitClass::ALL
            .iter()
            .copied()
            .filter(|c| c.has_shield())
            .collect();
        assert_eq!(shielded, vec![UnitClass::Knight]);
    }

    #[test]
    fn test_warrior_level_one_stats() {
        let stats = class_stats(UnitClass::Warrior, 1);
        assert_eq!(stats.max_health, 120.0);
        assert_eq!(stats.damage_min, 20.0);
        assert_eq!(stats.damage_max, 35.0);
        assert_eq!(stats.attack_type, AttackType::Melee);
        assert_eq!(stats.dash, DashKind::Leap);
        assert_eq!(stats.ability, AbilityKind::GroundSlam);
    }

    #[test]
    fn test_stats_scale_with_level() {
        let l1 = class_stats(UnitClass::Archer, 1);
        let l5 = class_stats(UnitClass::Archer, 5);
        assert!(l5.max_health > l1.max_health);
        assert!(l5.damage_max > l1.damage_max);
        // Speed and range do not scale.
        assert_eq!(l5.speed, l1.speed);
        assert_eq!(l5.range, l1.range);
        // Out-of-range levels clamp instead of panicking.
        assert_eq!(class_stats(UnitClass::Archer, 0), l1);
    }

    #[test]
    fn test_every_class_has_a_valid_cooldown_band() {
        for class in UnitClass::ALL {
            let stats = class_stats(class, 1);
            assert!(stats.cooldown_min > 0.0, "{class:?}");
            assert!(stats.cooldown_min <= stats.cooldown_max, "{class:?}");
            assert!(stats.damage_min <= stats.damage_max, "{class:?}");
            if stats.attack_type == AttackType::Ranged {
                assert!(stats.projectile_speed > 0.0, "{class:?}");
            }
        }
    }

    #[test]
    fn test_wrap_angle() {
        use std::f32::consts::PI;
        assert!((wrap_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-4);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-4);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_towards_matches_facing() {
        let from = Vec3::new(1.0, 0.0, 1.0);
        let to = Vec3::new(4.0, 0.0, -3.0);
        let facing = facing_from_yaw(yaw_towards(from, to));
        let expected = ground_direction(from, to);
        assert!((facing - expected).length() < 1e-5);
    }

    #[test]
    fn test_clamp_to_arena_pins_height() {
        let clamped = clamp_to_arena(Vec3::new(500.0, 3.0, -500.0));
        assert_eq!(clamped.y, 0.0);
        assert_eq!(clamped.x, crate::constants::ARENA_HALF_SIZE);
        assert_eq!(clamped.z, -crate::constants::ARENA_HALF_SIZE);
    }

    #[test]
    fn test_health_liveness() {
        let mut health = Health::new(40.0);
        assert!(health.is_alive());
        health.current = 0.0;
        assert!(!health.is_alive());
        assert_eq!(health.fraction(), 0.0);
    }

    #[test]
    fn test_attack_progress() {
        let state = UnitState::Attacking {
            elapsed: 0.25,
            duration: 0.5,
            hit_landed: false,
        };
        assert_eq!(state.attack_progress(), Some(0.5));
        assert_eq!(UnitState::Idle.attack_progress(), None);
        assert!(UnitState::Dead { elapsed: 0.0 }.is_dead());
    }

    #[test]
    fn test_input_deltas_consumed_once() {
        let mut input = InputState::default();
        input.add_mouse_delta(Vec2::new(3.0, 1.0));
        input.add_mouse_delta(Vec2::new(2.0, -1.0));
        input.add_wheel_delta(1.5);

        assert_eq!(input.take_mouse_delta(), Vec2::new(5.0, 0.0));
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
        assert_eq!(input.take_wheel_delta(), 1.5);
        assert_eq!(input.take_wheel_delta(), 0.0);
    }

    #[test]
    fn test_detached_input_ignores_events() {
        let mut input = InputState::default();
        input.press(Key::Forward);
        input.press_button(MouseButton::Primary);
        input.detach();

        assert!(!input.is_down(Key::Forward));
        assert!(!input.is_button_down(MouseButton::Primary));

        input.press(Key::Jump);
        input.add_mouse_delta(Vec2::ONE);
        assert!(!input.is_down(Key::Jump));
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(BattleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{
            "seed": 7,
            "mode": "Endless",
            "enemies": [{ "class": "Archer", "level": 2, "count": 3 }]
        }"#;
        let config = BattleConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.mode, BattleMode::Endless);
        assert_eq!(config.enemies, vec![ArmyEntry::new(UnitClass::Archer, 2, 3)]);
        assert_eq!(config.player_class, UnitClass::Warrior);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = BattleConfig {
            max_frame_dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrameClamp(_))
        ));

        let config = BattleConfig {
            enemies: vec![ArmyEntry::new(UnitClass::Mage, 99, 1)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LevelOutOfRange { level: 99, .. })
        ));

        let config = BattleConfig {
            allies: vec![ArmyEntry::new(UnitClass::Cleric, 1, 0)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyEntry(UnitClass::Cleric))
        ));

        assert!(matches!(
            BattleConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_command_wire_format_is_tagged() {
        let json = serde_json::to_string(&BattleCommand::TriggerAbility).unwrap();
        assert_eq!(json, r#"{"type":"TriggerAbility"}"#);
        let back: BattleCommand = serde_json::from_str(
            r#"{"type":"SetAllyCommand","command":"Charge"}"#,
        )
        .unwrap();
        assert_eq!(
            back,
            BattleCommand::SetAllyCommand {
                command: AllyCommand::Charge
            }
        );
    }
}
