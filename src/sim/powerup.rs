//! Power-up drops, pickup effects and buff timers

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{GameEvent, GameState, Pickup, PickupKind, PowerState};
use crate::consts::POWER_DURATION_TICKS;

/// Chance a destroyed enemy leaves a pickup
pub const DROP_CHANCE: f64 = 0.15;
/// Pickup fall speed per tick
pub const PICKUP_FALL_SPEED: f32 = 2.2;

/// Roll the drop chance for an enemy destroyed at `pos`
pub fn roll_drop<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Option<Pickup> {
    if !rng.random_bool(DROP_CHANCE) {
        return None;
    }
    let kind = *PickupKind::ALL.choose(rng)?;
    Some(Pickup {
        pos,
        vy: PICKUP_FALL_SPEED,
        kind,
    })
}

/// Apply a collected pickup
///
/// Timed buffs restart their countdown at full duration; they never stack.
pub fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    match kind {
        PickupKind::Wide => {
            state.power.wide_shot = true;
            state.power.wide_ticks = POWER_DURATION_TICKS;
        }
        PickupKind::Rapid => {
            state.power.rapid_fire = true;
            state.power.rapid_ticks = POWER_DURATION_TICKS;
        }
        PickupKind::Bomb => {
            log::debug!("Bomb cleared {} enemy bullets", state.enemy_bullets.len());
            state.enemy_bullets.clear();
        }
    }
    state.events.push(GameEvent::PickupCollected { kind });
}

/// Count down active buffs; a buff switches off when its counter hits zero
pub fn tick_timers(power: &mut PowerState) {
    if power.wide_ticks > 0 {
        power.wide_ticks -= 1;
        if power.wide_ticks == 0 {
            power.wide_shot = false;
        }
    }
    if power.rapid_ticks > 0 {
        power.rapid_ticks -= 1;
        if power.rapid_ticks == 0 {
            power.rapid_fire = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyBullet;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_drop_rate_and_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let pos = Vec2::new(100.0, 200.0);
        let drops: Vec<_> = (0..10_000).filter_map(|_| roll_drop(&mut rng, pos)).collect();

        // ~1500 expected
        assert!(drops.len() > 1200 && drops.len() < 1800, "got {}", drops.len());
        for kind in PickupKind::ALL {
            assert!(drops.iter().any(|d| d.kind == kind));
        }
        assert!(drops.iter().all(|d| d.pos == pos && d.vy == PICKUP_FALL_SPEED));
    }

    #[test]
    fn test_wide_pickup_resets_instead_of_stacking() {
        let mut state = GameState::new(1);
        apply_pickup(&mut state, PickupKind::Wide);
        assert!(state.power.wide_shot);
        assert_eq!(state.power.wide_ticks, POWER_DURATION_TICKS);

        for _ in 0..100 {
            tick_timers(&mut state.power);
        }
        assert_eq!(state.power.wide_ticks, POWER_DURATION_TICKS - 100);

        apply_pickup(&mut state, PickupKind::Wide);
        assert_eq!(state.power.wide_ticks, POWER_DURATION_TICKS);
        assert!(!state.power.rapid_fire, "wide does not touch rapid");
    }

    #[test]
    fn test_rapid_pickup_has_independent_timer() {
        let mut state = GameState::new(1);
        apply_pickup(&mut state, PickupKind::Wide);
        tick_timers(&mut state.power);
        apply_pickup(&mut state, PickupKind::Rapid);
        assert!(state.power.rapid_fire);
        assert_eq!(state.power.rapid_ticks, POWER_DURATION_TICKS);
        assert_eq!(state.power.wide_ticks, POWER_DURATION_TICKS - 1);
    }

    #[test]
    fn test_bomb_clears_enemy_bullets() {
        let mut state = GameState::new(1);
        for i in 0..5 {
            state.enemy_bullets.push(EnemyBullet {
                pos: Vec2::new(i as f32 * 10.0, 100.0),
                vy: 4.1,
            });
        }
        apply_pickup(&mut state, PickupKind::Bomb);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.power, PowerState::default());
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::PickupCollected { kind: PickupKind::Bomb })
        );
    }

    #[test]
    fn test_timers_expire() {
        let mut power = PowerState {
            wide_shot: true,
            rapid_fire: true,
            wide_ticks: 2,
            rapid_ticks: 1,
        };
        tick_timers(&mut power);
        assert!(power.wide_shot);
        assert!(!power.rapid_fire);
        assert_eq!(power.rapid_ticks, 0);

        tick_timers(&mut power);
        assert!(!power.wide_shot);

        // Stays at zero
        tick_timers(&mut power);
        assert_eq!(power, PowerState::default());
    }
}
