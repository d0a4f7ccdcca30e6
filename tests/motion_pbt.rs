use fire_up::sim::{Arena, Blueprint, Direction, Enemy};
use glam::IVec2;
use proptest::prelude::*;

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_blueprint() -> impl Strategy<Value = Blueprint> {
    prop_oneof![
        Just(Blueprint::Basic),
        Just(Blueprint::Speedy),
        Just(Blueprint::Leaper),
        any::<bool>().prop_map(|flipped| Blueprint::Helix { flipped }),
        any::<bool>().prop_map(|flipped| Blueprint::Sine { flipped }),
        (1u32..20).prop_map(|explode_time| Blueprint::Exploder { explode_time }),
        (1u32..6, 1u32..15, 0i32..20, 2i32..20).prop_map(|(track_delay, max_moves, x, y)| {
            Blueprint::Tracker {
                track_delay,
                max_moves,
                target: IVec2::new(x, y),
            }
        }),
    ]
}

prop_compose! {
    fn arb_lane()(lane in 2i32..=20) -> i32 {
        lane
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_gauge_gate_law(
        blueprint in arb_blueprint(),
        direction in arb_direction(),
        lane in arb_lane(),
        ticks in 1usize..120
    ) {
        let arena = Arena::default();
        let mut enemy = Enemy::spawn(1, blueprint, direction, lane, &arena).unwrap();

        for _ in 0..ticks {
            let gauge = enemy.move_gauge;
            let before = enemy.footprint();
            let moved = enemy.advance();

            prop_assert_eq!(moved, gauge == enemy.move_threshold);
            if moved {
                prop_assert_eq!(enemy.move_gauge, 0);
            } else {
                prop_assert_eq!(enemy.move_gauge, gauge + 1);
                prop_assert_eq!(enemy.footprint(), before);
            }
        }
    }

    #[test]
    fn test_helix_offset_bounded_and_phase_cycles(
        direction in arb_direction(),
        lane in arb_lane(),
        flipped in any::<bool>(),
        steps in 1usize..80
    ) {
        let arena = Arena::default();
        let mut helix = Enemy::spawn(1, Blueprint::Helix { flipped }, direction, lane, &arena).unwrap();
        let mut phase = helix.oscillator().unwrap().phase;

        for _ in 0..steps {
            helix.move_gauge = helix.move_threshold;
            prop_assert!(helix.advance());

            let osc = helix.oscillator().unwrap();
            prop_assert!(osc.offset.abs() <= osc.max_offset as f32);
            prop_assert!(osc.phase < 4);
            if osc.phase != phase {
                prop_assert_eq!(osc.phase, (phase + 1) % 4);
                phase = osc.phase;
            }
        }
    }

    #[test]
    fn test_sine_offset_bounded(
        direction in arb_direction(),
        lane in arb_lane(),
        flipped in any::<bool>(),
        steps in 1usize..80
    ) {
        let arena = Arena::default();
        let mut sine = Enemy::spawn(1, Blueprint::Sine { flipped }, direction, lane, &arena).unwrap();

        for _ in 0..steps {
            sine.move_gauge = sine.move_threshold;
            sine.advance();
            let osc = sine.oscillator().unwrap();
            prop_assert!(osc.offset.abs() <= osc.max_offset as f32);
        }
    }

    #[test]
    fn test_tracker_never_exceeds_move_cap(
        track_delay in 1u32..6,
        max_moves in 1u32..15,
        start in (-1i32..=21, -1i32..=21),
        target in (0i32..20, 2i32..20),
        ticks in 1usize..300
    ) {
        let arena = Arena::default();
        let blueprint = Blueprint::Tracker {
            track_delay,
            max_moves,
            target: IVec2::new(target.0, target.1),
        };
        let mut tracker =
            Enemy::new(1, blueprint, Direction::Down, IVec2::new(start.0, start.1), &arena).unwrap();

        for _ in 0..ticks {
            tracker.advance();
            let pursuit = tracker.pursuit().unwrap();
            prop_assert!(pursuit.moves_made <= max_moves);
            if pursuit.moves_made == max_moves {
                prop_assert!(tracker.is_expired());
            }
        }
    }
}
