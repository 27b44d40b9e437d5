// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The motion loop always comes to rest.

use kurbo::{Point, Vec2};
use proptest::prelude::*;
use scatter_motion::{MotionController, MotionInput, PointerTarget, StepOutcome};

fn run(m: &mut MotionController, limit: usize) -> Option<usize> {
    (1..=limit).find(|_| m.step() == StepOutcome::Idle)
}

proptest! {
    #[test]
    fn glide_converges_monotonically(tx in -5000.0_f64..5000.0, ty in -5000.0_f64..5000.0) {
        let mut m = MotionController::default();
        m.animate_pan_to(Vec2::new(tx, ty));
        let mut last = (m.target() - m.pan()).hypot();
        for _ in 0..80 {
            let outcome = m.step();
            let gap = (m.target() - m.pan()).hypot();
            prop_assert!(gap <= last);
            last = gap;
            if outcome == StepOutcome::Idle {
                break;
            }
        }
        prop_assert!(!m.is_active(), "5000 units must settle within 80 frames");
        prop_assert_eq!(m.pan(), Vec2::new(tx, ty));
    }

    #[test]
    fn wheel_flings_stop(
        deltas in prop::collection::vec((-500.0_f64..500.0, -500.0_f64..500.0), 1..12),
    ) {
        let mut m = MotionController::default();
        for (dx, dy) in deltas {
            m.wheel(Vec2::new(dx, dy));
        }
        let mut speed = m.velocity().hypot();
        while m.step() == StepOutcome::Continue {
            prop_assert!(m.velocity().hypot() <= speed);
            speed = m.velocity().hypot();
        }
        prop_assert_eq!(m.velocity(), Vec2::ZERO);
        prop_assert_eq!(m.pan(), m.target());
    }

    #[test]
    fn terminal_pointer_events_never_leave_a_drag(
        moves in prop::collection::vec((-300.0_f64..300.0, -300.0_f64..300.0), 0..20),
        cancel in any::<bool>(),
    ) {
        let mut m = MotionController::default();
        m.push(MotionInput::PointerDown {
            position: Point::ZERO,
            time: 0.0,
            target: PointerTarget::Background,
        });
        let mut time = 0.0;
        for (x, y) in moves {
            time += 16.0;
            m.push(MotionInput::PointerMove { position: Point::new(x, y), time });
        }
        time += 16.0;
        m.push(if cancel {
            MotionInput::PointerCancel { time }
        } else {
            MotionInput::PointerUp { time }
        });
        m.tick(time);
        prop_assert!(!m.is_dragging());
        prop_assert!(run(&mut m, 2_000).is_some(), "loop kept running");
    }
}
