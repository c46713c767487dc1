// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum always decays toward rest.

use cardgrid_motion::{PhysicsConfig, ScrollPhysics};
use kurbo::Vec2;
use proptest::prelude::*;

proptest! {
    #[test]
    fn momentum_settles_without_reversing(
        vx in -80.0_f64..80.0,
        vy in -80.0_f64..80.0,
        frame in 4.0_f64..40.0,
    ) {
        let mut physics = ScrollPhysics::new(PhysicsConfig::default());
        physics.add_impulse(Vec2::new(vx, vy));
        let start = physics.velocity();
        physics.update(0.0);

        let mut t = 0.0;
        let mut ticks = 0;
        while physics.is_moving() {
            t += frame;
            let d = physics.update(t);
            let v = physics.velocity();
            // Sign is preserved and magnitude never grows.
            prop_assert!(v.x * start.x >= 0.0);
            prop_assert!(v.y * start.y >= 0.0);
            prop_assert!(v.x.abs() <= start.x.abs());
            prop_assert!(v.y.abs() <= start.y.abs());
            prop_assert!(d.x * start.x >= 0.0);
            ticks += 1;
            prop_assert!(ticks < 1000);
        }
    }
}
