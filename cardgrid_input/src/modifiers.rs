// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 0b0000_0001;
        /// Either Control key. Trackpads report pinch gestures as Ctrl+wheel.
        const CTRL  = 0b0000_0010;
        /// Either Alt/Option key.
        const ALT   = 0b0000_0100;
        /// Either Meta/Command/Super key.
        const META  = 0b0000_1000;
    }
}
