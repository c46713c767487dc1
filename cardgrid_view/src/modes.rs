// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Which resistance band a scroll position falls into along one axis.
///
/// Reported by [`crate::BoundaryManager::zones`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ElasticZone {
    /// Inside the scrollable range; movement is unattenuated.
    #[default]
    Free,
    /// Past an edge by no more than the elastic limit; half resistance.
    Soft,
    /// Past an edge by more than the elastic limit; strong resistance.
    Hard,
}
