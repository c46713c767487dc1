// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in [`CellBackend`](crate::CellBackend) implementations.

#[cfg(feature = "backend_buckets")]
mod buckets;
mod flat;

#[cfg(feature = "backend_buckets")]
pub use buckets::CellBuckets;
pub use flat::FlatScan;
