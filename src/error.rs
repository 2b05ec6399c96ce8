// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use thiserror::Error;

/// Errors surfaced by the cache.
///
/// These are all caller-input problems, raised synchronously before any
/// mutation takes place. Absent keys are not errors: `get` returns `None`
/// and `remove` returns `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Dissonance must lie in `[0.0, 1.0]`.
    #[error("dissonance {value} outside [0.0, 1.0]")]
    InvalidDissonance { value: f64 },

    /// Capacity must be positive at construction.
    #[error("capacity must be greater than zero")]
    InvalidCapacity,
}
