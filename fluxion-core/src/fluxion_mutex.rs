// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The lock behind every coordinator and test double.
//!
//! `parking_lot` with `std`, `spin` without. Neither backend is reentrant
//! and neither poisons: `lock()` hands back the guard directly, so callers
//! never deal with a `PoisonError`.

#[cfg(feature = "std")]
pub use parking_lot::Mutex;

#[cfg(not(feature = "std"))]
pub use spin::Mutex;
