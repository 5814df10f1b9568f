// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core vocabulary shared by fluxion sources and subscribers.
//!
//! - [`Event`] is the three-kind notification (`Next`, `Error`, `Completed`)
//!   exchanged between producers and observers.
//! - [`Observer`], [`Disposable`] and [`Source`] are the seams a multicast
//!   coordinator is built against.
//! - [`Bag`] is the insertion-ordered multiset that holds registered observers.
//! - [`CancellationToken`] and [`FluxionTask`] drive background producers.

extern crate alloc;

pub mod bag;
pub mod cancellation_token;
pub mod disposable;
pub mod event;
pub mod fluxion_error;
pub mod fluxion_mutex;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub mod fluxion_task;
pub mod observer;
pub mod source;
pub mod stream_item;

pub use self::bag::{Bag, BagKey};
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::disposable::{Connection, Disposable, DisposeFn};
pub use self::event::Event;
pub use self::fluxion_error::{FluxionError, Result};
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use self::fluxion_task::FluxionTask;
pub use self::observer::Observer;
pub use self::source::Source;
pub use self::stream_item::StreamItem;
