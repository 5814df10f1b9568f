// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Hot, connection-counted sharing of cold fluxion sources.
//!
//! [`ShareReplayLatest`] keeps at most one upstream connection open while it
//! has subscribers, replays the most recent value to late joiners, and drops
//! both the connection and the cached value when the last subscriber leaves.
//!
//! Sources are anything implementing [`fluxion_core::Source`]; with a runtime
//! feature enabled, [`StreamSource`] adapts any factory of fluxion streams,
//! and [`ShareReplayLatest::subscribe_stream`] hands events back out as a
//! stream.

mod logging;

pub mod replay_stream;
pub mod share_replay_latest;
pub mod share_replay_latest_ext;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub mod stream_source;

pub use replay_stream::ReplayStream;
pub use share_replay_latest::{ShareReplayLatest, ShareSubscription};
pub use share_replay_latest_ext::ShareReplayLatestExt;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use stream_source::StreamSource;
