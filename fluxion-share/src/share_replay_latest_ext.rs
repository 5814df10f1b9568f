// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ShareReplayLatest;
use fluxion_core::Source;

/// Extension trait providing the `share_replay_latest` operator.
///
/// Implemented for every [`Source`].
pub trait ShareReplayLatestExt<T>: Source<T> + Sized + 'static
where
    T: Clone + Send + 'static,
{
    /// Shares this source among any number of subscribers, replaying the
    /// latest value to late joiners while connected.
    ///
    /// See [`ShareReplayLatest`] for the full semantics.
    fn share_replay_latest(self) -> ShareReplayLatest<T> {
        ShareReplayLatest::new(self)
    }
}

impl<T, S> ShareReplayLatestExt<T> for S
where
    S: Source<T> + 'static,
    T: Clone + Send + 'static,
{
}
