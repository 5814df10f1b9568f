// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FluxionError, StreamItem};

/// A single notification from a source to an observer.
///
/// A well-formed sequence is any number of `Next` events followed by at most
/// one terminal event (`Error` or `Completed`). Nothing is delivered after a
/// terminal event.
#[derive(Debug, Clone)]
pub enum Event<T> {
    /// A new value
    Next(T),
    /// The source failed; terminal
    Error(FluxionError),
    /// The source finished; terminal
    Completed,
}

impl<T: PartialEq> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Event::Next(a), Event::Next(b)) => a == b,
            (Event::Completed, Event::Completed) => true,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> Event<T> {
    /// Returns `true` if this is a `Next`.
    pub const fn is_next(&self) -> bool {
        matches!(self, Event::Next(_))
    }

    /// Returns `true` for `Error` and `Completed`.
    pub const fn is_terminal(&self) -> bool {
        !self.is_next()
    }

    /// Returns the carried value of a `Next`, `None` otherwise.
    pub fn into_next(self) -> Option<T> {
        match self {
            Event::Next(v) => Some(v),
            Event::Error(_) | Event::Completed => None,
        }
    }

    /// Maps the value of a `Next`, passing terminal events through.
    pub fn map<U, F>(self, f: F) -> Event<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Event::Next(v) => Event::Next(f(v)),
            Event::Error(e) => Event::Error(e),
            Event::Completed => Event::Completed,
        }
    }

    /// Converts to the stream representation.
    ///
    /// Returns `None` for `Completed`, which a stream expresses by ending.
    pub fn into_stream_item(self) -> Option<StreamItem<T>> {
        match self {
            Event::Next(v) => Some(StreamItem::Value(v)),
            Event::Error(e) => Some(StreamItem::Error(e)),
            Event::Completed => None,
        }
    }
}

impl<T> From<StreamItem<T>> for Event<T> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(v) => Event::Next(v),
            StreamItem::Error(e) => Event::Error(e),
        }
    }
}
