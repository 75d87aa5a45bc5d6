//! Load generations.
//!
//! Every image load gets a [`LoadToken`] from a monotonically increasing
//! counter. Only the newest token's completion is honoured; anything older
//! finishing late is reported as [`LoadError::Stale`] and never applied. A
//! token finishes at most once; a repeat is [`LoadError::Finished`].

use std::fmt;

use thiserror::Error;

use crate::decode::DecodeError;

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    /// Rebuild a token from its generation, for hosts that pass it across an FFI boundary.
    pub fn from_generation(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Errors reported when finishing a load.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    /// A newer load started after this one.
    #[error("Stale load {token}: generation {current} is current")]
    Stale { token: LoadToken, current: u64 },

    /// This load already completed or failed.
    #[error("Load {0} already finished")]
    Finished(LoadToken),

    /// The image could not be decoded.
    #[error("Image decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Hands out load tokens and tracks which one is current.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: u64,
    in_flight: bool,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating any earlier token.
    pub fn begin(&mut self) -> LoadToken {
        self.generation += 1;
        self.in_flight = true;
        LoadToken(self.generation)
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.generation
    }

    /// True between `begin` and the current token's `finish`.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Finish `token`. Fails without side effects if a newer load exists or
    /// `token` was already finished.
    pub fn finish(&mut self, token: LoadToken) -> Result<(), LoadError> {
        if !self.is_current(token) {
            return Err(LoadError::Stale {
                token,
                current: self.generation,
            });
        }
        if !self.in_flight {
            return Err(LoadError::Finished(token));
        }
        self.in_flight = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut tracker = LoadTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn test_only_latest_finishes() {
        let mut tracker = LoadTracker::new();
        let stale = tracker.begin();
        let current = tracker.begin();

        assert_eq!(
            tracker.finish(stale),
            Err(LoadError::Stale {
                token: stale,
                current: 2
            })
        );
        assert!(tracker.is_loading());

        assert!(tracker.finish(current).is_ok());
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_stale_after_finish_still_rejected() {
        let mut tracker = LoadTracker::new();
        let old = tracker.begin();
        let new = tracker.begin();
        tracker.finish(new).unwrap();
        assert!(tracker.finish(old).is_err());
    }

    #[test]
    fn test_token_finishes_once() {
        let mut tracker = LoadTracker::new();
        let token = tracker.begin();
        assert!(tracker.finish(token).is_ok());
        assert_eq!(tracker.finish(token), Err(LoadError::Finished(token)));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_token_never_issued_is_not_current() {
        let mut tracker = LoadTracker::new();
        let token = LoadToken::from_generation(0);
        assert_eq!(tracker.finish(token), Err(LoadError::Finished(token)));
    }

    #[test]
    fn test_token_from_generation() {
        let mut tracker = LoadTracker::new();
        let token = tracker.begin();
        let rebuilt = LoadToken::from_generation(token.generation());
        assert!(tracker.is_current(rebuilt));
        assert!(tracker.finish(rebuilt).is_ok());
    }

    #[test]
    fn test_error_display() {
        let mut tracker = LoadTracker::new();
        let token = tracker.begin();
        tracker.begin();
        let err = tracker.finish(token).unwrap_err();
        assert_eq!(err.to_string(), "Stale load load#1: generation 2 is current");

        let err = LoadError::Finished(LoadToken::from_generation(3));
        assert_eq!(err.to_string(), "Load load#3 already finished");

        let err: LoadError = DecodeError::InvalidFormat.into();
        assert_eq!(err.to_string(), "Image decode failed: Invalid or unsupported image format");
    }
}
