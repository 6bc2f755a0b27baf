// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Task spawning and timers.
//!
//! The pipeline never blocks and never touches a runtime directly. In the
//! browser tasks go to the microtask queue and timers to `setTimeout`; natively
//! they go to a Tokio `LocalSet`, which is also what the tests drive with
//! paused time.

use std::future::Future;
use std::time::Duration;

/// Single-threaded executor capabilities.
pub trait Platform: Clone + 'static {
    /// Run `task` to completion in the background.
    fn spawn_local<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static;

    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static;
}

/// Tokio-backed platform. Must be used inside a `tokio::task::LocalSet`.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPlatform;

#[cfg(feature = "native")]
impl Platform for TokioPlatform {
    fn spawn_local<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        drop(tokio::task::spawn_local(task));
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        tokio::time::sleep(duration)
    }
}
