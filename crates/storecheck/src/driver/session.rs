// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Browser session collaborator - engine selection, acquisition, and the
// per-case session handle the orchestrator drives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::driver::{DriverFuture, SignupDriver};
use crate::error::{Error, Result};

/// Browser engine class a session is bound to.
///
/// The harness exercises the signup flow once per engine. `Webkit` covers
/// the WebKit/Edge-class slot of the default matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Chromium,
    Webkit,
    Firefox,
}

impl Engine {
    /// All supported engines, in the order the default suite runs them.
    pub const ALL: [Engine; 3] = [Engine::Chromium, Engine::Webkit, Engine::Firefox];

    /// Returns the engine name ("chromium", "webkit", or "firefox").
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Chromium => "chromium",
            Engine::Webkit => "webkit",
            Engine::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "chromium" => Ok(Engine::Chromium),
            "webkit" => Ok(Engine::Webkit),
            "firefox" => Ok(Engine::Firefox),
            other => Err(Error::Config(format!(
                "unknown engine '{other}' (expected chromium, webkit, or firefox)"
            ))),
        }
    }
}

/// Provisions isolated browser sessions.
///
/// Every `acquire` call must produce an independent session with no state
/// shared with previously returned ones. An engine that is unavailable on
/// the host must surface as [`Error::SessionAcquisition`] rather than a
/// hang; the orchestrator treats that as fatal to the one requesting case.
///
/// Binary discovery and driver management are the implementation's
/// concern and invisible to the harness.
pub trait SessionFactory: Send + Sync {
    /// Acquires a ready session for `engine`, headless when asked.
    fn acquire(&self, engine: Engine, headless: bool) -> DriverFuture<'_, Box<dyn Session>>;
}

/// An isolated browser instance bound to one (engine, headless) pair.
///
/// Exactly one credential record is processed per session, and the
/// session must be released exactly once on every exit path; the harness
/// enforces the latter through [`SessionGuard`].
///
/// Hover and scroll operations are exploratory liveness probes: the
/// orchestrator downgrades their failures to warnings, so implementations
/// should report honest errors and not paper over them.
pub trait Session: Send + Sync {
    /// Engine this session was acquired for.
    fn engine(&self) -> Engine;

    /// Navigates to `url` and waits for the page to be ready.
    fn goto(&self, url: &Url) -> DriverFuture<'_, ()>;

    /// Grows the viewport to the largest size the environment allows.
    fn maximize(&self) -> DriverFuture<'_, ()>;

    /// Labels of the top-level category entries currently rendered.
    ///
    /// An empty list is a valid result (flagged as a warning upstream,
    /// never an error).
    fn category_labels(&self) -> DriverFuture<'_, Vec<String>>;

    /// Moves pointer focus onto the category at `index` (as ordered by
    /// the most recent `category_labels` call).
    fn hover_category(&self, index: usize) -> DriverFuture<'_, ()>;

    /// Scrolls the viewport to its maximum vertical extent.
    fn scroll_to_bottom(&self) -> DriverFuture<'_, ()>;

    /// Scrolls the viewport back to the origin.
    fn scroll_to_top(&self) -> DriverFuture<'_, ()>;

    /// Text of the currently displayed browser-native alert, if any.
    ///
    /// Returns `Ok(None)` when no alert is present; the orchestrator
    /// polls this under a bound rather than sleeping a fixed delay.
    fn active_alert_text(&self) -> DriverFuture<'_, Option<String>>;

    /// Accepts (dismisses) the currently displayed alert.
    fn accept_alert(&self) -> DriverFuture<'_, ()>;

    /// Captures a full-page screenshot as PNG bytes.
    fn screenshot(&self) -> DriverFuture<'_, Vec<u8>>;

    /// Releases the session and every resource behind it.
    fn close(&self) -> DriverFuture<'_, ()>;

    /// The signup page driver bound to this session's page.
    fn signup(&self) -> &dyn SignupDriver;
}

/// Scoped-release wrapper around an acquired [`Session`].
///
/// The happy path consumes the guard via [`SessionGuard::close`]. If the
/// guard is dropped while still armed (a panic unwound past it, or the
/// surrounding runner cancelled the case), release is spawned onto the
/// current runtime as a best effort so browser processes do not leak
/// across a parametrized run.
pub struct SessionGuard {
    inner: Option<Box<dyn Session>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self {
            inner: Some(session),
        }
    }

    /// The guarded session.
    pub fn session(&self) -> &dyn Session {
        self.inner
            .as_deref()
            .expect("close() consumes the guard - inner is always armed here")
    }

    /// Releases the session exactly once.
    pub async fn close(mut self) -> Result<()> {
        match self.inner.take() {
            Some(session) => session.close().await,
            None => Ok(()),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(session) = self.inner.take() {
            tracing::warn!(
                engine = %session.engine(),
                "session guard dropped without explicit close; releasing in background"
            );
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(error) = session.close().await {
                        tracing::warn!(%error, "background session release failed");
                    }
                });
            }
        }
    }
}
