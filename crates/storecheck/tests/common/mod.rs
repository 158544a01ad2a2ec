// Shared test support - tracing setup and scripted collaborator fakes
//
// The fakes implement the SessionFactory / Session / SignupDriver seam
// entirely in memory, driven by a per-test script, and record every
// operation in order so tests can assert sequencing and the
// release-exactly-once invariant.

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use std::future::ready;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storecheck::{
    DriverFuture, Engine, Error, HarnessConfig, Session, SessionFactory, SignupDriver,
};
use url::Url;

/// Installs a fmt subscriber once per test binary (later calls no-op).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Harness config tuned for fast, filesystem-isolated tests.
pub fn fast_config(dir: &Path) -> HarnessConfig {
    HarnessConfig::new()
        .base_url(Url::parse("https://storefront.test").expect("static URL parses"))
        .fixture_path(dir.join("testdata").join("signup_data.csv"))
        .screenshot_dir(dir.join("screenshots"))
        .modal_timeout(Duration::from_millis(200))
        .popup_timeout(Duration::from_millis(80))
        .poll_interval(Duration::from_millis(5))
        .hover_pause(Duration::ZERO)
        .scroll_pause(Duration::ZERO)
}

/// Ordered record of every collaborator operation a test triggered.
#[derive(Clone, Default)]
pub struct OpLog(Arc<Mutex<Vec<String>>>);

impl OpLog {
    pub fn record(&self, op: impl Into<String>) {
        self.0.lock().unwrap().push(op.into());
    }

    pub fn ops(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|o| *o == op).count()
    }

    pub fn last(&self) -> Option<String> {
        self.0.lock().unwrap().last().cloned()
    }

    /// Index of the first occurrence of `op`, if any.
    pub fn position(&self, op: &str) -> Option<usize> {
        self.0.lock().unwrap().iter().position(|o| o == op)
    }

    /// Asserts `before` was recorded and appears ahead of `after`.
    pub fn assert_order(&self, before: &str, after: &str) {
        let ops = self.ops();
        let b = ops.iter().position(|o| o == before);
        let a = ops.iter().position(|o| o == after);
        match (b, a) {
            (Some(b), Some(a)) => assert!(b < a, "expected '{before}' before '{after}' in {ops:?}"),
            _ => panic!("expected both '{before}' and '{after}' in {ops:?}"),
        }
    }
}

/// Per-session behavior knobs. Default is the happy path: three rendered
/// categories, an immediately visible modal, a success alert on the first
/// poll, and a clean close.
#[derive(Clone)]
pub struct SessionScript {
    pub categories: Vec<String>,
    pub fail_enumeration: bool,
    pub fail_hover: bool,
    pub fail_scroll: bool,
    pub fail_goto: bool,
    pub fail_maximize: bool,
    pub fail_open_panel: bool,
    /// Polls of `signup_modal_visible` that report hidden before the
    /// modal shows up.
    pub modal_visible_after_polls: usize,
    pub modal_never_visible: bool,
    pub fail_fill: bool,
    pub fail_submit: bool,
    /// Alert text the page eventually raises; `None` means no alert ever
    /// appears.
    pub alert_text: Option<String>,
    /// Polls of `active_alert_text` that report no alert before it shows.
    pub alert_after_polls: usize,
    pub fail_accept: bool,
    pub screenshot_bytes: Vec<u8>,
    pub fail_screenshot: bool,
    pub fail_close: bool,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            categories: vec![
                "Phones".to_string(),
                "Laptops".to_string(),
                "Monitors".to_string(),
            ],
            fail_enumeration: false,
            fail_hover: false,
            fail_scroll: false,
            fail_goto: false,
            fail_maximize: false,
            fail_open_panel: false,
            modal_visible_after_polls: 0,
            modal_never_visible: false,
            fail_fill: false,
            fail_submit: false,
            alert_text: Some("Sign up successful.".to_string()),
            alert_after_polls: 0,
            fail_accept: false,
            screenshot_bytes: b"fake-png-bytes".to_vec(),
            fail_screenshot: false,
            fail_close: false,
        }
    }
}

fn done<T: Send + 'static>(result: storecheck::Result<T>) -> DriverFuture<'static, T> {
    Box::pin(ready(result))
}

fn driver_err<T: Send + 'static>(message: &str) -> DriverFuture<'static, T> {
    done(Err(Error::Driver(message.to_string())))
}

/// In-memory browser session following its [`SessionScript`].
pub struct ScriptedSession {
    engine: Engine,
    script: SessionScript,
    log: OpLog,
    modal_polls: AtomicUsize,
    alert_polls: AtomicUsize,
}

impl ScriptedSession {
    fn new(engine: Engine, script: SessionScript, log: OpLog) -> Self {
        Self {
            engine,
            script,
            log,
            modal_polls: AtomicUsize::new(0),
            alert_polls: AtomicUsize::new(0),
        }
    }
}

impl Session for ScriptedSession {
    fn engine(&self) -> Engine {
        self.engine
    }

    fn goto(&self, url: &Url) -> DriverFuture<'_, ()> {
        self.log.record(format!("goto:{url}"));
        if self.script.fail_goto {
            return driver_err("navigation refused");
        }
        done(Ok(()))
    }

    fn maximize(&self) -> DriverFuture<'_, ()> {
        self.log.record("maximize");
        if self.script.fail_maximize {
            return driver_err("viewport stuck");
        }
        done(Ok(()))
    }

    fn category_labels(&self) -> DriverFuture<'_, Vec<String>> {
        self.log.record("category_labels");
        if self.script.fail_enumeration {
            return driver_err("category list unreachable");
        }
        done(Ok(self.script.categories.clone()))
    }

    fn hover_category(&self, index: usize) -> DriverFuture<'_, ()> {
        self.log.record(format!("hover:{index}"));
        if self.script.fail_hover {
            return driver_err("pointer move rejected");
        }
        done(Ok(()))
    }

    fn scroll_to_bottom(&self) -> DriverFuture<'_, ()> {
        self.log.record("scroll_bottom");
        if self.script.fail_scroll {
            return driver_err("scroll script failed");
        }
        done(Ok(()))
    }

    fn scroll_to_top(&self) -> DriverFuture<'_, ()> {
        self.log.record("scroll_top");
        if self.script.fail_scroll {
            return driver_err("scroll script failed");
        }
        done(Ok(()))
    }

    fn active_alert_text(&self) -> DriverFuture<'_, Option<String>> {
        self.log.record("alert_poll");
        let polls = self.alert_polls.fetch_add(1, Ordering::SeqCst);
        let text = match &self.script.alert_text {
            Some(text) if polls >= self.script.alert_after_polls => Some(text.clone()),
            _ => None,
        };
        done(Ok(text))
    }

    fn accept_alert(&self) -> DriverFuture<'_, ()> {
        self.log.record("accept_alert");
        if self.script.fail_accept {
            return driver_err("alert vanished before accept");
        }
        done(Ok(()))
    }

    fn screenshot(&self) -> DriverFuture<'_, Vec<u8>> {
        self.log.record("screenshot");
        if self.script.fail_screenshot {
            return driver_err("capture failed");
        }
        done(Ok(self.script.screenshot_bytes.clone()))
    }

    fn close(&self) -> DriverFuture<'_, ()> {
        self.log.record("close");
        if self.script.fail_close {
            return driver_err("browser refused to quit");
        }
        done(Ok(()))
    }

    fn signup(&self) -> &dyn SignupDriver {
        self
    }
}

impl SignupDriver for ScriptedSession {
    fn open_signup_panel(&self) -> DriverFuture<'_, ()> {
        self.log.record("open_panel");
        if self.script.fail_open_panel {
            return done(Err(Error::ElementNotFound("signup trigger".to_string())));
        }
        done(Ok(()))
    }

    fn signup_modal_visible(&self) -> DriverFuture<'_, bool> {
        self.log.record("modal_visible");
        let polls = self.modal_polls.fetch_add(1, Ordering::SeqCst);
        let visible =
            !self.script.modal_never_visible && polls >= self.script.modal_visible_after_polls;
        done(Ok(visible))
    }

    fn fill_credentials(&self, identifier: &str, _secret: &str) -> DriverFuture<'_, ()> {
        self.log.record(format!("fill:{identifier}"));
        if self.script.fail_fill {
            return done(Err(Error::ElementNotFound("username field".to_string())));
        }
        done(Ok(()))
    }

    fn submit(&self) -> DriverFuture<'_, ()> {
        self.log.record("submit");
        if self.script.fail_submit {
            return driver_err("submit click intercepted");
        }
        done(Ok(()))
    }
}

/// Factory handing out [`ScriptedSession`]s, with optional per-engine
/// unavailability.
pub struct ScriptedFactory {
    script: SessionScript,
    unavailable: Vec<Engine>,
    log: OpLog,
}

impl ScriptedFactory {
    pub fn new(script: SessionScript) -> Self {
        Self {
            script,
            unavailable: Vec::new(),
            log: OpLog::default(),
        }
    }

    /// Marks `engine` as not installed on the host.
    pub fn with_unavailable(mut self, engine: Engine) -> Self {
        self.unavailable.push(engine);
        self
    }

    /// Shared handle to the ordered operation log.
    pub fn log(&self) -> OpLog {
        self.log.clone()
    }
}

impl SessionFactory for ScriptedFactory {
    fn acquire(&self, engine: Engine, headless: bool) -> DriverFuture<'_, Box<dyn Session>> {
        self.log.record(format!("acquire:{engine}:headless={headless}"));
        if self.unavailable.contains(&engine) {
            return done(Err(Error::SessionAcquisition {
                engine: engine.name().to_string(),
                reason: "engine not installed on host".to_string(),
            }));
        }
        let session = ScriptedSession::new(engine, self.script.clone(), self.log.clone());
        done(Ok(Box::new(session) as Box<dyn Session>))
    }
}
