// Harness configuration
//
// Defaults match the production run against the public demo storefront;
// every knob has a consuming setter, and environment variables override
// the defaults for CI without code changes.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::driver::Engine;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://www.demoblaze.com";
const DEFAULT_FIXTURE_PATH: &str = "testdata/signup_data.csv";
const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";
const DEFAULT_MODAL_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POPUP_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_HOVER_PAUSE: Duration = Duration::from_millis(500);
const DEFAULT_SCROLL_PAUSE: Duration = Duration::from_secs(1);

/// Configuration for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Storefront the flow is exercised against.
    pub base_url: Url,
    /// Acquire sessions headless.
    pub headless: bool,
    /// Engines the suite iterates, in order.
    pub engines: Vec<Engine>,
    /// Credential fixture location.
    pub fixture_path: PathBuf,
    /// Screenshot output directory.
    pub screenshot_dir: PathBuf,
    /// Bound on the signup modal becoming visible.
    pub modal_timeout: Duration,
    /// Bound on the post-submit popup appearing.
    pub popup_timeout: Duration,
    /// Interval between condition polls.
    pub poll_interval: Duration,
    /// Pacing between category hovers; zero disables the pause.
    pub hover_pause: Duration,
    /// Settle after scrolling to the bottom; zero disables the pause.
    pub scroll_pause: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            headless: true,
            engines: Engine::ALL.to_vec(),
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            modal_timeout: DEFAULT_MODAL_TIMEOUT,
            popup_timeout: DEFAULT_POPUP_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            hover_pause: DEFAULT_HOVER_PAUSE,
            scroll_pause: DEFAULT_SCROLL_PAUSE,
        }
    }
}

impl HarnessConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus environment overrides:
    /// `STORECHECK_BASE_URL`, `STORECHECK_HEADLESS`, `STORECHECK_ENGINES`
    /// (comma-separated), and `STORECHECK_TIMEOUT_SECS` (sets both the
    /// modal and popup bounds). A present-but-unparsable variable is a
    /// configuration error, not a silent fallback.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults plus overrides drawn from `lookup`, keyed by variable
    /// name. `from_env` passes the process environment.
    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("STORECHECK_BASE_URL") {
            config.base_url = Url::parse(&raw)
                .map_err(|e| Error::Config(format!("STORECHECK_BASE_URL: {e}")))?;
        }
        if let Some(raw) = lookup("STORECHECK_HEADLESS") {
            config.headless = parse_flag("STORECHECK_HEADLESS", &raw)?;
        }
        if let Some(raw) = lookup("STORECHECK_ENGINES") {
            config.engines = parse_engines(&raw)?;
        }
        if let Some(raw) = lookup("STORECHECK_TIMEOUT_SECS") {
            let bound = parse_timeout_secs(&raw)?;
            config.modal_timeout = bound;
            config.popup_timeout = bound;
        }

        Ok(config)
    }

    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = url;
        self
    }

    pub fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    pub fn engines(mut self, engines: Vec<Engine>) -> Self {
        self.engines = engines;
        self
    }

    pub fn fixture_path(mut self, path: PathBuf) -> Self {
        self.fixture_path = path;
        self
    }

    pub fn screenshot_dir(mut self, dir: PathBuf) -> Self {
        self.screenshot_dir = dir;
        self
    }

    pub fn modal_timeout(mut self, bound: Duration) -> Self {
        self.modal_timeout = bound;
        self
    }

    pub fn popup_timeout(mut self, bound: Duration) -> Self {
        self.popup_timeout = bound;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn hover_pause(mut self, pause: Duration) -> Self {
        self.hover_pause = pause;
        self
    }

    pub fn scroll_pause(mut self, pause: Duration) -> Self {
        self.scroll_pause = pause;
        self
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(Error::Config(format!(
            "{name}: expected a boolean, found '{other}'"
        ))),
    }
}

fn parse_engines(raw: &str) -> Result<Vec<Engine>> {
    let engines = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Engine>>>()?;
    if engines.is_empty() {
        return Err(Error::Config(
            "STORECHECK_ENGINES: expected at least one engine".to_string(),
        ));
    }
    Ok(engines)
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("STORECHECK_TIMEOUT_SECS: '{raw}' is not a number")))?;
    Ok(Duration::from_secs(secs))
}
