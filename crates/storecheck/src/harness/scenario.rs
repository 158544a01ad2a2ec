// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Signup scenario orchestrator - runs one full signup case for one
// (engine, credential record) pair and classifies the result.

use std::path::PathBuf;
use std::time::Instant;

use crate::artifact;
use crate::config::HarnessConfig;
use crate::driver::{Engine, Session, SessionFactory, SessionGuard};
use crate::error::{Error, Result};
use crate::fixture::CredentialRecord;
use crate::harness::report::{CaseReport, Step};
use crate::outcome::Outcome;
use crate::wait;

/// Result of the driven portion of a case, with the failing step attached
/// so reports can name where a hard failure happened.
type StepResult<T> = std::result::Result<T, (Step, Error)>;

/// Runs one signup case end to end.
///
/// The case walks Start -> SessionAcquired -> ModalOpened -> Submitted ->
/// Classified -> Released; whatever happens in between, the session is
/// released before the case concludes. Hard failures (acquisition, modal
/// timeout, driver errors) fail the case; popup classifications never do.
pub struct SignupScenario<'a> {
    config: &'a HarnessConfig,
}

impl<'a> SignupScenario<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self { config }
    }

    /// Runs the full sequence for one (engine, record) pair.
    ///
    /// Never panics and never propagates: every outcome, lenient or hard,
    /// comes back as a [`CaseReport`]. Acquisition failure is fatal to
    /// this case only; sibling cases are unaffected.
    pub async fn run(
        &self,
        factory: &dyn SessionFactory,
        engine: Engine,
        record: &CredentialRecord,
    ) -> CaseReport {
        let started = Instant::now();
        tracing::info!(
            %engine,
            identifier = %record.identifier,
            "starting signup case"
        );

        let session = match factory.acquire(engine, self.config.headless).await {
            Ok(session) => session,
            Err(error) => {
                tracing::error!(%engine, identifier = %record.identifier, %error, "session acquisition failed");
                return CaseReport::failed(
                    engine,
                    &record.identifier,
                    Step::Acquire,
                    error.to_string(),
                    None,
                    elapsed_ms(started),
                );
            }
        };

        let guard = SessionGuard::new(session);
        let driven = self.drive(guard.session(), record).await;
        let released = guard.close().await;

        match (driven, released) {
            (Ok((outcome, artifact)), Ok(())) => {
                tracing::info!(
                    %engine,
                    identifier = %record.identifier,
                    %outcome,
                    "signup case completed"
                );
                CaseReport::passed(
                    engine,
                    &record.identifier,
                    outcome,
                    artifact,
                    elapsed_ms(started),
                )
            }
            (Ok((outcome, artifact)), Err(error)) => {
                // Leak-free teardown is part of the contract: a broken
                // close cannot be silent on an otherwise-green case.
                tracing::error!(%engine, identifier = %record.identifier, %outcome, %error, "session release failed");
                CaseReport::failed(
                    engine,
                    &record.identifier,
                    Step::Release,
                    error.to_string(),
                    Some(artifact),
                    elapsed_ms(started),
                )
            }
            (Err((step, error)), released) => {
                if let Err(close_error) = released {
                    tracing::warn!(%engine, %close_error, "session release failed after case error");
                }
                tracing::error!(
                    %engine,
                    identifier = %record.identifier,
                    step = %step,
                    %error,
                    "signup case failed"
                );
                CaseReport::failed(
                    engine,
                    &record.identifier,
                    step,
                    error.to_string(),
                    None,
                    elapsed_ms(started),
                )
            }
        }
    }

    async fn drive(
        &self,
        session: &dyn Session,
        record: &CredentialRecord,
    ) -> StepResult<(Outcome, PathBuf)> {
        step(Step::Navigate, session.goto(&self.config.base_url).await)?;
        step(Step::Maximize, session.maximize().await)?;

        self.hover_sweep(session).await;
        self.scroll_probe(session).await;

        let page = session.signup();
        tracing::debug!("opening signup modal");
        step(Step::OpenSignup, page.open_signup_panel().await)?;
        step(
            Step::AwaitModal,
            wait::wait_until(
                "signup modal visibility",
                self.config.modal_timeout,
                self.config.poll_interval,
                || page.signup_modal_visible(),
            )
            .await,
        )?;
        tracing::debug!("signup modal is visible");

        tracing::debug!(identifier = %record.identifier, "entering signup details");
        step(
            Step::FillCredentials,
            page.fill_credentials(&record.identifier, &record.secret).await,
        )?;
        step(Step::Submit, page.submit().await)?;
        tracing::debug!("signup submitted; watching for alert");

        let popup = step(Step::AwaitPopup, self.await_popup(session).await)?;
        let outcome = Outcome::from_popup(popup.as_deref());
        match outcome {
            Outcome::Success => tracing::info!("signup successful"),
            Outcome::AlreadyExists => {
                tracing::info!("user already exists; continuing without failure")
            }
            Outcome::NoPopup => tracing::info!("no alert appeared after signup"),
            Outcome::Unrecognized => tracing::warn!(
                alert = popup.as_deref().unwrap_or_default(),
                "unrecognized alert text; flagged for review"
            ),
        }

        let shot = step(Step::Screenshot, session.screenshot().await)?;
        let artifact = step(
            Step::Screenshot,
            artifact::save_screenshot(&self.config.screenshot_dir, &record.identifier, &shot)
                .await,
        )?;
        tracing::info!(path = %artifact.display(), "screenshot saved");

        Ok((outcome, artifact))
    }

    /// Liveness probe over the category list. Never fails the case: an
    /// empty list or a hover error is worth a warning, not a regression
    /// verdict.
    async fn hover_sweep(&self, session: &dyn Session) {
        tracing::debug!("hovering over all categories");
        let labels = match session.category_labels().await {
            Ok(labels) => labels,
            Err(error) => {
                tracing::warn!(%error, "category enumeration failed; skipping hover sweep");
                return;
            }
        };
        if labels.is_empty() {
            tracing::warn!("no category entries rendered; hover sweep skipped");
            return;
        }

        for (index, label) in labels.iter().enumerate() {
            match session.hover_category(index).await {
                Ok(()) => tracing::debug!(category = %label, "hovered over category"),
                Err(error) => {
                    tracing::warn!(category = %label, %error, "hover failed; continuing")
                }
            }
            if !self.config.hover_pause.is_zero() {
                tokio::time::sleep(self.config.hover_pause).await;
            }
        }
        tracing::debug!("hover sweep completed");
    }

    /// Surfaces scroll-triggered UI before the modal steps. No success
    /// criterion beyond "no exception"; errors are downgraded.
    async fn scroll_probe(&self, session: &dyn Session) {
        tracing::debug!("scrolling page");
        if let Err(error) = session.scroll_to_bottom().await {
            tracing::warn!(%error, "scroll to bottom failed; skipping scroll probe");
            return;
        }
        if !self.config.scroll_pause.is_zero() {
            tokio::time::sleep(self.config.scroll_pause).await;
        }
        match session.scroll_to_top().await {
            Ok(()) => tracing::debug!("scroll probe completed"),
            Err(error) => tracing::warn!(%error, "scroll to top failed; continuing"),
        }
    }

    /// Polls for the post-submit alert up to the configured bound and
    /// accepts it when present. Absence is a valid observation, not an
    /// error.
    async fn await_popup(&self, session: &dyn Session) -> Result<Option<String>> {
        let text = wait::poll_for(
            self.config.popup_timeout,
            self.config.poll_interval,
            || session.active_alert_text(),
        )
        .await?;

        if let Some(text) = &text {
            tracing::info!(alert = %text, "alert message received");
            session.accept_alert().await?;
            tracing::debug!("alert accepted");
        }
        Ok(text)
    }
}

fn step<T>(step: Step, result: Result<T>) -> StepResult<T> {
    result.map_err(|error| (step, error))
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
