// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Signup page driver - semantic operations over the signup surface of the
// target page. Locator strategy stays behind this trait.

use crate::driver::DriverFuture;

/// Page-interaction collaborator for the signup flow.
///
/// Every operation waits internally (bounded, never a fixed sleep) for its
/// target element to become interactable and fails with
/// [`Error::ElementNotFound`](crate::Error::ElementNotFound) or a timeout
/// when it never does. The harness sequences these calls but never touches
/// raw elements itself.
pub trait SignupDriver: Send + Sync {
    /// Opens the signup panel (modal trigger in the page header).
    fn open_signup_panel(&self) -> DriverFuture<'_, ()>;

    /// Whether the signup modal currently satisfies its visibility
    /// condition. Polled by the harness under a bound after
    /// `open_signup_panel`.
    fn signup_modal_visible(&self) -> DriverFuture<'_, bool>;

    /// Types the identifier and secret into the signup form fields.
    fn fill_credentials(&self, identifier: &str, secret: &str) -> DriverFuture<'_, ()>;

    /// Confirms the signup form.
    fn submit(&self) -> DriverFuture<'_, ()>;
}
