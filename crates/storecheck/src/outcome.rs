//! Classification of the post-submit popup
//!
//! The signup flow ends in a browser-native alert (or nothing at all).
//! Its text is the only signal the target page gives, so the outcome is
//! derived from case-insensitive substring checks against the two phrases
//! the backend is known to produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Popup text marking a rejected duplicate identifier.
pub const ALREADY_EXISTS_MARKER: &str = "already exists";

/// Popup text marking a completed signup.
pub const SUCCESS_MARKER: &str = "sign up successful";

/// Classified result of one test case's terminal popup, or its absence.
///
/// Every variant is a passing classification: reruns legitimately produce
/// `AlreadyExists`, and the lenient policy treats a missing or unknown
/// confirmation as informational rather than a failure. Hard failures are
/// carried by errors, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Popup confirmed the signup.
    Success,
    /// Popup reported a duplicate identifier. Expected on reruns against
    /// a backend that rejects duplicates.
    AlreadyExists,
    /// No popup appeared within the wait bound.
    NoPopup,
    /// Popup text matched neither known phrase. Logged distinctly for
    /// human review.
    Unrecognized,
}

impl Outcome {
    /// Classifies popup text.
    ///
    /// Matching is case-insensitive substring containment, duplicate
    /// check first so a text mentioning both phrases reads as the
    /// rejection it is.
    pub fn classify(popup_text: &str) -> Outcome {
        let lowered = popup_text.to_lowercase();
        if lowered.contains(ALREADY_EXISTS_MARKER) {
            Outcome::AlreadyExists
        } else if lowered.contains(SUCCESS_MARKER) {
            Outcome::Success
        } else {
            Outcome::Unrecognized
        }
    }

    /// Classifies an optional popup observation, mapping absence to
    /// [`Outcome::NoPopup`].
    pub fn from_popup(popup_text: Option<&str>) -> Outcome {
        match popup_text {
            Some(text) => Outcome::classify(text),
            None => Outcome::NoPopup,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Success => "success",
            Outcome::AlreadyExists => "already-exists",
            Outcome::NoPopup => "no-popup",
            Outcome::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}
