//! Collaborator interfaces the harness drives
//!
//! The harness treats browser provisioning and page interaction as black
//! boxes behind object-safe traits:
//! - [`SessionFactory`] / [`Session`]: acquiring and driving an isolated
//!   browser instance bound to one engine and headless setting.
//! - [`SignupDriver`]: semantic operations over the signup surface of the
//!   target page, with no raw element lookup exposed.
//!
//! Trait methods return boxed futures so implementations can live behind
//! `dyn` and be swapped per backend (real browser bindings in production,
//! scripted fakes in tests).

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

pub mod page;
pub mod session;

pub use page::SignupDriver;
pub use session::{Engine, Session, SessionFactory, SessionGuard};

/// Boxed future returned by collaborator trait methods
pub type DriverFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;
