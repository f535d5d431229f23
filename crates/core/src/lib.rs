#![warn(clippy::all, missing_docs)]

//! Core domain logic for the alien containment manager.
//!
//! This crate hosts the base and ruleset models, configuration handling,
//! localisation, scenario loading and the containment controller used by the
//! terminal UI and any future frontends.

pub mod config;
pub mod containment;
pub mod error;
pub mod lang;
pub mod models;
pub mod scenario;

pub use config::AppConfig;
pub use containment::{
    ContainmentController, ContainmentOutcome, ControllerSettings, Direction, TO_LIMIT,
};
pub use error::ContainmentError;
pub use lang::Language;
pub use models::{Base, BaseView, Ruleset};
pub use scenario::Scenario;
