//! `hydrate_core` is the core library for the `hydrate` command. It finds
//! `{{%-Name-%}}` placeholders in a document, asks an operator for a value for
//! each unique placeholder and writes a fully substituted copy of the document.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   → Store (loads the raw bytes)
//!   → Matcher (finds every `{{% … %}}` occurrence)
//!   → Discovery (one placeholder per unique key, in document order)
//!   → Hydrator (display → ask → preview → confirm, once per placeholder)
//!   → Store (writes the hydrated bytes once, after the last confirmation)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `hydrate.toml`.
//! - [`matcher`] — The placeholder pattern and the raw match scanner.
//!
//! ## Key Types
//!
//! - [`Placeholder`] — A unique placeholder key, its literal pattern and the
//!   answer it resolved to.
//! - [`Session`] — The working buffer and work queue of a single run.
//! - [`Hydrator`] — Runs sessions against a [`Store`], an [`Operator`] and a
//!   [`Highlighter`].
//! - [`Hydration`] — How a run ended: written, previewed or nothing to do.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use hydrate_core::Hydration;
//! use hydrate_core::hydrate;
//!
//! match hydrate(Path::new("config.template.json"), Path::new("config.json")).unwrap() {
//! 	Hydration::Empty { .. } => eprintln!("nothing to hydrate"),
//! 	hydration => println!("{} placeholder(s) resolved", hydration.placeholders().len()),
//! }
//! ```

pub use config::*;
pub use error::*;
pub use highlight::*;
pub use hydrator::*;
pub use operator::*;
pub use placeholder::*;
pub use session::*;
pub use store::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod highlight;
mod hydrator;
pub mod matcher;
mod operator;
mod placeholder;
mod session;
mod store;

#[cfg(test)]
mod __fixtures;
