//! # workmate-domain
//!
//! Pure domain model for the workmate task-automation assistant.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Automation steps** (one unit of a task, with an opaque action
//!   token and an execution status)
//! - Define **Task plans** (the normalized reply from the text-generation
//!   service: a human-readable answer plus ordered steps), including the
//!   fallback for unparseable model output
//! - Define **Conversation entries** (the append-only chat log)
//! - Define **Events** (records of entries appended and step status changes)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod conversation;
pub mod event;
pub mod plan;
pub mod step;
