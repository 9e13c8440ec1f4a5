//! # workmate-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `TextGenerator`: send a prompt, get one text blob back
//!   - `StepExecutor`: carry out a single automation step
//!   - `EventPublisher`: publish domain events to subscribers
//!   - `ConversationStore`: session-scoped conversation log
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ChatService`: turn a task description into a reply plus steps
//!   - `ConversationService`: record one chat turn end to end
//!   - `StepRunner`: execute a step batch, one step at a time
//! - Provide **in-process infrastructure** (event bus, in-memory
//!   conversation log) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* generation or
//!   execution works
//!
//! ## Dependency rule
//! Depends on `workmate-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod conversation_log;
pub mod event_bus;
pub mod ports;
pub mod services;
