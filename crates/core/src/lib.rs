//! Core workflow logic for Reqflow.
//!
//! This crate contains pure logic with ZERO web or HTTP dependencies.
//! The approval state machine itself lives in the backend; what lives here is
//! how the console reads that state and which actions it offers.
//!
//! # Modules
//!
//! - `workflow` - Timeline derivation, action gating, and the approval dialog

pub mod workflow;
