// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Ryze integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without network access.
//!
//! # Components
//!
//! - [`MockProvider`] - Scripted generative backend that records requests
//! - [`ManualClock`] - Hand-advanced clock for the cooldown gate
//! - [`InMemoryProjectStore`] - Project store over a `HashMap`
//! - [`TestHarness`] - A full generation session wired to the mocks

pub mod harness;
pub mod manual_clock;
pub mod memory_store;
pub mod mock_provider;

pub use harness::TestHarness;
pub use manual_clock::ManualClock;
pub use memory_store::InMemoryProjectStore;
pub use mock_provider::MockProvider;
