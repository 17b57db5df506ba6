// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: how fused hits get their final order.
//!
//! Scores never cross tiers. An exact hit from 1990 beats a substring hit
//! from 2024, and within a tier the newest work comes first, so the stage
//! scores only break ties between works of the same year.

pub mod ranking;

pub use ranking::{compare_hits, rank};
