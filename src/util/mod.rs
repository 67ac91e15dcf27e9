// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the search and highlight stages.
//!
//! Just normalization for now: folding text for comparison, plus a variant
//! that remembers where each normalized byte came from.

pub mod normalize;
