// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: field evaluation and registration submission.

pub mod evaluator;
pub mod submission;
