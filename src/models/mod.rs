// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation rules shared between UI and submission logic.

pub mod attachment;
pub mod category;
pub mod fields;
pub mod rules;
