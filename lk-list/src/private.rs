// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Supertrait to prevent list type designators from being implemented
/// outside this crate.
pub trait Sealed {}
