// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::private::Sealed;
use crate::traits::LkListType;

/// Designates a list as a circular doubly linked list (`struct list_head` of the Linux kernel).
///
/// You usually want to use `#[derive(LkList)]` to implement [`LkTypedList`] with type set to `LkList`.
///
/// [`LkTypedList`]: crate::traits::LkTypedList
pub enum LkList {}

/// Circular doubly linked list type (`struct list_head` of the Linux kernel)
impl LkListType for LkList {}
impl Sealed for LkList {}

/// Designates an empty enum as a circular doubly linked list.
///
/// Technically, this macro implements [`LkTypedList`] with type set to [`enum@LkList`].
///
/// [`LkTypedList`]: crate::traits::LkTypedList
pub use lk_list_macros::LkList;
