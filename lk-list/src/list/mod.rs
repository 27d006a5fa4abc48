// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0
//
//! A circular doubly linked list compatible to [`struct list_head`] of the Linux kernel.
//!
//! Entries form a ring that is anchored by a sentinel head of the same two-pointer shape:
//! `head.next` is the first entry, `head.prev` is the last one, and an empty list is a head
//! pointing to itself.
//! Insertion, removal, and splicing only reconnect ring boundaries, so all of them compute
//! in *O*(*1*) time regardless of the list length.
//!
//! To make this list type-safe, `lk-list` first asks you to declare an empty enum, which then
//! serves as the `L` type parameter to distinguish different lists.
//! A list element can be part of multiple linked lists by having multiple entry fields in the
//! element structure.
//! You need to declare an empty enum for every entry field of every element structure.
//!
//! The empty enum is designated as a doubly linked list via:
//!
//! ```ignore
//! #[derive(LkList)]
//! enum MyList {}
//! ```
//!
//! Next you define your element structure, adding an [`LkListEntry`] field for each doubly
//! linked list you want your element to be part of.
//! A single [`LkListEntry`] field can be marked with `#[boxed]` to make that list own the
//! elements and handle their memory allocation and deallocation:
//!
//! ```ignore
//! #[derive(Default, LkListElement)]
//! #[repr(C)]
//! struct MyElement {
//!     #[boxed]
//!     entry: LkListEntry<Self, MyList>,
//!     value: i32,
//! }
//! ```
//!
//! You can then manage that list using the safe [`LkBoxingListHead`] interface:
//!
//! ```ignore
//! moveit! {
//!     let mut list = LkBoxingListHead::<MyElement, MyList>::new();
//! }
//!
//! list.as_mut().push_back(MyElement {
//!     value: 42,
//!     ..Default::default()
//! });
//! assert!(!list.as_ref().is_empty());
//! ```
//!
//! For non-boxed entries, you can only use the [`LkListHead`] interface.
//! It requires elements to be allocated beforehand on a stable address and be valid as long as
//! the list is used.
//! Without owning the elements, the Rust compiler cannot guarantee the validity of them.
//! This is why almost all [`LkListHead`] functions are `unsafe`.
//!
//! [`struct list_head`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#list-management-functions

mod base;
#[cfg(feature = "alloc")]
mod boxing;
mod traits;

pub use base::*;
#[cfg(feature = "alloc")]
pub use boxing::*;
pub use traits::*;
