// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::private::Sealed;

/// Marker trait for the supported kinds of lists.
///
/// Currently, [`enum@LkList`] (the circular doubly linked list) is the only kind.
///
/// [`enum@LkList`]: crate::list::LkList
pub trait LkListType: Sealed {}

/// Designates an empty enum as a list of a specific type.
/// You are supposed to define an empty enum and implement this trait for every list entry field
/// of every list element type in your program.
///
/// This is required, because a single element may be part of multiple lists, and henceforth
/// its element structure then contains multiple entry fields (e.g. [`LkListEntry`]).
/// To make all list functions insert and remove elements via the correct entry fields,
/// lists need to be uniquely identified, and this is what the empty enum types are for.
///
/// The easiest way to implement this trait is to use `derive`:
///
/// ```ignore
/// #[derive(LkList)]
/// enum MyList {}
/// ```
///
/// [`LkListEntry`]: crate::list::LkListEntry
pub trait LkTypedList {
    type T: LkListType;
}

/// Designates a structure as a list element with an entry field (e.g. [`LkListEntry`]) of a
/// particular list (identified via the enum that implements [`LkTypedList`]).
///
/// You can implement this trait multiple times for a structure if it is part of multiple
/// lists (and therefore contains multiple entry fields).
///
/// The easiest way to implement this trait for all entry fields of a structure is to use
/// `derive` on the structure:
///
/// ```ignore
/// #[derive(LkListElement)]
/// #[repr(C)]
/// struct MyElement {
///     entry: LkListEntry<Self, MyList>,
///     value: i32,
/// }
/// ```
///
/// [`LkListEntry`]: crate::list::LkListEntry
pub trait LkListElement<L: LkTypedList> {
    /// Returns the byte offset to the entry field relative to the beginning of the
    /// element structure.
    fn offset() -> usize;
}
pub use lk_list_macros::LkListElement;

/// Enables [`LkBoxingListHead`] for a list element structure.
///
/// While an element may be part of multiple lists, only one list may have ownership of the element
/// and handle its memory allocation and deallocation.
/// Therefore, `LkBoxedListElement` can only be implemented once per list element structure.
///
/// The easiest way to implement this trait is to use the `#[boxed]` attribute for the appropriate
/// entry field and use `derive` on the structure:
///
/// ```ignore
/// #[derive(LkListElement)]
/// #[repr(C)]
/// struct MyElement {
///     #[boxed]
///     entry: LkListEntry<Self, MyList>,
///     value: i32,
/// }
/// ```
///
/// [`LkBoxingListHead`]: crate::list::LkBoxingListHead
pub trait LkBoxedListElement {
    type L: LkTypedList;
}
