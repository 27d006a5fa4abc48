// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::marker::PhantomPinned;
use core::pin::Pin;
use core::ptr;

use alloc::boxed::Box;
use moveit::{new, New};

use super::base::{Iter, IterMut, LkListHead};
use super::traits::LkList;
use crate::traits::{LkBoxedListElement, LkListElement, LkTypedList};

/// A variant of [`LkListHead`] that boxes every element on insertion.
///
/// This guarantees ownership and therefore all `LkBoxingListHead` functions can be used without
/// resorting to `unsafe`.
/// If you can, use this implementation over [`LkListHead`].
///
/// You need to implement the [`LkBoxedListElement`] trait to designate a single list as the boxing one.
/// This also establishes clear ownership when a single element is part of more than one list.
///
/// See the [module-level documentation](crate::list) for more details.
#[repr(transparent)]
pub struct LkBoxingListHead<
    E: LkBoxedListElement<L = L> + LkListElement<L>,
    L: LkTypedList<T = LkList>,
>(LkListHead<E, L>);

impl<E, L> LkBoxingListHead<E, L>
where
    E: LkBoxedListElement<L = L> + LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    /// Creates a new circular doubly linked list that owns all elements.
    ///
    /// This function substitutes [`INIT_LIST_HEAD`] of the Linux kernel.
    ///
    /// [`INIT_LIST_HEAD`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.INIT_LIST_HEAD
    pub fn new() -> impl New<Output = Self> {
        new::of(Self(LkListHead {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
            pin: PhantomPinned,
        }))
        .with(|this| {
            let this = unsafe { this.get_unchecked_mut() };
            this.0.next = (this as *mut Self).cast();
            this.0.prev = this.0.next;
        })
    }

    /// Moves all elements from `other` to the end of the list, preserving their relative order.
    ///
    /// This reuses all the entries from `other` and moves them into `self`.
    /// After this operation, `other` becomes empty.
    ///
    /// This function substitutes [`list_splice_tail_init`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_splice_tail_init`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice_tail_init
    pub fn append(self: Pin<&mut Self>, other: Pin<&mut Self>) {
        unsafe { self.inner_mut().splice_tail_init(other.inner_mut()) }
    }

    /// Moves all elements from `other` to the front of the list, preserving their relative order.
    ///
    /// After this operation, `other` becomes empty.
    ///
    /// This function substitutes [`list_splice_init`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_splice_init`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice_init
    pub fn prepend(self: Pin<&mut Self>, other: Pin<&mut Self>) {
        unsafe { self.inner_mut().splice_init(other.inner_mut()) }
    }

    /// Provides a reference to the last element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn back(self: Pin<&Self>) -> Option<&E> {
        unsafe { self.inner().back() }
    }

    /// Provides a mutable reference to the last element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn back_mut(self: Pin<&mut Self>) -> Option<&mut E> {
        unsafe { self.inner_mut().back_mut() }
    }

    /// Removes all elements from the list, deallocating their memory.
    ///
    /// Unlike [`LkListHead::clear`], this operation computes in *O*(*n*) time, because it
    /// needs to traverse all elements to deallocate them.
    pub fn clear(mut self: Pin<&mut Self>) {
        let end_marker = self.as_mut().inner_mut().end_marker_mut();

        // Get the link to the first element before it's being reset.
        let mut current = self.0.next;

        // Make the list appear empty before deallocating any element.
        // By doing this here and not at the very end, we guard against the following scenario:
        //
        // 1. We deallocate an element.
        // 2. The `Drop` handler of that element is called and panics.
        // 3. Consequently, the `Drop` handler of `LkBoxingListHead` is called and removes all elements.
        // 4. While removing elements, the just dropped element is dropped again.
        //
        // By clearing the list at the beginning, the `Drop` handler of `LkBoxingListHead` won't find any
        // elements, and thereby it won't drop any elements.
        self.inner_mut().clear();

        // Traverse the list in the old-fashioned way and deallocate each element.
        while current != end_marker {
            unsafe {
                let element = (*current).containing_record_mut();
                current = (*current).next;
                drop(Box::from_raw(element));
            }
        }
    }

    /// Provides a reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn front(self: Pin<&Self>) -> Option<&E> {
        unsafe { self.inner().front() }
    }

    /// Provides a mutable reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn front_mut(self: Pin<&mut Self>) -> Option<&mut E> {
        unsafe { self.inner_mut().front_mut() }
    }

    fn inner(self: Pin<&Self>) -> Pin<&LkListHead<E, L>> {
        unsafe { Pin::new_unchecked(&self.get_ref().0) }
    }

    fn inner_mut(self: Pin<&mut Self>) -> Pin<&mut LkListHead<E, L>> {
        unsafe { Pin::new_unchecked(&mut self.get_unchecked_mut().0) }
    }

    /// Returns `true` if the list is empty.
    ///
    /// This function substitutes [`list_empty`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_empty`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_empty
    pub fn is_empty(self: Pin<&Self>) -> bool {
        self.inner().is_empty()
    }

    /// Returns an iterator yielding references to each element of the list.
    pub fn iter(self: Pin<&Self>) -> Iter<E, L> {
        unsafe { self.inner().iter() }
    }

    /// Returns an iterator yielding mutable references to each element of the list.
    pub fn iter_mut(self: Pin<&mut Self>) -> IterMut<E, L> {
        unsafe { self.inner_mut().iter_mut() }
    }

    /// Counts all elements and returns the length of the list.
    ///
    /// This operation computes in *O*(*n*) time.
    pub fn len(self: Pin<&Self>) -> usize {
        unsafe { self.inner().len() }
    }

    /// Removes the last element from the list and returns it, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn pop_back(self: Pin<&mut Self>) -> Option<Box<E>> {
        unsafe {
            self.inner_mut()
                .pop_back()
                .map(|element| Box::from_raw(element))
        }
    }

    /// Removes the first element from the list and returns it, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub fn pop_front(self: Pin<&mut Self>) -> Option<Box<E>> {
        unsafe {
            self.inner_mut()
                .pop_front()
                .map(|element| Box::from_raw(element))
        }
    }

    /// Appends an element to the back of the list.
    ///
    /// This function substitutes [`list_add_tail`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add_tail`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add_tail
    pub fn push_back(self: Pin<&mut Self>, element: E) {
        let boxed_element = Box::new(element);
        unsafe { self.inner_mut().push_back(Box::leak(boxed_element)) }
    }

    /// Appends an element to the front of the list.
    ///
    /// This function substitutes [`list_add`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add
    pub fn push_front(self: Pin<&mut Self>, element: E) {
        let boxed_element = Box::new(element);
        unsafe { self.inner_mut().push_front(Box::leak(boxed_element)) }
    }

    /// Retains only the elements specified by the predicate, passing a mutable reference to it.
    ///
    /// In other words, remove all elements `e` for which `f(&mut e)` returns `false`,
    /// deallocating their memory.
    /// This method operates in place, visiting each element exactly once in the original order,
    /// and preserves the order of the retained elements.
    ///
    /// This function substitutes the [`list_for_each_entry_safe`] pattern of the Linux kernel.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// [`list_for_each_entry_safe`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_for_each_entry_safe
    pub fn retain<F>(self: Pin<&mut Self>, mut f: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        for element in self.iter_mut() {
            if !f(element) {
                let entry = LkListHead::entry(element);

                unsafe {
                    (*entry).remove();
                    drop(Box::from_raw(element));
                }
            }
        }
    }
}

impl<E, L> Drop for LkBoxingListHead<E, L>
where
    E: LkBoxedListElement<L = L> + LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn drop(&mut self) {
        let pinned = unsafe { Pin::new_unchecked(self) };

        for element in pinned.iter_mut() {
            // Reconstruct the `Box` we created in push_back/push_front and let it leave the scope
            // to call its Drop handler and deallocate the element gracefully.
            unsafe {
                drop(Box::from_raw(element));
            }
        }
    }
}
