// Copyright 2023 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::iter::FusedIterator;
use core::marker::PhantomPinned;
use core::pin::Pin;
use core::ptr;

use moveit::{new, New};

use super::traits::LkList;
use crate::traits::{LkListElement, LkTypedList};

/// A circular doubly linked list header compatible to [`struct list_head`] of the Linux kernel.
///
/// This variant requires elements to be allocated beforehand on a stable address and be
/// valid as long as the list is used.
/// As the Rust compiler cannot guarantee the validity of them, almost all `LkListHead`
/// functions are `unsafe`.
/// You almost always want to use [`LkBoxingListHead`] over this.
///
/// See the [module-level documentation](crate::list) for more details.
///
/// This structure substitutes the `struct list_head` of the Linux kernel when used as the
/// anchor of a list.
///
/// [`struct list_head`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#list-management-functions
/// [`LkBoxingListHead`]: crate::list::LkBoxingListHead
#[repr(C)]
pub struct LkListHead<E: LkListElement<L>, L: LkTypedList<T = LkList>> {
    pub(crate) next: *mut LkListEntry<E, L>,
    pub(crate) prev: *mut LkListEntry<E, L>,
    pub(crate) pin: PhantomPinned,
}

impl<E, L> LkListHead<E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    /// Creates a new circular doubly linked list, with the head pointing to itself.
    ///
    /// This function substitutes [`INIT_LIST_HEAD`] of the Linux kernel.
    ///
    /// [`INIT_LIST_HEAD`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.INIT_LIST_HEAD
    pub fn new() -> impl New<Output = Self> {
        new::of(Self {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
            pin: PhantomPinned,
        })
        .with(|this| {
            let this = unsafe { this.get_unchecked_mut() };
            this.next = (this as *mut Self).cast();
            this.prev = this.next;
        })
    }

    /// Removes all elements from the list.
    ///
    /// This operation computes in *O*(*1*) time, because it only resets the forward and
    /// backward links of the header.
    /// The entries of the removed elements are left untouched and must not be used for
    /// further list operations until they have been relinked.
    pub fn clear(mut self: Pin<&mut Self>) {
        let end_marker = self.as_mut().end_marker_mut();
        let self_mut = unsafe { self.get_unchecked_mut() };

        self_mut.next = end_marker;
        self_mut.prev = end_marker;
    }

    /// Returns a const pointer to the "end marker entry" (which is the address of our own
    /// `LkListHead`, but interpreted as an `LkListEntry` address).
    pub(crate) fn end_marker(self: Pin<&Self>) -> *const LkListEntry<E, L> {
        (self.get_ref() as *const Self).cast()
    }

    /// Returns a mutable pointer to the "end marker entry" (which is the address of our own
    /// `LkListHead`, but interpreted as an `LkListEntry` address).
    pub(crate) fn end_marker_mut(self: Pin<&mut Self>) -> *mut LkListEntry<E, L> {
        (unsafe { self.get_unchecked_mut() } as *mut Self).cast()
    }

    /// Returns the [`LkListEntry`] for the given element.
    pub(crate) fn entry(element: &mut E) -> *mut LkListEntry<E, L> {
        let element_ptr = element as *mut E;

        // This is the canonical implementation of `byte_add`
        unsafe { element_ptr.cast::<u8>().add(E::offset()).cast::<LkListEntry<E, L>>() }
    }

    /// Provides a reference to the last element, or `None` if the list is empty.
    ///
    /// This function substitutes [`list_last_entry`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_last_entry`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_last_entry
    pub unsafe fn back(self: Pin<&Self>) -> Option<&E> {
        (!self.is_empty()).then(|| (*self.prev).containing_record())
    }

    /// Provides a mutable reference to the last element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub unsafe fn back_mut(self: Pin<&mut Self>) -> Option<&mut E> {
        (!self.as_ref().is_empty()).then(|| (*self.prev).containing_record_mut())
    }

    /// Provides a reference to the first element, or `None` if the list is empty.
    ///
    /// This function substitutes [`list_first_entry`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_first_entry`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_first_entry
    pub unsafe fn front(self: Pin<&Self>) -> Option<&E> {
        (!self.is_empty()).then(|| (*self.next).containing_record())
    }

    /// Provides a mutable reference to the first element, or `None` if the list is empty.
    ///
    /// This operation computes in *O*(*1*) time.
    pub unsafe fn front_mut(self: Pin<&mut Self>) -> Option<&mut E> {
        (!self.as_ref().is_empty()).then(|| (*self.next).containing_record_mut())
    }

    /// Links `element` immediately after `anchor`, which may sit at any position of the ring.
    ///
    /// This function substitutes [`list_add`] of the Linux kernel, with an element instead of
    /// the head as the anchor.
    /// `element` must not currently be part of any list; `anchor` must be part of this list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add
    pub unsafe fn insert_after(self: Pin<&mut Self>, anchor: &mut E, element: &mut E) {
        let anchor_entry = Self::entry(anchor);
        let entry = Self::entry(element);
        let old_next = (*anchor_entry).next;

        (*entry).next = old_next;
        (*entry).prev = anchor_entry;
        (*old_next).prev = entry;
        (*anchor_entry).next = entry;
    }

    /// Links `element` immediately before `anchor`, which may sit at any position of the ring.
    ///
    /// This function substitutes [`list_add_tail`] of the Linux kernel, with an element instead
    /// of the head as the anchor.
    /// `element` must not currently be part of any list; `anchor` must be part of this list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add_tail`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add_tail
    pub unsafe fn insert_before(self: Pin<&mut Self>, anchor: &mut E, element: &mut E) {
        let anchor_entry = Self::entry(anchor);
        let entry = Self::entry(element);
        let old_prev = (*anchor_entry).prev;

        (*entry).next = anchor_entry;
        (*entry).prev = old_prev;
        (*old_prev).next = entry;
        (*anchor_entry).prev = entry;
    }

    /// Returns `true` if the list is empty.
    ///
    /// This function substitutes [`list_empty`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_empty`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_empty
    pub fn is_empty(self: Pin<&Self>) -> bool {
        self.next as *const LkListEntry<E, L> == self.end_marker()
    }

    /// Returns an iterator yielding references to each element of the list.
    pub unsafe fn iter(self: Pin<&Self>) -> Iter<E, L> {
        let head = self.get_ref();
        let front = head.next;
        let back = head.prev;

        Iter { head, front, back }
    }

    /// Returns an iterator yielding mutable references to each element of the list.
    ///
    /// The iterator advances past an element before yielding it, so the yielded element may be
    /// unlinked from within the loop without corrupting the traversal.
    pub unsafe fn iter_mut(self: Pin<&mut Self>) -> IterMut<E, L> {
        let head = self.get_unchecked_mut();
        let front = head.next;
        let back = head.prev;

        IterMut { head, front, back }
    }

    /// Counts all elements and returns the length of the list.
    ///
    /// This operation computes in *O*(*n*) time.
    pub unsafe fn len(self: Pin<&Self>) -> usize {
        self.iter().count()
    }

    /// Unlinks `element` from its current ring and relinks it as the first element of this list.
    ///
    /// This function substitutes [`list_move`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_move`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_move
    pub unsafe fn move_to_front(self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);
        (*entry).remove();
        self.push_front(element);
    }

    /// Unlinks `element` from its current ring and relinks it as the last element of this list.
    ///
    /// This function substitutes [`list_move_tail`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_move_tail`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_move_tail
    pub unsafe fn move_to_back(self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);
        (*entry).remove();
        self.push_back(element);
    }

    /// Removes the last element from the list and returns it, or `None` if the list is empty.
    ///
    /// The entry of the returned element is marked as removed, like after [`unlink`].
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`unlink`]: Self::unlink
    pub unsafe fn pop_back(self: Pin<&mut Self>) -> Option<&mut E> {
        (!self.as_ref().is_empty()).then(|| {
            let entry = &mut *self.prev;
            entry.remove_poison();
            entry.containing_record_mut()
        })
    }

    /// Removes the first element from the list and returns it, or `None` if the list is empty.
    ///
    /// The entry of the returned element is marked as removed, like after [`unlink`].
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`unlink`]: Self::unlink
    pub unsafe fn pop_front(self: Pin<&mut Self>) -> Option<&mut E> {
        (!self.as_ref().is_empty()).then(|| {
            let entry = &mut *self.next;
            entry.remove_poison();
            entry.containing_record_mut()
        })
    }

    /// Appends an element to the back of the list.
    ///
    /// This function substitutes [`list_add_tail`] of the Linux kernel.
    /// `element` must not currently be part of any list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add_tail`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add_tail
    pub unsafe fn push_back(mut self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);

        let old_prev = self.prev;
        (*entry).next = self.as_mut().end_marker_mut();
        (*entry).prev = old_prev;
        (*old_prev).next = entry;
        self.get_unchecked_mut().prev = entry;
    }

    /// Appends an element to the front of the list.
    ///
    /// This function substitutes [`list_add`] of the Linux kernel.
    /// `element` must not currently be part of any list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_add`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_add
    pub unsafe fn push_front(mut self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);

        let old_next = self.next;
        (*entry).next = old_next;
        (*entry).prev = self.as_mut().end_marker_mut();
        (*old_next).prev = entry;
        self.get_unchecked_mut().next = entry;
    }

    /// Retains only the elements specified by the predicate, passing a mutable reference to it.
    ///
    /// In other words, unlink all elements `e` for which `f(&mut e)` returns `false`.
    /// This method operates in place, visiting each element exactly once in the original order,
    /// and preserves the order of the retained elements.
    /// Unlinked entries are reinitialized to the detached-empty state, like after
    /// [`unlink_init`].
    ///
    /// This function substitutes the [`list_for_each_entry_safe`] pattern of the Linux kernel.
    ///
    /// This operation computes in *O*(*n*) time.
    ///
    /// [`list_for_each_entry_safe`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_for_each_entry_safe
    /// [`unlink_init`]: Self::unlink_init
    pub unsafe fn retain<F>(self: Pin<&mut Self>, mut f: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        for element in self.iter_mut() {
            if !f(element) {
                let entry = Self::entry(element);
                (*entry).remove_init();
            }
        }
    }

    /// Moves all elements from `other` to the front of this list, preserving their relative
    /// order.
    ///
    /// This function substitutes [`list_splice`] of the Linux kernel: the head of `other` is
    /// left untouched and keeps stale links to the moved entries.
    /// `other` must not be used for further list operations until it has been reset via
    /// [`clear`], or use [`splice_init`] instead.
    ///
    /// This operation computes in *O*(*1*) time, because only the two boundary pairs of the
    /// rings are reconnected.
    ///
    /// [`list_splice`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice
    /// [`clear`]: Self::clear
    /// [`splice_init`]: Self::splice_init
    pub unsafe fn splice(mut self: Pin<&mut Self>, other: Pin<&mut Self>) {
        if other.as_ref().is_empty() {
            return;
        }

        let first = other.next;
        let last = other.prev;
        let end_marker = self.as_mut().end_marker_mut();

        let self_mut = self.get_unchecked_mut();
        (*last).next = self_mut.next;
        (*self_mut.next).prev = last;
        self_mut.next = first;
        (*first).prev = end_marker;
    }

    /// Moves all elements from `other` to the front of this list and reinitializes `other` to
    /// an empty list.
    ///
    /// This function substitutes [`list_splice_init`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_splice_init`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice_init
    pub unsafe fn splice_init(self: Pin<&mut Self>, mut other: Pin<&mut Self>) {
        self.splice(other.as_mut());
        other.clear();
    }

    /// Moves all elements from `other` to the back of this list, preserving their relative
    /// order.
    ///
    /// This function substitutes [`list_splice_tail`] of the Linux kernel: the head of `other`
    /// is left untouched and keeps stale links to the moved entries.
    /// `other` must not be used for further list operations until it has been reset via
    /// [`clear`], or use [`splice_tail_init`] instead.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_splice_tail`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice_tail
    /// [`clear`]: Self::clear
    /// [`splice_tail_init`]: Self::splice_tail_init
    pub unsafe fn splice_tail(mut self: Pin<&mut Self>, other: Pin<&mut Self>) {
        if other.as_ref().is_empty() {
            return;
        }

        let first = other.next;
        let last = other.prev;
        let end_marker = self.as_mut().end_marker_mut();

        let self_mut = self.get_unchecked_mut();
        (*first).prev = self_mut.prev;
        (*self_mut.prev).next = first;
        self_mut.prev = last;
        (*last).next = end_marker;
    }

    /// Moves all elements from `other` to the back of this list and reinitializes `other` to
    /// an empty list.
    ///
    /// This function substitutes [`list_splice_tail_init`] of the Linux kernel.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_splice_tail_init`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_splice_tail_init
    pub unsafe fn splice_tail_init(self: Pin<&mut Self>, mut other: Pin<&mut Self>) {
        self.splice_tail(other.as_mut());
        other.clear();
    }

    /// Unlinks `element` from this list and poisons its entry pointers.
    ///
    /// This function substitutes [`list_del`] of the Linux kernel: the entry is explicitly
    /// marked as removed and must not be used for further list operations until it has been
    /// relinked.
    /// `element` must currently be part of this list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_del`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_del
    pub unsafe fn unlink(self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);
        (*entry).remove_poison();
    }

    /// Unlinks `element` from this list and reinitializes its entry to the detached-empty
    /// state (a self-loop).
    ///
    /// This function substitutes [`list_del_init`] of the Linux kernel: the entry is
    /// immediately reusable, e.g. for reinsertion into any list of the same type.
    /// `element` must currently be part of this list.
    ///
    /// This operation computes in *O*(*1*) time.
    ///
    /// [`list_del_init`]: https://www.kernel.org/doc/html/latest/core-api/kernel-api.html#c.list_del_init
    pub unsafe fn unlink_init(self: Pin<&mut Self>, element: &mut E) {
        let entry = Self::entry(element);
        (*entry).remove_init();
    }
}

/// Iterator over the elements of a circular doubly linked list.
///
/// This iterator is returned from the [`LkListHead::iter`] and [`LkBoxingListHead::iter`] functions.
///
/// [`LkBoxingListHead::iter`]: crate::list::LkBoxingListHead::iter
pub struct Iter<'a, E: LkListElement<L>, L: LkTypedList<T = LkList>> {
    head: &'a LkListHead<E, L>,
    front: *const LkListEntry<E, L>,
    back: *const LkListEntry<E, L>,
}

impl<'a, E, L> Iter<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn terminate(&mut self) {
        self.front = (self.head as *const LkListHead<E, L>).cast();
        self.back = self.front;
    }
}

impl<'a, E, L> Iterator for Iter<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        if self.front == (self.head as *const LkListHead<_, _>).cast() {
            None
        } else {
            unsafe {
                let element = (*self.front).containing_record();

                if self.front == self.back {
                    // We are crossing the other end of the iterator and must not iterate any further.
                    self.terminate();
                } else {
                    self.front = (*self.front).next;
                }

                Some(element)
            }
        }
    }

    fn last(mut self) -> Option<&'a E> {
        self.next_back()
    }
}

impl<'a, E, L> DoubleEndedIterator for Iter<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn next_back(&mut self) -> Option<&'a E> {
        if self.back == (self.head as *const LkListHead<_, _>).cast() {
            None
        } else {
            unsafe {
                let element = (*self.back).containing_record();

                if self.back == self.front {
                    // We are crossing the other end of the iterator and must not iterate any further.
                    self.terminate();
                } else {
                    self.back = (*self.back).prev;
                }

                Some(element)
            }
        }
    }
}

impl<'a, E, L> FusedIterator for Iter<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
}

/// Mutable iterator over the elements of a circular doubly linked list.
///
/// The iterator advances past an element before yielding it, so the yielded element may be
/// unlinked from within the loop without corrupting the traversal.
///
/// This iterator is returned from the [`LkListHead::iter_mut`] and [`LkBoxingListHead::iter_mut`] functions.
///
/// [`LkBoxingListHead::iter_mut`]: crate::list::LkBoxingListHead::iter_mut
pub struct IterMut<'a, E: LkListElement<L>, L: LkTypedList<T = LkList>> {
    head: &'a mut LkListHead<E, L>,
    front: *mut LkListEntry<E, L>,
    back: *mut LkListEntry<E, L>,
}

impl<'a, E, L> IterMut<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn terminate(&mut self) {
        self.front = (self.head as *mut LkListHead<E, L>).cast();
        self.back = self.front;
    }
}

impl<'a, E, L> Iterator for IterMut<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    type Item = &'a mut E;

    fn next(&mut self) -> Option<&'a mut E> {
        if self.front == (self.head as *mut LkListHead<_, _>).cast() {
            None
        } else {
            unsafe {
                let element = (*self.front).containing_record_mut();

                if self.front == self.back {
                    // We are crossing the other end of the iterator and must not iterate any further.
                    self.terminate();
                } else {
                    self.front = (*self.front).next;
                }

                Some(element)
            }
        }
    }

    fn last(mut self) -> Option<&'a mut E> {
        self.next_back()
    }
}

impl<'a, E, L> DoubleEndedIterator for IterMut<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn next_back(&mut self) -> Option<&'a mut E> {
        if self.back == (self.head as *mut LkListHead<_, _>).cast() {
            None
        } else {
            unsafe {
                let element = (*self.back).containing_record_mut();

                if self.back == self.front {
                    // We are crossing the other end of the iterator and must not iterate any further.
                    self.terminate();
                } else {
                    self.back = (*self.back).prev;
                }

                Some(element)
            }
        }
    }
}

impl<'a, E, L> FusedIterator for IterMut<'a, E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
}

/// This structure substitutes the `struct list_head` of the Linux kernel for actual list entries.
#[derive(Debug)]
#[repr(C)]
pub struct LkListEntry<E: LkListElement<L>, L: LkTypedList<T = LkList>> {
    pub(crate) next: *mut LkListEntry<E, L>,
    pub(crate) prev: *mut LkListEntry<E, L>,
    pin: PhantomPinned,
}

impl<E, L> LkListEntry<E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    /// Allows the creation of an `LkListEntry`, but leaves its pointers poisoned.
    ///
    /// They are only initialized when the entry is linked into a list.
    pub fn new() -> Self {
        Self {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
            pin: PhantomPinned,
        }
    }

    /// Returns `true` if this entry is currently part of a ring of more than itself.
    ///
    /// Both detached states report `false`: the poisoned one (after construction or
    /// [`LkListHead::unlink`]) and the self-looped one (after [`LkListHead::unlink_init`]).
    pub fn is_linked(&self) -> bool {
        let this = self as *const Self as *mut Self;
        !self.next.is_null() && self.next != this
    }

    pub(crate) fn containing_record(&self) -> &E {
        unsafe { &*self.element_ptr() }
    }

    pub(crate) fn containing_record_mut(&mut self) -> &mut E {
        unsafe { &mut *self.element_ptr_mut() }
    }

    fn element_ptr(&self) -> *const E {
        let ptr = self as *const Self;

        // This is the canonical implementation of `byte_sub`
        unsafe { ptr.cast::<u8>().sub(E::offset()).cast::<E>() }
    }

    fn element_ptr_mut(&mut self) -> *mut E {
        let ptr = self as *mut Self;

        // This is the canonical implementation of `byte_sub`
        unsafe { ptr.cast::<u8>().sub(E::offset()).cast::<E>() }
    }

    /// Resets this entry to the detached-empty state, a ring of size one.
    pub(crate) fn init(&mut self) {
        let this = self as *mut Self;
        self.next = this;
        self.prev = this;
    }

    /// Splices this entry out of its ring by linking its neighbors to each other.
    /// The entry's own pointers are left untouched.
    pub(crate) unsafe fn remove(&mut self) {
        let old_next = self.next;
        let old_prev = self.prev;
        (*old_next).prev = old_prev;
        (*old_prev).next = old_next;
    }

    /// Splices this entry out of its ring and reinitializes it to the detached-empty state.
    pub(crate) unsafe fn remove_init(&mut self) {
        self.remove();
        self.init();
    }

    /// Splices this entry out of its ring and poisons its pointers.
    pub(crate) unsafe fn remove_poison(&mut self) {
        self.remove();
        self.next = ptr::null_mut();
        self.prev = ptr::null_mut();
    }
}

impl<E, L> Default for LkListEntry<E, L>
where
    E: LkListElement<L>,
    L: LkTypedList<T = LkList>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use moveit::moveit;

    #[derive(LkList)]
    enum MyList {}

    #[derive(Default, LkListElement)]
    #[repr(C)]
    struct MyElement {
        value: i32,
        entry: LkListEntry<Self, MyList>,
    }

    impl MyElement {
        fn new(value: i32) -> Self {
            Self {
                value,
                ..Default::default()
            }
        }
    }

    fn boxed_elements(values: &[i32]) -> Vec<Box<MyElement>> {
        values.iter().map(|&value| Box::new(MyElement::new(value))).collect()
    }

    fn collect_values(list: Pin<&LkListHead<MyElement, MyList>>) -> Vec<i32> {
        unsafe { list.iter().map(|element| element.value).collect() }
    }

    fn entry_ptr(element: &MyElement) -> *mut LkListEntry<MyElement, MyList> {
        &element.entry as *const LkListEntry<MyElement, MyList> as *mut _
    }

    #[test]
    fn test_push_order() {
        let mut elements = boxed_elements(&[0, 1, 2, 3]);
        moveit! {
            let mut stack = LkListHead::<MyElement, MyList>::new();
            let mut queue = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                stack.as_mut().push_front(element);
            }
        }

        // Front-insertion traverses in reverse insertion order.
        assert_eq!(collect_values(stack.as_ref()), [3, 2, 1, 0]);
        assert_eq!(
            unsafe { stack.as_ref().iter().rev().map(|e| e.value).collect::<Vec<_>>() },
            [0, 1, 2, 3]
        );

        unsafe {
            stack.as_mut().clear();

            for element in &mut elements {
                queue.as_mut().push_back(element);
            }
        }

        // Tail-insertion traverses in insertion order.
        assert_eq!(collect_values(queue.as_ref()), [0, 1, 2, 3]);
    }

    #[test]
    fn test_is_empty_transitions() {
        let mut element = Box::new(MyElement::new(0));
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        assert!(list.as_ref().is_empty());

        unsafe {
            list.as_mut().push_front(&mut element);
            assert!(!list.as_ref().is_empty());
            assert_eq!(list.as_ref().len(), 1);

            list.as_mut().unlink(&mut element);
            assert!(list.as_ref().is_empty());
            assert_eq!(list.as_ref().len(), 0);
        }
    }

    #[test]
    fn test_unlink_poisons_entry() {
        let mut elements = boxed_elements(&[0, 1, 2]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            assert!(elements[1].entry.is_linked());
            list.as_mut().unlink(&mut elements[1]);
        }

        assert_eq!(collect_values(list.as_ref()), [0, 2]);
        assert!(elements[1].entry.next.is_null());
        assert!(elements[1].entry.prev.is_null());
        assert!(!elements[1].entry.is_linked());
    }

    #[test]
    fn test_unlink_init_detaches_empty() {
        let mut elements = boxed_elements(&[0, 1, 2]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            list.as_mut().unlink_init(&mut elements[1]);
        }

        assert_eq!(collect_values(list.as_ref()), [0, 2]);

        // The detached entry is a ring of size one and immediately reusable.
        assert_eq!(elements[1].entry.next, entry_ptr(&elements[1]));
        assert_eq!(elements[1].entry.prev, entry_ptr(&elements[1]));
        assert!(!elements[1].entry.is_linked());

        unsafe {
            list.as_mut().push_front(&mut elements[1]);
        }
        assert_eq!(collect_values(list.as_ref()), [1, 0, 2]);
    }

    #[test]
    fn test_unlink_reinsert_round_trip() {
        let mut elements = boxed_elements(&[0, 1, 2]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            list.as_mut().unlink_init(&mut elements[1]);

            let (anchors, detached) = elements.split_at_mut(1);
            list.as_mut().insert_after(&mut anchors[0], &mut detached[0]);
        }

        assert_eq!(collect_values(list.as_ref()), [0, 1, 2]);
    }

    #[test]
    fn test_insert_relative_to_anchor() {
        let mut elements = boxed_elements(&[10, 20, 30]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            list.as_mut().push_back(&mut elements[0]);
            list.as_mut().push_back(&mut elements[2]);

            let (anchors, rest) = elements.split_at_mut(1);
            list.as_mut().insert_after(&mut anchors[0], &mut rest[0]);
        }

        assert_eq!(collect_values(list.as_ref()), [10, 20, 30]);

        let mut five = Box::new(MyElement::new(5));
        unsafe {
            list.as_mut().insert_before(&mut elements[0], &mut five);
        }

        assert_eq!(collect_values(list.as_ref()), [5, 10, 20, 30]);
    }

    #[test]
    fn test_move_within_list() {
        let mut elements = boxed_elements(&[0, 1, 2]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            list.as_mut().move_to_front(&mut elements[2]);
            assert_eq!(collect_values(list.as_ref()), [2, 0, 1]);

            list.as_mut().move_to_back(&mut elements[0]);
            assert_eq!(collect_values(list.as_ref()), [2, 1, 0]);
        }
    }

    #[test]
    fn test_move_between_lists() {
        let mut element = Box::new(MyElement::new(42));
        moveit! {
            let mut list1 = LkListHead::<MyElement, MyList>::new();
            let mut list2 = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            list1.as_mut().push_back(&mut element);
            list2.as_mut().move_to_front(&mut element);
        }

        assert!(list1.as_ref().is_empty());
        assert_eq!(collect_values(list2.as_ref()), [42]);
    }

    #[test]
    fn test_splice() {
        let mut a_elements = boxed_elements(&[1, 2, 3]);
        let mut b_elements = boxed_elements(&[4, 5]);
        moveit! {
            let mut a = LkListHead::<MyElement, MyList>::new();
            let mut b = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut a_elements {
                a.as_mut().push_back(element);
            }
            for element in &mut b_elements {
                b.as_mut().push_back(element);
            }

            a.as_mut().splice(b.as_mut());
        }

        assert_eq!(collect_values(a.as_ref()), [4, 5, 1, 2, 3]);

        // The source head keeps stale links and must be reset before reuse.
        b.as_mut().clear();
        assert!(b.as_ref().is_empty());
    }

    #[test]
    fn test_splice_empty_source_is_noop() {
        let mut element = Box::new(MyElement::new(1));
        moveit! {
            let mut a = LkListHead::<MyElement, MyList>::new();
            let mut b = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            a.as_mut().push_back(&mut element);
        }

        let old_first = a.next;
        unsafe {
            a.as_mut().splice(b.as_mut());
            a.as_mut().splice_tail(b.as_mut());
        }

        assert_eq!(a.next, old_first);
        assert_eq!(collect_values(a.as_ref()), [1]);
    }

    #[test]
    fn test_splice_init() {
        let mut a_elements = boxed_elements(&[1, 2, 3]);
        let mut b_elements = boxed_elements(&[4, 5]);
        moveit! {
            let mut a = LkListHead::<MyElement, MyList>::new();
            let mut b = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut a_elements {
                a.as_mut().push_back(element);
            }
            for element in &mut b_elements {
                b.as_mut().push_back(element);
            }

            a.as_mut().splice_init(b.as_mut());
        }

        assert_eq!(collect_values(a.as_ref()), [4, 5, 1, 2, 3]);
        assert!(b.as_ref().is_empty());
    }

    #[test]
    fn test_splice_tail_init() {
        let mut a_elements = boxed_elements(&[1, 2, 3]);
        let mut b_elements = boxed_elements(&[4, 5]);
        moveit! {
            let mut a = LkListHead::<MyElement, MyList>::new();
            let mut b = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut a_elements {
                a.as_mut().push_back(element);
            }
            for element in &mut b_elements {
                b.as_mut().push_back(element);
            }

            a.as_mut().splice_tail_init(b.as_mut());
        }

        assert_eq!(collect_values(a.as_ref()), [1, 2, 3, 4, 5]);
        assert!(b.as_ref().is_empty());
    }

    #[test]
    fn test_retain_every_third() {
        let mut elements = boxed_elements(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            list.as_mut().retain(|element| element.value % 3 != 0);
        }

        assert_eq!(collect_values(list.as_ref()), [1, 2, 4, 5, 7, 8]);
        assert_eq!(unsafe { list.as_ref().len() }, 6);

        // Rejected elements end up in the detached-empty state.
        assert_eq!(elements[0].entry.next, entry_ptr(&elements[0]));
        assert!(!elements[0].entry.is_linked());
    }

    #[test]
    fn test_front_back_pop() {
        let mut elements = boxed_elements(&[0, 1, 2]);
        moveit! {
            let mut list = LkListHead::<MyElement, MyList>::new();
        }

        unsafe {
            for element in &mut elements {
                list.as_mut().push_back(element);
            }

            assert_eq!(list.as_ref().front().unwrap().value, 0);
            assert_eq!(list.as_ref().back().unwrap().value, 2);
            assert_eq!(list.as_mut().front_mut().unwrap().value, 0);
            assert_eq!(list.as_mut().back_mut().unwrap().value, 2);

            assert_eq!(list.as_mut().pop_front().unwrap().value, 0);
            assert_eq!(list.as_mut().pop_back().unwrap().value, 2);
        }

        assert_eq!(collect_values(list.as_ref()), [1]);

        // Popped entries carry the removed marking.
        assert!(elements[0].entry.next.is_null());
        assert!(elements[2].entry.next.is_null());

        unsafe {
            assert_eq!(list.as_mut().pop_front().unwrap().value, 1);
            assert!(list.as_mut().pop_front().is_none());
            assert!(list.as_mut().pop_back().is_none());
        }
    }
}
