use core::{
    cell::UnsafeCell,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use zerocopy::FromZeros;

/// A fixed-capacity single-producer/single-consumer ring of entries.
///
/// One slot is always kept empty, so at most `N - 1` entries are held. Entries are copied in and
/// out by value. A slot is fully written before the cursor that publishes it is stored with
/// `Release`, and every cursor of the other side is loaded with `Acquire` before a slot is
/// touched.
///
/// The two sides are obtained with [`Mailbox::split`]. Besides `push`, the producer can post a
/// clear request that makes the consumer drop every entry pushed before it; see
/// [`Producer::request_clear`].
pub struct Mailbox<T, const N: usize> {
    slots: [UnsafeCell<T>; N],
    write: AtomicUsize,
    read: AtomicUsize,
    clear_mark: AtomicUsize,
    clear_requested: AtomicBool,
}

// SAFETY: a slot is accessed by at most one side at a time, which the cursor protocol enforces.
unsafe impl<T: Send, const N: usize> Sync for Mailbox<T, N> {}

/// The pushing side of a [`Mailbox`].
pub struct Producer<'a, T, const N: usize> {
    mailbox: &'a Mailbox<T, N>,
}

/// The popping side of a [`Mailbox`].
pub struct Consumer<'a, T, const N: usize> {
    mailbox: &'a Mailbox<T, N>,
}

impl<T: Copy + FromZeros, const N: usize> Mailbox<T, N> {
    /// Creates an empty mailbox with zeroed slots.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(N > 1, "a mailbox needs at least two slots") };
        Self {
            slots: core::array::from_fn(|_| UnsafeCell::new(T::new_zeroed())),
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            clear_mark: AtomicUsize::new(0),
            clear_requested: AtomicBool::new(false),
        }
    }
}

impl<T: Copy + FromZeros, const N: usize> Default for Mailbox<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Mailbox<T, N> {
    /// Splits the mailbox into its two sides.
    pub fn split(&mut self) -> (Producer<'_, T, N>, Consumer<'_, T, N>) {
        let mailbox = &*self;
        (Producer { mailbox }, Consumer { mailbox })
    }

    /// The maximum number of entries held at once.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// The number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + N - read) % N
    }

    /// Returns `true` if no entry is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy, const N: usize> Producer<'_, T, N> {
    /// Copies `entry` into the mailbox.
    ///
    /// Returns `false` without side effects if the mailbox is full.
    #[must_use]
    pub fn push(&mut self, entry: &T) -> bool {
        let mailbox = self.mailbox;
        let write = mailbox.write.load(Ordering::Relaxed);
        let next = (write + 1) % N;
        if next == mailbox.read.load(Ordering::Acquire) {
            return false;
        }
        // SAFETY: the slot at `write` is outside `[read, write)`, so the consumer does not
        // access it until the store below publishes it.
        unsafe {
            *mailbox.slots[write].get() = *entry;
        }
        mailbox.write.store(next, Ordering::Release);
        true
    }

    /// Asks the consumer to discard every entry pushed so far.
    ///
    /// Until the consumer takes the request with [`Consumer::take_clear_request`], [`Consumer::pop`]
    /// returns `None`, so no entry pushed after this call is popped before the clear.
    pub fn request_clear(&mut self) {
        let mailbox = self.mailbox;
        mailbox
            .clear_mark
            .store(mailbox.write.load(Ordering::Relaxed), Ordering::Relaxed);
        mailbox.clear_requested.store(true, Ordering::Release);
    }

    /// Returns `true` if a clear request has not been taken by the consumer yet.
    #[must_use]
    pub fn clear_pending(&self) -> bool {
        self.mailbox.clear_requested.load(Ordering::Acquire)
    }
}

impl<T: Copy + FromZeros, const N: usize> Consumer<'_, T, N> {
    /// Copies out the oldest entry.
    ///
    /// Returns `None` if the mailbox is empty or a clear request is pending.
    pub fn pop(&mut self) -> Option<T> {
        let mailbox = self.mailbox;
        let read = mailbox.read.load(Ordering::Relaxed);
        if read == mailbox.write.load(Ordering::Acquire)
            || mailbox.clear_requested.load(Ordering::Acquire)
        {
            return None;
        }
        // SAFETY: the slot at `read` lies in `[read, write)`, which the producer does not touch.
        let entry = unsafe { *mailbox.slots[read].get() };
        mailbox.read.store((read + 1) % N, Ordering::Release);
        Some(entry)
    }

    /// Takes a pending clear request, zeroing and discarding every entry pushed before it.
    ///
    /// Returns `true` if a request was pending.
    pub fn take_clear_request(&mut self) -> bool {
        let mailbox = self.mailbox;
        if !mailbox.clear_requested.swap(false, Ordering::AcqRel) {
            return false;
        }
        let mark = mailbox.clear_mark.load(Ordering::Relaxed);
        let mut read = mailbox.read.load(Ordering::Relaxed);
        while read != mark {
            // SAFETY: the slot lies in `[read, mark)`, which is a prefix of `[read, write)`.
            unsafe {
                *mailbox.slots[read].get() = T::new_zeroed();
            }
            read = (read + 1) % N;
        }
        mailbox.read.store(mark, Ordering::Release);
        true
    }
}
