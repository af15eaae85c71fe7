//! Heap wrapper for enforced Arc usage.
//!
//! `Heap<T>` wraps `Arc<T>` and provides the ONLY way to allocate composite
//! payloads in the value system. The constructor is `pub(crate)`, so host
//! code must go through `Value`'s factory methods.
//!
//! Cloning a `Heap` clones the `Arc`: both handles alias the same payload
//! and the reference count tracks the number of live handles. The payload is
//! freed exactly when the count reaches zero.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A shared, heap-allocated payload.
///
/// # Thread Safety
/// Uses `Arc` internally, so reference counting is safe across threads.
/// Mutable payloads (list/map containers) add their own lock.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    /// Create a new heap-allocated payload.
    ///
    /// `pub(crate)` — external code must use `Value`'s factory methods.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Wrap an existing `Arc`, for unsized payloads (extension objects).
    #[inline]
    pub(crate) fn from_arc(arc: Arc<T>) -> Self {
        Heap(arc)
    }

    /// Whether two handles alias the same payload.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this payload.
    #[inline]
    pub fn ref_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + Eq> Eq for Heap<T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_deref() {
        let h = Heap::new(42i64);
        assert_eq!(*h, 42);
    }

    #[test]
    fn heap_clone_aliases() {
        let h1 = Heap::new(vec![1, 2, 3]);
        let h2 = h1.clone();
        assert_eq!(*h1, *h2);
        assert!(Heap::ptr_eq(&h1, &h2));
        assert_eq!(Heap::ref_count(&h1), 2);
    }

    #[test]
    fn heap_refcount_drops_to_one() {
        let h1 = Heap::new("payload".to_string());
        {
            let _h2 = h1.clone();
            assert_eq!(Heap::ref_count(&h1), 2);
        }
        assert_eq!(Heap::ref_count(&h1), 1);
    }

    #[test]
    fn heap_eq_by_content() {
        let h1 = Heap::new("hello".to_string());
        let h2 = Heap::new("hello".to_string());
        let h3 = Heap::new("world".to_string());
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert!(!Heap::ptr_eq(&h1, &h2));
    }
}
