// Reader-writer lock used by the skip list.
//
// parking_lot in normal builds, loom under `--cfg loom` so the locking discipline can be model checked.
// Both are exposed through the same guard-returning read()/write() so callers never see poisoning.

#[cfg(loom)]
pub(crate) use loom::sync::{RwLockReadGuard, RwLockWriteGuard};
#[cfg(not(loom))]
pub(crate) use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

pub(crate) struct RwLock<T> {
    #[cfg(loom)]
    inner: loom::sync::RwLock<T>,
    #[cfg(not(loom))]
    inner: parking_lot::RwLock<T>,
}

impl<T> RwLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            #[cfg(loom)]
            inner: loom::sync::RwLock::new(value),
            #[cfg(not(loom))]
            inner: parking_lot::RwLock::new(value),
        }
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        #[cfg(loom)]
        {
            self.inner
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
        #[cfg(not(loom))]
        {
            self.inner.read()
        }
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        #[cfg(loom)]
        {
            self.inner
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
        #[cfg(not(loom))]
        {
            self.inner.write()
        }
    }
}
