use std::fmt;
use std::sync::{Mutex, OnceLock};

type Init<T> = Box<dyn FnOnce() -> T + Send>;

/// A value computed on first access and cached afterwards.
///
/// The initializer is boxed so `Lazy<T>` can sit in plain structs shared
/// across threads. Initialization runs at most once even under concurrent
/// access.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use json_store_util::Lazy;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = calls.clone();
/// let value = Lazy::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     21 * 2
/// });
///
/// assert_eq!(calls.load(Ordering::SeqCst), 0);
/// assert_eq!(*value.get(), 42);
/// assert_eq!(*value.get(), 42);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Lazy<T> {
    value: OnceLock<T>,
    init: Mutex<Option<Init<T>>>,
}

impl<T> Lazy<T> {
    pub fn new(f: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(Some(Box::new(f))),
        }
    }

    /// Already-computed value, no initializer needed.
    pub fn ready(value: T) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(value);
        Self {
            value: cell,
            init: Mutex::new(None),
        }
    }

    pub fn get(&self) -> &T {
        self.value.get_or_init(|| {
            let init = match self.init.lock() {
                Ok(mut guard) => guard.take(),
                Err(poisoned) => poisoned.into_inner().take(),
            };
            match init {
                Some(f) => f(),
                // get_or_init runs this closure at most once and the
                // initializer is only taken here.
                None => unreachable!("lazy initializer already consumed"),
            }
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.write_str("Lazy(<pending>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_lazy_value() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let count_clone = call_count.clone();

        let lazy_val = Lazy::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            42
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);
        assert!(!lazy_val.is_initialized());
        assert_eq!(*lazy_val.get(), 42);
        assert_eq!(*lazy_val.get(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ready_value() {
        let lazy_val = Lazy::ready("done".to_string());
        assert!(lazy_val.is_initialized());
        assert_eq!(lazy_val.get(), "done");
    }

    #[test]
    fn test_concurrent_get_initializes_once() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let count_clone = call_count.clone();
        let lazy_val = Arc::new(Lazy::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            7
        }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy_val = lazy_val.clone();
                std::thread::spawn(move || *lazy_val.get())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
