//! Test helpers shared across crates.
//!
//! This crate currently provides environment variable guards.

pub mod env {
    //! Helpers for safely mutating environment variables in tests.
    //!
    //! Each mutation holds a global mutex for the duration of the set or
    //! remove operation and returns an RAII guard that restores the prior
    //! state when dropped. Guards stacked on the same key restore in LIFO
    //! order.
    //!
    //! # Examples
    //!
    //! ```
    //! use wellspring_test_helpers::env;
    //!
    //! let _guard = env::set_var("KEY", "VALUE");
    //! // `KEY` is set to `VALUE` for the duration of the guard.
    //! ```

    use std::env;
    use std::ffi::{OsStr, OsString};
    use std::sync::LazyLock;

    use parking_lot::Mutex;

    static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

    /// RAII guard restoring an environment variable to its prior value on
    /// drop.
    pub struct EnvVarGuard {
        key: String,
        original: Option<OsString>,
    }

    /// Sets an environment variable and returns a guard restoring its prior
    /// value.
    pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let key = key.into();
        let _lock = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        unsafe { env::set_var(&key, value) };
        EnvVarGuard { key, original }
    }

    /// Removes an environment variable and returns a guard restoring its
    /// prior value.
    pub fn remove_var<K>(key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        let key = key.into();
        let _lock = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        unsafe { env::remove_var(&key) };
        EnvVarGuard { key, original }
    }

    /// Sets several environment variables at once, returning their guards.
    ///
    /// Dropping the returned vector restores prior values in reverse order.
    pub fn set_vars<I, K, V>(vars: I) -> Vec<EnvVarGuard>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        vars.into_iter()
            .map(|(key, value)| set_var(key, value))
            .collect()
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            let _lock = ENV_MUTEX.lock();
            self.original.take().map_or_else(
                || unsafe { env::remove_var(&self.key) },
                |value| unsafe { env::set_var(&self.key, value) },
            );
        }
    }
}
