//! Load state for data fetched from the backend.
//!
//! Every screen follows the same "fetch, map, store" shape; `Loadable`
//! captures where that fetch currently stands.

use std::fmt::Display;

/// State of a one-shot fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// Build the settled state from a fetch result.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(e.to_string()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Loadable::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Items if loaded, otherwise an empty slice.
    pub fn items(&self) -> &[T] {
        self.loaded().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Loadable<Vec<u8>> = Loadable::from_result(Ok::<_, String>(vec![1, 2]));
        assert_eq!(ok.items(), &[1, 2]);

        let failed: Loadable<Vec<u8>> = Loadable::from_result(Err("boom"));
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.items().is_empty());
    }

    #[test]
    fn test_default_is_idle() {
        let state: Loadable<Vec<u8>> = Loadable::default();
        assert!(state.is_idle());
        assert!(state.loaded().is_none());
    }
}
