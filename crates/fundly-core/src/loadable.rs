// ── Tri-state async value wrapper ──

/// A value fetched asynchronously: loading, loaded, or failed.
///
/// The invariant of every single-entity fetch: the wrapper is set to
/// `Loading` synchronously before the request is issued, and to exactly
/// one of `Success`/`Error` when the request settles. Data is present
/// iff the fetch succeeded; no other state is observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Success(T),
    Error,
}

impl<T> Loadable<T> {
    /// The loaded value, if the fetch has succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Map the loaded value, preserving loading/error states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Loading => Loadable::Loading,
            Self::Success(data) => Loadable::Success(f(data)),
            Self::Error => Loadable::Error,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loading() {
        let loadable: Loadable<i32> = Loadable::default();
        assert!(loadable.is_loading());
        assert!(loadable.data().is_none());
    }

    #[test]
    fn data_present_only_on_success() {
        assert_eq!(Loadable::Success(5).data(), Some(&5));
        assert_eq!(Loadable::<i32>::Loading.data(), None);
        assert_eq!(Loadable::<i32>::Error.data(), None);
    }

    #[test]
    fn map_preserves_state() {
        assert_eq!(Loadable::Success(2).map(|n| n * 3), Loadable::Success(6));
        assert_eq!(Loadable::<i32>::Error.map(|n| n * 3), Loadable::Error);
        assert_eq!(Loadable::<i32>::Loading.map(|n| n * 3), Loadable::Loading);
    }
}
