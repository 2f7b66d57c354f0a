//! The collaborator seam: availability predicates and fetch callbacks.

/// External collaborator contract for a carousel over payload `T`.
///
/// The predicates are queried on mount and after every accepted data change
/// — exactly once each. The fetch callbacks fire once the swipe-out
/// animation (plus buffer) has elapsed, receiving the page value that was
/// current when the swipe committed; the caller is expected to respond by
/// updating the bound data.
pub trait PageHooks<T> {
    fn is_next_available(&self) -> bool;
    fn is_prev_available(&self) -> bool;
    fn fetch_next(&mut self, current: &T);
    fn fetch_prev(&mut self, current: &T);
}

/// The simple overload: plain availability flags and zero-argument
/// callbacks, for call sites that don't need the current page value.
pub struct FlagHooks<N, P>
where
    N: FnMut(),
    P: FnMut(),
{
    pub next_available: bool,
    pub prev_available: bool,
    on_next: N,
    on_prev: P,
}

impl<N: FnMut(), P: FnMut()> FlagHooks<N, P> {
    pub fn new(next_available: bool, prev_available: bool, on_next: N, on_prev: P) -> Self {
        Self {
            next_available,
            prev_available,
            on_next,
            on_prev,
        }
    }
}

impl<T, N: FnMut(), P: FnMut()> PageHooks<T> for FlagHooks<N, P> {
    fn is_next_available(&self) -> bool {
        self.next_available
    }

    fn is_prev_available(&self) -> bool {
        self.prev_available
    }

    fn fetch_next(&mut self, _current: &T) {
        (self.on_next)();
    }

    fn fetch_prev(&mut self, _current: &T) {
        (self.on_prev)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_hooks_forward_to_the_callbacks() {
        let mut nexts = 0;
        let mut prevs = 0;
        {
            let mut hooks = FlagHooks::new(true, false, || nexts += 1, || prevs += 1);
            assert!(PageHooks::<u32>::is_next_available(&hooks));
            assert!(!PageHooks::<u32>::is_prev_available(&hooks));
            hooks.fetch_next(&7u32);
            hooks.fetch_next(&7u32);
            hooks.fetch_prev(&7u32);
        }
        assert_eq!(nexts, 2);
        assert_eq!(prevs, 1);
    }
}
