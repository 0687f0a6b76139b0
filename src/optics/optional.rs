use std::sync::Arc;

type GetOption<S, A> = Arc<dyn Fn(&S) -> Option<A> + Send + Sync>;
type Setter<S, A> = Arc<dyn Fn(S, A) -> S + Send + Sync>;

/// Access to a part of `S` that may be absent.
///
/// Usually built with [`Lens::compose_prism`](super::Lens::compose_prism).
/// Setting an absent part returns the source unchanged.
pub struct Optional<S, A> {
    getter: GetOption<S, A>,
    setter: Setter<S, A>,
}

impl<S, A> Clone for Optional<S, A> {
    fn clone(&self) -> Self {
        Optional {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<S, A> std::fmt::Debug for Optional<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optional")
            .field("get_option", &"<function>")
            .field("set", &"<function>")
            .finish()
    }
}

impl<S: 'static, A: 'static> Optional<S, A> {
    /// Build an optional from a partial getter and a setter.
    pub fn new<G, St>(get_option: G, set: St) -> Self
    where
        G: Fn(&S) -> Option<A> + Send + Sync + 'static,
        St: Fn(S, A) -> S + Send + Sync + 'static,
    {
        Optional {
            getter: Arc::new(get_option),
            setter: Arc::new(set),
        }
    }

    /// Read the part, if present.
    pub fn get_option(&self, source: &S) -> Option<A> {
        (self.getter)(source)
    }

    /// Replace the part.
    pub fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }

    /// Replace the part with `f` applied to it, if present.
    pub fn modify<F>(&self, source: S, f: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        match self.get_option(&source) {
            Some(value) => self.set(source, f(value)),
            None => source,
        }
    }

    /// Focus further into the part.
    pub fn compose<B: 'static>(self, other: Optional<A, B>) -> Optional<S, B> {
        let outer = self.clone();
        let inner = other.clone();
        Optional::new(
            move |s: &S| self.get_option(s).and_then(|a| other.get_option(&a)),
            move |s: S, b: B| match outer.get_option(&s) {
                Some(part) => outer.set(s, inner.set(part, b)),
                None => s,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn key(k: &'static str) -> Optional<HashMap<&'static str, i32>, i32> {
        Optional::new(
            move |m: &HashMap<&'static str, i32>| m.get(k).copied(),
            move |mut m: HashMap<&'static str, i32>, v| {
                if let Some(slot) = m.get_mut(k) {
                    *slot = v;
                }
                m
            },
        )
    }

    #[test]
    fn test_present_and_absent() {
        let m = HashMap::from([("a", 1)]);
        assert_eq!(key("a").get_option(&m), Some(1));
        assert_eq!(key("b").get_option(&m), None);

        let m = key("a").modify(m, |v| v + 1);
        assert_eq!(m["a"], 2);
        let m = key("b").modify(m, |v| v + 1);
        assert!(!m.contains_key("b"));
    }

    #[test]
    fn test_compose_through_absent_outer() {
        let first = Optional::new(
            |v: &Vec<HashMap<&'static str, i32>>| v.first().cloned(),
            |mut v: Vec<HashMap<&'static str, i32>>, m| {
                if let Some(slot) = v.first_mut() {
                    *slot = m;
                }
                v
            },
        );
        let first_a = first.compose(key("a"));

        assert_eq!(first_a.get_option(&vec![]), None);
        assert!(first_a.set(vec![], 5).is_empty());

        let updated = first_a.set(vec![HashMap::from([("a", 0)])], 5);
        assert_eq!(updated[0]["a"], 5);
    }
}
