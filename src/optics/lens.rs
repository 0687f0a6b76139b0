use std::sync::Arc;

use super::{Optional, Prism};

type Getter<S, A> = Arc<dyn Fn(&S) -> A + Send + Sync>;
type Setter<S, A> = Arc<dyn Fn(S, A) -> S + Send + Sync>;

/// Get and set access to a part of `S` that is always present.
///
/// A well-behaved lens satisfies:
///
/// ```text
/// lens.set(s.clone(), lens.get(&s)) == s              (get-put)
/// lens.get(&lens.set(s, a.clone())) == a              (put-get)
/// lens.set(lens.set(s.clone(), a1), a2) == lens.set(s, a2)   (put-put)
/// ```
pub struct Lens<S, A> {
    getter: Getter<S, A>,
    setter: Setter<S, A>,
}

impl<S, A> Clone for Lens<S, A> {
    fn clone(&self) -> Self {
        Lens {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<S, A> std::fmt::Debug for Lens<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lens")
            .field("get", &"<function>")
            .field("set", &"<function>")
            .finish()
    }
}

impl<S: 'static, A: 'static> Lens<S, A> {
    /// Build a lens from a getter and a setter.
    ///
    /// ```
    /// use weir::Lens;
    ///
    /// let first = Lens::new(|p: &(i32, char)| p.0, |p: (i32, char), x| (x, p.1));
    /// assert_eq!(first.get(&(1, 'a')), 1);
    /// assert_eq!(first.set((1, 'a'), 5), (5, 'a'));
    /// ```
    pub fn new<G, St>(get: G, set: St) -> Self
    where
        G: Fn(&S) -> A + Send + Sync + 'static,
        St: Fn(S, A) -> S + Send + Sync + 'static,
    {
        Lens {
            getter: Arc::new(get),
            setter: Arc::new(set),
        }
    }

    /// Read the focused part.
    pub fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    /// Replace the focused part.
    pub fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }

    /// Replace the focused part with `f` applied to it.
    pub fn modify<F>(&self, source: S, f: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        let current = self.get(&source);
        self.set(source, f(current))
    }

    /// Focus further into the part with `other`.
    ///
    /// ```
    /// use weir::Lens;
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Address { city: String }
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Person { address: Address }
    ///
    /// let address = Lens::new(
    ///     |p: &Person| p.address.clone(),
    ///     |_p: Person, address| Person { address },
    /// );
    /// let city = Lens::new(|a: &Address| a.city.clone(), |_a: Address, city| Address { city });
    /// let person_city = address.compose(city);
    ///
    /// let p = Person { address: Address { city: "Lyon".into() } };
    /// assert_eq!(person_city.get(&p), "Lyon");
    /// assert_eq!(person_city.set(p, "Oslo".into()).address.city, "Oslo");
    /// ```
    pub fn compose<B: 'static>(self, other: Lens<A, B>) -> Lens<S, B> {
        let outer = self.clone();
        let inner = other.clone();
        Lens::new(
            move |s: &S| other.get(&self.get(s)),
            move |s: S, b: B| {
                let part = outer.get(&s);
                outer.set(s, inner.set(part, b))
            },
        )
    }

    /// Focus into one case of the part, giving an [`Optional`].
    pub fn compose_prism<B: 'static>(self, prism: Prism<A, B>) -> Optional<S, B> {
        let outer = self.clone();
        let inner = prism.clone();
        Optional::new(
            move |s: &S| prism.preview(&self.get(s)),
            move |s: S, b: B| {
                let part = outer.get(&s);
                if inner.preview(&part).is_some() {
                    outer.set(s, inner.review(b))
                } else {
                    s
                }
            },
        )
    }

    /// View this lens as an [`Optional`] whose part is always present.
    pub fn to_optional(self) -> Optional<S, A> {
        let setter = self.clone();
        Optional::new(move |s: &S| Some(self.get(s)), move |s, a| setter.set(s, a))
    }
}
