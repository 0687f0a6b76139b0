use std::sync::Arc;

use super::Optional;

type Preview<S, A> = Arc<dyn Fn(&S) -> Option<A> + Send + Sync>;
type Review<S, A> = Arc<dyn Fn(A) -> S + Send + Sync>;

/// Access to one case of a sum type `S`.
///
/// `preview` extracts the case if `S` is in it, `review` builds an `S` from
/// the case. A well-behaved prism satisfies:
///
/// ```text
/// prism.preview(&prism.review(a.clone())) == Some(a)          (review-preview)
/// prism.preview(&s) == Some(a)  implies  prism.review(a) == s  (preview-review)
/// ```
pub struct Prism<S, A> {
    preview: Preview<S, A>,
    review: Review<S, A>,
}

impl<S, A> Clone for Prism<S, A> {
    fn clone(&self) -> Self {
        Prism {
            preview: Arc::clone(&self.preview),
            review: Arc::clone(&self.review),
        }
    }
}

impl<S, A> std::fmt::Debug for Prism<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prism")
            .field("preview", &"<function>")
            .field("review", &"<function>")
            .finish()
    }
}

impl<S: 'static, A: 'static> Prism<S, A> {
    /// Build a prism from a partial getter and a constructor.
    ///
    /// ```
    /// use weir::Prism;
    ///
    /// let ok = Prism::new(|r: &Result<i32, String>| r.as_ref().ok().copied(), Ok);
    /// assert_eq!(ok.preview(&Ok(3)), Some(3));
    /// assert_eq!(ok.preview(&Err("no".into())), None);
    /// assert_eq!(ok.review(4), Ok(4));
    /// ```
    pub fn new<P, R>(preview: P, review: R) -> Self
    where
        P: Fn(&S) -> Option<A> + Send + Sync + 'static,
        R: Fn(A) -> S + Send + Sync + 'static,
    {
        Prism {
            preview: Arc::new(preview),
            review: Arc::new(review),
        }
    }

    /// Extract the case, if `source` is in it.
    pub fn preview(&self, source: &S) -> Option<A> {
        (self.preview)(source)
    }

    /// Build a source from the case.
    pub fn review(&self, value: A) -> S {
        (self.review)(value)
    }

    /// Apply `f` to the case, or return `source` unchanged if it is in another
    /// case.
    pub fn modify<F>(&self, source: S, f: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        match self.preview(&source) {
            Some(value) => self.review(f(value)),
            None => source,
        }
    }

    /// Focus on a case nested inside this one.
    pub fn compose<B: 'static>(self, other: Prism<A, B>) -> Prism<S, B> {
        let outer = self.clone();
        let inner = other.clone();
        Prism::new(
            move |s: &S| self.preview(s).and_then(|a| other.preview(&a)),
            move |b: B| outer.review(inner.review(b)),
        )
    }

    /// View this prism as an [`Optional`]. Setting only takes effect when the
    /// source is already in the case.
    pub fn to_optional(self) -> Optional<S, A> {
        let setter = self.clone();
        Optional::new(
            move |s: &S| self.preview(s),
            move |s: S, a: A| setter.modify(s, |_| a),
        )
    }
}
