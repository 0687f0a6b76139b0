use std::sync::Arc;

use crate::monoid::{fold_all, Const, Monoid};

type GetAll<S, A> = Arc<dyn Fn(&S) -> Vec<A> + Send + Sync>;
type ModifyAll<S, A> = Arc<dyn Fn(S, &dyn Fn(A) -> A) -> S + Send + Sync>;

/// Access to zero or more parts of `S` at once.
///
/// ```
/// use weir::monoid::Sum;
/// use weir::optics::Traversal;
///
/// let each = Traversal::<Vec<u32>, u32>::each();
///
/// assert_eq!(each.modify_all(vec![1, 2, 3], |n| n * 10), vec![10, 20, 30]);
/// assert_eq!(each.fold_map(&vec![1, 2, 3], Sum), Sum(6));
/// ```
pub struct Traversal<S, A> {
    get_all: GetAll<S, A>,
    modify_all: ModifyAll<S, A>,
}

impl<S, A> Clone for Traversal<S, A> {
    fn clone(&self) -> Self {
        Traversal {
            get_all: Arc::clone(&self.get_all),
            modify_all: Arc::clone(&self.modify_all),
        }
    }
}

impl<S, A> std::fmt::Debug for Traversal<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("get_all", &"<function>")
            .field("modify_all", &"<function>")
            .finish()
    }
}

impl<S: 'static, A: 'static> Traversal<S, A> {
    /// Build a traversal from a collector and an updater.
    pub fn new<G, M>(get_all: G, modify_all: M) -> Self
    where
        G: Fn(&S) -> Vec<A> + Send + Sync + 'static,
        M: Fn(S, &dyn Fn(A) -> A) -> S + Send + Sync + 'static,
    {
        Traversal {
            get_all: Arc::new(get_all),
            modify_all: Arc::new(modify_all),
        }
    }

    /// Every focused part, in order.
    pub fn get_all(&self, source: &S) -> Vec<A> {
        (self.get_all)(source)
    }

    /// Apply `f` to every focused part.
    pub fn modify_all<F>(&self, source: S, f: F) -> S
    where
        F: Fn(A) -> A,
    {
        (self.modify_all)(source, &f)
    }

    /// Replace every focused part with `value`.
    pub fn set_all(&self, source: S, value: A) -> S
    where
        A: Clone,
    {
        self.modify_all(source, |_| value.clone())
    }

    /// Map every focused part into a monoid and combine the results.
    pub fn fold_map<M, F>(&self, source: &S, f: F) -> M
    where
        M: Monoid,
        F: Fn(A) -> M,
    {
        let parts = self.get_all(source).into_iter().map(|a| Const::<M, S>::new(f(a)));
        fold_all(parts).into_inner()
    }
}

impl<A: Clone + 'static> Traversal<Vec<A>, A> {
    /// Focus on every element of a `Vec`.
    pub fn each() -> Self {
        Traversal::new(
            |items: &Vec<A>| items.clone(),
            |items: Vec<A>, f: &dyn Fn(A) -> A| items.into_iter().map(f).collect(),
        )
    }
}
