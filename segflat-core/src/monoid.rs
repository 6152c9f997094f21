//! Monoid operators for scans and reductions
//!
//! Every scan, reduce, and segmented primitive in this crate is
//! parameterised by a monoid: an associative binary operation paired with
//! its identity element. The operation is supplied per call as an operator
//! value, so one element type can be scanned with several different monoids
//! (sum, product, max, ...).

use smallvec::SmallVec;
use std::marker::PhantomData;

/// An associative binary operation with an identity element
///
/// A monoid is an algebraic structure with an associative binary operation
/// and an identity element:
/// - Associativity: combine(a, combine(b, c)) == combine(combine(a, b), c)
/// - Identity: combine(identity, a) == combine(a, identity) == a
///
/// These laws are not checked. Parallel executors split the input into
/// chunks and combine partial results in a different grouping than a
/// sequential fold would, so an operator that violates associativity
/// produces executor-dependent results.
pub trait Monoid: Send + Sync {
    /// Element type the operator acts on
    type Elem: Clone + Send + Sync;

    /// Returns the identity element
    fn identity(&self) -> Self::Elem;

    /// Combines two elements, left operand first
    fn combine(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
}

/// Extension methods available on every monoid
pub trait MonoidExt: Monoid {
    /// Reduces a collection of elements to a single result
    ///
    /// Uses tree reduction to maintain O(log n) depth even with many elements.
    /// Operand order is preserved, so only associativity is required.
    fn reduce_tree<I>(&self, iter: I) -> Self::Elem
    where
        I: IntoIterator<Item = Self::Elem>,
    {
        // Use SmallVec to avoid heap allocation for small collections
        let mut items: SmallVec<[Self::Elem; 16]> = iter.into_iter().collect();

        // Tree reduction: combine pairs until only one remains
        while items.len() > 1 {
            let mut next_level = SmallVec::<[Self::Elem; 16]>::new();
            for pair in items.chunks(2) {
                match pair {
                    [left, right] => next_level.push(self.combine(left, right)),
                    [single] => next_level.push(single.clone()),
                    _ => {}
                }
            }

            items = next_level;
        }

        items.into_iter().next().unwrap_or_else(|| self.identity())
    }
}

impl<M: Monoid + ?Sized> MonoidExt for M {}

impl<M: Monoid + ?Sized> Monoid for &M {
    type Elem = M::Elem;

    fn identity(&self) -> Self::Elem {
        (**self).identity()
    }

    fn combine(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        (**self).combine(a, b)
    }
}

/// Addition with identity zero. Integer sums wrap on overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum<T>(PhantomData<fn() -> T>);

/// Multiplication with identity one. Integer products wrap on overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product<T>(PhantomData<fn() -> T>);

/// Maximum with identity equal to the type's minimum value
#[derive(Debug, Clone, Copy, Default)]
pub struct Max<T>(PhantomData<fn() -> T>);

/// Minimum with identity equal to the type's maximum value
#[derive(Debug, Clone, Copy, Default)]
pub struct Min<T>(PhantomData<fn() -> T>);

macro_rules! operator_constructors {
    ($($op:ident),*) => {
        $(
            impl<T> $op<T> {
                /// Create the operator
                pub const fn new() -> Self {
                    Self(PhantomData)
                }
            }
        )*
    };
}

operator_constructors!(Sum, Product, Max, Min);

macro_rules! integer_monoids {
    ($($t:ty),*) => {
        $(
            impl Monoid for Sum<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { 0 }
                fn combine(&self, a: &$t, b: &$t) -> $t { a.wrapping_add(*b) }
            }

            impl Monoid for Product<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { 1 }
                fn combine(&self, a: &$t, b: &$t) -> $t { a.wrapping_mul(*b) }
            }

            impl Monoid for Max<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { <$t>::MIN }
                fn combine(&self, a: &$t, b: &$t) -> $t { *a.max(b) }
            }

            impl Monoid for Min<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { <$t>::MAX }
                fn combine(&self, a: &$t, b: &$t) -> $t { *a.min(b) }
            }
        )*
    };
}

integer_monoids!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Floating-point addition is only approximately associative; parallel and
// sequential results may differ in the last bits.
macro_rules! float_monoids {
    ($($t:ty),*) => {
        $(
            impl Monoid for Sum<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { 0.0 }
                fn combine(&self, a: &$t, b: &$t) -> $t { a + b }
            }

            impl Monoid for Product<$t> {
                type Elem = $t;
                fn identity(&self) -> $t { 1.0 }
                fn combine(&self, a: &$t, b: &$t) -> $t { a * b }
            }
        )*
    };
}

float_monoids!(f32, f64);

/// Logical OR with identity `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Monoid for Any {
    type Elem = bool;

    fn identity(&self) -> bool {
        false
    }

    fn combine(&self, a: &bool, b: &bool) -> bool {
        *a || *b
    }
}

/// Logical AND with identity `true`
#[derive(Debug, Clone, Copy, Default)]
pub struct All;

impl Monoid for All {
    type Elem = bool;

    fn identity(&self) -> bool {
        true
    }

    fn combine(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }
}

/// A monoid built from a closure and its neutral element
///
/// The caller is responsible for `op` being associative and `ne` being
/// its identity.
///
/// ```rust
/// use segflat_core::monoid::{FnMonoid, Monoid};
///
/// let concat = FnMonoid::new(|a: &String, b: &String| format!("{a}{b}"), String::new());
/// assert_eq!(concat.combine(&"ab".to_string(), &"c".to_string()), "abc");
/// ```
#[derive(Clone)]
pub struct FnMonoid<T, F> {
    op: F,
    ne: T,
}

impl<T, F> FnMonoid<T, F>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    /// Pair an operator with its neutral element
    pub fn new(op: F, ne: T) -> Self {
        Self { op, ne }
    }
}

impl<T, F> Monoid for FnMonoid<T, F>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> T + Send + Sync,
{
    type Elem = T;

    fn identity(&self) -> T {
        self.ne.clone()
    }

    fn combine(&self, a: &T, b: &T) -> T {
        (self.op)(a, b)
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for FnMonoid<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMonoid").field("ne", &self.ne).finish()
    }
}

/// The segment-aware lifting of a monoid over `(flag, value)` pairs
///
/// `combine((f1, x1), (f2, x2)) = (f1 || f2, if f2 { x2 } else { x1 <> x2 })`
/// with identity `(false, identity)`. A set flag on the right operand
/// discards everything accumulated on the left, so the accumulator resets
/// at every segment start. The lifted operation is associative whenever the
/// inner operation is.
#[derive(Debug, Clone, Copy)]
pub struct Segmented<M> {
    inner: M,
}

impl<M: Monoid> Segmented<M> {
    /// Lift `inner` to flagged pairs
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Monoid> Monoid for Segmented<M> {
    type Elem = (bool, M::Elem);

    fn identity(&self) -> Self::Elem {
        (false, self.inner.identity())
    }

    fn combine(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        let (f1, x1) = a;
        let (f2, x2) = b;
        let value = if *f2 {
            x2.clone()
        } else {
            self.inner.combine(x1, x2)
        };
        (*f1 || *f2, value)
    }
}
