//! Algebraic strategies plugged into the trees.
//!
//! A strategy is a value (usually zero-sized) that knows how to combine two elements and
//! what the neutral element is. Trees own their strategy, so anything the combination
//! depends on (like a modulus) travels with the tree instead of living in a global.

/// A closed binary operation over `Elem`. Called `add` whatever it actually computes.
pub trait Magma {
    type Elem: Clone;

    /// `lhs` covers the positions before `rhs`.
    fn add(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem;
}

/// Marker: `add(a, add(b, c)) == add(add(a, b), c)`. Not checked at runtime.
pub trait Associativity: Magma {}
/// Marker: `add(a, b) == add(b, a)`.
pub trait Commutativity: Magma {}
pub trait Identity: Magma {
    /// Neutral on both sides; what an empty range combines to.
    fn id(&self) -> Self::Elem;
}
/// Inverses, needed for point-add and difference arrays.
pub trait Invertibility: Magma {
    fn inv(&self, x: Self::Elem) -> Self::Elem;

    /// `add(lhs, inv(rhs))`
    #[inline]
    fn sub(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem {
        self.add(lhs, self.inv(rhs))
    }
}

/// What every tree needs: ranges combine the same way however they are split.
pub trait Monoid: Magma + Associativity + Identity {}
impl<M: Magma + Associativity + Identity> Monoid for M {}

pub trait CommutativeMonoid: Monoid + Commutativity {}
impl<CM: Monoid + Commutativity> CommutativeMonoid for CM {}

/// A monoid whose point updates can be expressed as deltas.
pub trait Group: Magma + Associativity + Identity + Invertibility {}
impl<G: Magma + Associativity + Identity + Invertibility> Group for G {}

pub trait AbelianGroup: Group + Commutativity {}
impl<AG: Group + Commutativity> AbelianGroup for AG {}

/// Sum.
#[derive(Clone, Copy, Debug)]
pub struct NumAdditiveGroups<T>(std::marker::PhantomData<T>);

impl<T> Default for NumAdditiveGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumAdditiveGroups<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Num + Clone> Magma for NumAdditiveGroups<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}
impl<T: num::Num + Clone> Identity for NumAdditiveGroups<T> {
    #[inline]
    fn id(&self) -> T {
        T::zero()
    }
}
impl<T: num::Num + num::Signed + Clone> Invertibility for NumAdditiveGroups<T> {
    #[inline]
    fn inv(&self, x: T) -> T {
        -x
    }

    #[inline]
    fn sub(&self, lhs: T, rhs: T) -> T {
        lhs - rhs
    }
}
impl<T: num::Num + Clone> Associativity for NumAdditiveGroups<T> {}
impl<T: num::Num + Clone> Commutativity for NumAdditiveGroups<T> {}

/// Maximum, with the smallest representable value as identity.
#[derive(Clone, Copy, Debug)]
pub struct NumMax<T>(std::marker::PhantomData<T>);

impl<T> Default for NumMax<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumMax<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Bounded + PartialOrd + Clone> Magma for NumMax<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        if lhs < rhs {
            rhs
        } else {
            lhs
        }
    }
}
impl<T: num::Bounded + PartialOrd + Clone> Identity for NumMax<T> {
    #[inline]
    fn id(&self) -> T {
        T::min_value()
    }
}
impl<T: num::Bounded + PartialOrd + Clone> Associativity for NumMax<T> {}
impl<T: num::Bounded + PartialOrd + Clone> Commutativity for NumMax<T> {}

/// Counts of 0/1 marks. Same algebra as a `u32` sum, but trees over it also get
/// [`flip`](crate::SegmentTree::flip).
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolCount;

impl Magma for BoolCount {
    type Elem = u32;

    #[inline]
    fn add(&self, lhs: u32, rhs: u32) -> u32 {
        lhs + rhs
    }
}
impl Identity for BoolCount {
    #[inline]
    fn id(&self) -> u32 {
        0
    }
}
impl Associativity for BoolCount {}
impl Commutativity for BoolCount {}
