use crate::error::{Error, Result};
use crate::groups::{Associativity, Identity, Magma};
use std::ops::{Index, IndexMut};

/// `N × N` matrix of residues. Which modulus the entries live under is decided by the
/// [`ModMatrixProduct`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<const N: usize> {
    rows: [[u64; N]; N],
}

pub type Matrix2 = Matrix<2>;

impl<const N: usize> Matrix<N> {
    pub const fn zero() -> Self {
        Self { rows: [[0; N]; N] }
    }

    pub fn identity() -> Self {
        let mut out = Self::zero();
        for i in 0..N {
            out.rows[i][i] = 1;
        }
        out
    }

    #[inline]
    pub fn rows(&self) -> &[[u64; N]; N] {
        &self.rows
    }
}

impl<const N: usize> Index<usize> for Matrix<N> {
    type Output = [u64; N];

    #[inline]
    fn index(&self, i: usize) -> &[u64; N] {
        &self.rows[i]
    }
}

impl<const N: usize> IndexMut<usize> for Matrix<N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut [u64; N] {
        &mut self.rows[i]
    }
}

/// Matrix multiplication modulo a fixed positive modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModMatrixProduct<const N: usize> {
    modulus: u64,
}

impl<const N: usize> ModMatrixProduct<N> {
    pub fn new(modulus: u64) -> Result<Self> {
        if modulus == 0 {
            return Err(Error::ZeroModulus);
        }
        Ok(Self { modulus })
    }

    #[inline]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Reduces every entry of `rows` and wraps them into a matrix.
    pub fn matrix(&self, mut rows: [[u64; N]; N]) -> Matrix<N> {
        for row in rows.iter_mut() {
            for x in row.iter_mut() {
                *x %= self.modulus;
            }
        }
        Matrix { rows }
    }

    #[inline]
    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        (a as u128 * b as u128 % self.modulus as u128) as u64
    }
}

impl<const N: usize> Magma for ModMatrixProduct<N> {
    type Elem = Matrix<N>;

    fn add(&self, lhs: Matrix<N>, rhs: Matrix<N>) -> Matrix<N> {
        let mut out = Matrix::zero();
        for i in 0..N {
            for j in 0..N {
                let mut x: u128 = 0;
                for k in 0..N {
                    x = (x + self.mul_mod(lhs[i][k], rhs[k][j]) as u128) % self.modulus as u128;
                }
                out[i][j] = x as u64;
            }
        }
        out
    }
}
impl<const N: usize> Identity for ModMatrixProduct<N> {
    /// Under modulus 1 this is the zero matrix.
    fn id(&self) -> Matrix<N> {
        self.matrix(Matrix::<N>::identity().rows)
    }
}
impl<const N: usize> Associativity for ModMatrixProduct<N> {}
