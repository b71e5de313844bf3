//! One- and two-electron integrals over contracted s-type Gaussians.
//!
//! Closed forms for s primitives (Szabo & Ostlund, appendix A):
//!
//! ```text
//! S   = (π/p)^{3/2} · exp(-ab/p · |A-B|²)
//! T   = ab/p · (3 - 2ab/p · |A-B|²) · S
//! V_C = -2π/p · Z_C · exp(-ab/p · |A-B|²) · F0(p · |P-C|²)
//! (ab|cd) = 2π^{5/2} / (p q √(p+q)) · exp(-ab/p |A-B|² - cd/q |C-D|²)
//!           · F0(pq/(p+q) · |P-Q|²)
//! ```
//!
//! with `p = a + b`, `P = (aA + bB)/p` and `F0(t) = ½ √(π/t) erf(√t)`.

use std::f64::consts::PI;

use nalgebra::DMatrix;
use ndarray::Array4;
use tracing::debug;

use crate::basis::BasisFunction;
use crate::molecule::{Atom, dist_sqr};

/// Zeroth-order Boys function.
pub fn boys_f0(t: f64) -> f64 {
    if t < 1e-8 {
        1.0 - t / 3.0
    } else {
        0.5 * (PI / t).sqrt() * libm::erf(t.sqrt())
    }
}

/// Overlap of two unnormalised s primitives at squared distance `r2`.
pub fn primitive_overlap(a: f64, b: f64, r2: f64) -> f64 {
    let p = a + b;
    (PI / p).powf(1.5) * (-a * b / p * r2).exp()
}

fn primitive_kinetic(a: f64, b: f64, r2: f64) -> f64 {
    let mu = a * b / (a + b);
    mu * (3.0 - 2.0 * mu * r2) * primitive_overlap(a, b, r2)
}

fn gaussian_product_center(a: f64, ca: &[f64; 3], b: f64, cb: &[f64; 3]) -> [f64; 3] {
    let p = a + b;
    [
        (a * ca[0] + b * cb[0]) / p,
        (a * ca[1] + b * cb[1]) / p,
        (a * ca[2] + b * cb[2]) / p,
    ]
}

/// `⟨f|g⟩`.
pub fn overlap(f: &BasisFunction, g: &BasisFunction) -> f64 {
    let r2 = dist_sqr(&f.center, &g.center);
    let mut s = 0.0;
    for pa in &f.primitives {
        for pb in &g.primitives {
            s += pa.coef * pb.coef * primitive_overlap(pa.alpha, pb.alpha, r2);
        }
    }
    s
}

/// `⟨f|-½∇²|g⟩`.
pub fn kinetic(f: &BasisFunction, g: &BasisFunction) -> f64 {
    let r2 = dist_sqr(&f.center, &g.center);
    let mut t = 0.0;
    for pa in &f.primitives {
        for pb in &g.primitives {
            t += pa.coef * pb.coef * primitive_kinetic(pa.alpha, pb.alpha, r2);
        }
    }
    t
}

/// `⟨f|-Σ_C Z_C/|r-C||g⟩`.
pub fn nuclear_attraction(f: &BasisFunction, g: &BasisFunction, atoms: &[Atom]) -> f64 {
    let r2 = dist_sqr(&f.center, &g.center);
    let mut v = 0.0;
    for pa in &f.primitives {
        for pb in &g.primitives {
            let p = pa.alpha + pb.alpha;
            let center = gaussian_product_center(pa.alpha, &f.center, pb.alpha, &g.center);
            let prefactor = -2.0 * PI / p * (-pa.alpha * pb.alpha / p * r2).exp();
            let sum: f64 = atoms
                .iter()
                .map(|atom| {
                    f64::from(atom.element.atomic_number())
                        * boys_f0(p * dist_sqr(&center, &atom.position))
                })
                .sum();
            v += pa.coef * pb.coef * prefactor * sum;
        }
    }
    v
}

/// Chemists' notation `(ij|kl)`.
pub fn electron_repulsion(
    i: &BasisFunction,
    j: &BasisFunction,
    k: &BasisFunction,
    l: &BasisFunction,
) -> f64 {
    let r2_ij = dist_sqr(&i.center, &j.center);
    let r2_kl = dist_sqr(&k.center, &l.center);
    let mut total = 0.0;
    for pa in &i.primitives {
        for pb in &j.primitives {
            let p = pa.alpha + pb.alpha;
            let p_center = gaussian_product_center(pa.alpha, &i.center, pb.alpha, &j.center);
            let e_ab = (-pa.alpha * pb.alpha / p * r2_ij).exp();
            let c_ab = pa.coef * pb.coef;
            for pc in &k.primitives {
                for pd in &l.primitives {
                    let q = pc.alpha + pd.alpha;
                    let q_center =
                        gaussian_product_center(pc.alpha, &k.center, pd.alpha, &l.center);
                    let e_cd = (-pc.alpha * pd.alpha / q * r2_kl).exp();
                    let t = p * q / (p + q) * dist_sqr(&p_center, &q_center);
                    let value = 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt())
                        * e_ab
                        * e_cd
                        * boys_f0(t);
                    total += c_ab * pc.coef * pd.coef * value;
                }
            }
        }
    }
    total
}

/// All atomic-orbital integrals of a molecule.
#[derive(Debug, Clone)]
pub struct AoIntegrals {
    /// Overlap matrix `S`.
    pub overlap: DMatrix<f64>,
    /// Kinetic energy matrix `T`.
    pub kinetic: DMatrix<f64>,
    /// Nuclear attraction matrix `V`.
    pub nuclear: DMatrix<f64>,
    /// Electron repulsion tensor `(ij|kl)`.
    pub eri: Array4<f64>,
}

impl AoIntegrals {
    /// Evaluate every integral over `basis` in the field of `atoms`.
    ///
    /// The repulsion tensor is filled from its unique entries using the
    /// eightfold permutational symmetry of real orbitals.
    pub fn compute(basis: &[BasisFunction], atoms: &[Atom]) -> Self {
        let n = basis.len();
        let overlap = DMatrix::from_fn(n, n, |i, j| overlap(&basis[i], &basis[j]));
        let kinetic = DMatrix::from_fn(n, n, |i, j| kinetic(&basis[i], &basis[j]));
        let nuclear =
            DMatrix::from_fn(n, n, |i, j| nuclear_attraction(&basis[i], &basis[j], atoms));

        let mut eri = Array4::<f64>::zeros((n, n, n, n));
        let mut unique = 0usize;
        for i in 0..n {
            for j in 0..=i {
                let ij = i * (i + 1) / 2 + j;
                for k in 0..n {
                    for l in 0..=k {
                        let kl = k * (k + 1) / 2 + l;
                        if kl > ij {
                            continue;
                        }
                        let v = electron_repulsion(&basis[i], &basis[j], &basis[k], &basis[l]);
                        unique += 1;
                        for (a, b, c, d) in [
                            (i, j, k, l),
                            (j, i, k, l),
                            (i, j, l, k),
                            (j, i, l, k),
                            (k, l, i, j),
                            (l, k, i, j),
                            (k, l, j, i),
                            (l, k, j, i),
                        ] {
                            eri[[a, b, c, d]] = v;
                        }
                    }
                }
            }
        }
        debug!(n_basis = n, unique_eri = unique, "computed AO integrals");

        Self {
            overlap,
            kinetic,
            nuclear,
            eri,
        }
    }

    /// Number of basis functions.
    pub fn n_basis(&self) -> usize {
        self.overlap.nrows()
    }

    /// Core Hamiltonian `T + V`.
    pub fn core_hamiltonian(&self) -> DMatrix<f64> {
        &self.kinetic + &self.nuclear
    }
}
