//! Contracted s-type Gaussian basis sets for H and He.
//!
//! Exponents and contraction coefficients are the standard tabulated values;
//! each primitive carries its `(2α/π)^{3/4}` normalisation and the whole
//! contraction is renormalised to unit self-overlap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChemError, ChemResult};
use crate::integrals::primitive_overlap;
use crate::molecule::{Atom, Element};

/// Named basis set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisSet {
    /// Minimal basis, three Gaussians per Slater function.
    #[serde(rename = "sto-3g")]
    Sto3g,
    /// Split-valence basis: one 3-term inner shell, one 1-term outer shell.
    #[serde(rename = "6-31g")]
    Pople631g,
}

impl BasisSet {
    /// Name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BasisSet::Sto3g => "sto-3g",
            BasisSet::Pople631g => "6-31g",
        }
    }

    /// Shells `(exponents, coefficients)` placed on an atom of `element`.
    fn shells(self, element: Element) -> &'static [(&'static [f64], &'static [f64])] {
        match (self, element) {
            (BasisSet::Sto3g, Element::H) => &[(STO3G_H_EXP, STO3G_COEF)],
            (BasisSet::Sto3g, Element::He) => &[(STO3G_HE_EXP, STO3G_COEF)],
            (BasisSet::Pople631g, Element::H) => &[
                (P631G_H_INNER_EXP, P631G_H_INNER_COEF),
                (P631G_H_OUTER_EXP, ONE),
            ],
            (BasisSet::Pople631g, Element::He) => &[
                (P631G_HE_INNER_EXP, P631G_HE_INNER_COEF),
                (P631G_HE_OUTER_EXP, ONE),
            ],
        }
    }
}

impl FromStr for BasisSet {
    type Err = ChemError;

    fn from_str(s: &str) -> ChemResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sto-3g" | "sto3g" => Ok(BasisSet::Sto3g),
            "6-31g" | "631g" => Ok(BasisSet::Pople631g),
            other => Err(ChemError::UnsupportedBasis(other.to_string())),
        }
    }
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const STO3G_COEF: &[f64] = &[0.154_328_97, 0.535_328_14, 0.444_634_54];
const STO3G_H_EXP: &[f64] = &[3.425_250_91, 0.623_913_73, 0.168_855_40];
const STO3G_HE_EXP: &[f64] = &[6.362_421_39, 1.158_923_00, 0.313_649_79];

const P631G_H_INNER_EXP: &[f64] = &[18.731_137_0, 2.825_393_7, 0.640_121_7];
const P631G_H_INNER_COEF: &[f64] = &[0.033_494_60, 0.234_726_95, 0.813_757_33];
const P631G_H_OUTER_EXP: &[f64] = &[0.161_277_8];
const P631G_HE_INNER_EXP: &[f64] = &[38.421_634_0, 5.778_030_0, 1.241_774_0];
const P631G_HE_INNER_COEF: &[f64] = &[0.023_766_0, 0.154_679_0, 0.469_630_0];
const P631G_HE_OUTER_EXP: &[f64] = &[0.297_964_0];
const ONE: &[f64] = &[1.0];

/// A normalised primitive: `coef · exp(-alpha |r - center|²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Gaussian exponent.
    pub alpha: f64,
    /// Contraction coefficient including primitive normalisation.
    pub coef: f64,
}

/// A contracted s-type Gaussian centred on an atom.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisFunction {
    /// Centre in bohr.
    pub center: [f64; 3],
    /// Primitives.
    pub primitives: Vec<Primitive>,
}

impl BasisFunction {
    fn new(center: [f64; 3], exps: &[f64], coefs: &[f64]) -> Self {
        let primitives: Vec<Primitive> = exps
            .iter()
            .zip(coefs)
            .map(|(&alpha, &d)| Primitive {
                alpha,
                coef: d * (2.0 * alpha / std::f64::consts::PI).powf(0.75),
            })
            .collect();
        let mut f = Self { center, primitives };
        let norm = f.self_overlap().sqrt();
        for p in &mut f.primitives {
            p.coef /= norm;
        }
        f
    }

    fn self_overlap(&self) -> f64 {
        let mut s = 0.0;
        for a in &self.primitives {
            for b in &self.primitives {
                s += a.coef * b.coef * primitive_overlap(a.alpha, b.alpha, 0.0);
            }
        }
        s
    }
}

/// Basis functions for every atom, in atom order then shell order.
pub fn build_basis(atoms: &[Atom], basis: BasisSet) -> Vec<BasisFunction> {
    atoms
        .iter()
        .flat_map(|atom| {
            basis
                .shells(atom.element)
                .iter()
                .map(move |(exps, coefs)| BasisFunction::new(atom.position, exps, coefs))
        })
        .collect()
}
