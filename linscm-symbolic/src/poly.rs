//! Multivariate polynomials with exact integer coefficients.
//!
//! Coefficients are `i64`. The `checked_*` methods report overflow as
//! [`ScmError::CoefficientOverflow`]; the operator impls are shorthands
//! that panic instead, like the integer operators in debug builds.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use linscm_core::errors::{ScmError, ScmResult};

use crate::format::TermStyle;
use crate::symbol::Symbol;

fn overflow(operation: &'static str) -> ScmError {
    ScmError::CoefficientOverflow { operation }
}

/// A product of symbols with positive exponents, sorted by symbol.
///
/// The empty product is the constant monomial `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial {
    factors: Vec<(Symbol, u32)>,
}

impl Monomial {
    pub fn one() -> Self {
        Self::default()
    }

    pub fn of(symbol: Symbol) -> Self {
        Self {
            factors: vec![(symbol, 1)],
        }
    }

    /// Build from arbitrary factors. Repeated symbols are merged and zero
    /// exponents dropped.
    pub fn new(factors: impl IntoIterator<Item = (Symbol, u32)>) -> Self {
        let mut merged: BTreeMap<Symbol, u32> = BTreeMap::new();
        for (symbol, exponent) in factors {
            *merged.entry(symbol).or_default() += exponent;
        }
        Self {
            factors: merged.into_iter().filter(|&(_, e)| e > 0).collect(),
        }
    }

    pub fn factors(&self) -> &[(Symbol, u32)] {
        &self.factors
    }

    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// Total degree.
    pub fn degree(&self) -> u32 {
        self.factors.iter().map(|&(_, e)| e).sum()
    }

    pub fn exponent(&self, symbol: &Symbol) -> u32 {
        self.factors
            .binary_search_by(|(s, _)| s.cmp(symbol))
            .map(|i| self.factors[i].1)
            .unwrap_or(0)
    }

    /// Product of two monomials, merging the sorted factor lists.
    pub fn product(&self, other: &Monomial) -> Monomial {
        let mut factors = Vec::with_capacity(self.factors.len() + other.factors.len());
        let (mut i, mut j) = (0, 0);
        while i < self.factors.len() && j < other.factors.len() {
            let (a, ea) = self.factors[i];
            let (b, eb) = other.factors[j];
            match a.cmp(&b) {
                Ordering::Less => {
                    factors.push((a, ea));
                    i += 1;
                }
                Ordering::Greater => {
                    factors.push((b, eb));
                    j += 1;
                }
                Ordering::Equal => {
                    factors.push((a, ea + eb));
                    i += 1;
                    j += 1;
                }
            }
        }
        factors.extend_from_slice(&self.factors[i..]);
        factors.extend_from_slice(&other.factors[j..]);
        Monomial { factors }
    }

    /// `self / other`, or `None` if some factor of `other` does not divide `self`.
    pub fn checked_div(&self, other: &Monomial) -> Option<Monomial> {
        let mut factors = self.factors.clone();
        for &(symbol, exponent) in &other.factors {
            let i = factors.binary_search_by(|(s, _)| s.cmp(&symbol)).ok()?;
            factors[i].1 = factors[i].1.checked_sub(exponent)?;
        }
        factors.retain(|&(_, e)| e > 0);
        Some(Monomial { factors })
    }

    /// Largest monomial dividing both.
    pub fn gcd(&self, other: &Monomial) -> Monomial {
        let factors = self
            .factors
            .iter()
            .filter_map(|&(symbol, e)| {
                let shared = e.min(other.exponent(&symbol));
                (shared > 0).then_some((symbol, shared))
            })
            .collect();
        Monomial { factors }
    }

    /// Pure lexicographic term order: the smallest symbol whose exponents
    /// differ decides, higher exponent first. Unlike the derived `Ord`, this
    /// is a monomial order (preserved by multiplication), which exact
    /// division needs to pick leading terms.
    pub fn lex_cmp(&self, other: &Monomial) -> Ordering {
        let (mut i, mut j) = (0, 0);
        loop {
            match (self.factors.get(i), other.factors.get(j)) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(&(a, ea)), Some(&(b, eb))) => match a.cmp(&b) {
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal if ea != eb => return ea.cmp(&eb),
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                },
            }
        }
    }
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A polynomial in canonical form: no zero coefficients, like terms merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, i64>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(1)
    }

    pub fn constant(value: i64) -> Self {
        Self::monomial(Monomial::one(), value)
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Self::monomial(Monomial::of(symbol), 1)
    }

    pub fn monomial(monomial: Monomial, coeff: i64) -> Self {
        let mut terms = BTreeMap::new();
        if coeff != 0 {
            terms.insert(monomial, coeff);
        }
        Self { terms }
    }

    /// Sum of the given terms; like monomials are merged.
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, i64)>) -> ScmResult<Self> {
        let mut p = Self::zero();
        for (m, c) in terms {
            p.add_term(m, c, "add")?;
        }
        Ok(p)
    }

    fn add_term(
        &mut self,
        monomial: Monomial,
        coeff: i64,
        operation: &'static str,
    ) -> ScmResult<()> {
        if coeff == 0 {
            return Ok(());
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(slot) => {
                slot.insert(coeff);
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get().checked_add(coeff).ok_or_else(|| overflow(operation))?;
                if sum == 0 {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant() == Some(1)
    }

    /// The value of a constant polynomial, `None` if any symbol remains.
    pub fn as_constant(&self) -> Option<i64> {
        match self.terms.len() {
            0 => Some(0),
            1 => self.terms.get(&Monomial::one()).copied(),
            _ => None,
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, i64)> {
        self.terms.iter().map(|(m, &c)| (m, c))
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Total degree; zero for constants and for the zero polynomial.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.terms
            .keys()
            .flat_map(|m| m.factors().iter().map(|&(s, _)| s))
            .collect()
    }

    pub fn contains_symbol(&self, symbol: &Symbol) -> bool {
        self.terms.keys().any(|m| m.exponent(symbol) > 0)
    }

    /// Leading term under [`Monomial::lex_cmp`].
    pub fn leading_term(&self) -> Option<(&Monomial, i64)> {
        self.terms().max_by(|(a, _), (b, _)| a.lex_cmp(b))
    }

    /// Common monomial factor of every term and the gcd of the coefficients.
    /// The zero polynomial has content `(1, 0)`.
    pub fn content(&self) -> (Monomial, u64) {
        let mut terms = self.terms();
        let Some((first, c0)) = terms.next() else {
            return (Monomial::one(), 0);
        };
        let mut monomial = first.clone();
        let mut coeff = c0.unsigned_abs();
        for (m, c) in terms {
            monomial = monomial.gcd(m);
            coeff = gcd_u64(coeff, c.unsigned_abs());
        }
        (monomial, coeff)
    }

    /// Largest monomial-times-integer dividing both `self` and `other`.
    pub fn common_content(&self, other: &Polynomial) -> Polynomial {
        let (m1, c1) = self.content();
        let (m2, c2) = other.content();
        let coeff = i64::try_from(gcd_u64(c1, c2)).unwrap_or(1);
        Polynomial::monomial(m1.gcd(&m2), coeff)
    }

    pub fn checked_add(&self, rhs: &Polynomial) -> ScmResult<Polynomial> {
        let mut out = self.clone();
        for (m, c) in rhs.terms() {
            out.add_term(m.clone(), c, "add")?;
        }
        Ok(out)
    }

    pub fn checked_sub(&self, rhs: &Polynomial) -> ScmResult<Polynomial> {
        let mut out = self.clone();
        for (m, c) in rhs.terms() {
            let negated = c.checked_neg().ok_or_else(|| overflow("sub"))?;
            out.add_term(m.clone(), negated, "sub")?;
        }
        Ok(out)
    }

    pub fn checked_mul(&self, rhs: &Polynomial) -> ScmResult<Polynomial> {
        let mut out = Polynomial::zero();
        for (ma, ca) in self.terms() {
            for (mb, cb) in rhs.terms() {
                let coeff = ca.checked_mul(cb).ok_or_else(|| overflow("mul"))?;
                out.add_term(ma.product(mb), coeff, "mul")?;
            }
        }
        Ok(out)
    }

    pub fn checked_scale(&self, factor: i64) -> ScmResult<Polynomial> {
        let mut out = Polynomial::zero();
        for (m, c) in self.terms() {
            let coeff = c.checked_mul(factor).ok_or_else(|| overflow("scale"))?;
            out.add_term(m.clone(), coeff, "scale")?;
        }
        Ok(out)
    }

    pub fn checked_pow(&self, exponent: u32) -> ScmResult<Polynomial> {
        let mut result = Polynomial::one();
        for _ in 0..exponent {
            result = result.checked_mul(self)?;
        }
        Ok(result)
    }

    /// Exact quotient `self / divisor`.
    ///
    /// `Ok(None)` when `divisor` is zero or does not divide `self`. Uses
    /// multivariate long division under the lexicographic term order, which
    /// always terminates with a zero remainder when the division is exact.
    pub fn exact_div(&self, divisor: &Polynomial) -> ScmResult<Option<Polynomial>> {
        let Some((lead_m, lead_c)) = divisor.leading_term() else {
            return Ok(None);
        };
        let lead_m = lead_m.clone();
        let mut quotient = Polynomial::zero();
        let mut remainder = self.clone();
        while let Some((m, c)) = remainder.leading_term().map(|(m, c)| (m.clone(), c)) {
            let Some(qm) = m.checked_div(&lead_m) else {
                return Ok(None);
            };
            let qc = match (c.checked_rem(lead_c), c.checked_div(lead_c)) {
                (Some(0), Some(q)) => q,
                _ => return Ok(None),
            };
            quotient.add_term(qm.clone(), qc, "div")?;
            let step = Polynomial::monomial(qm, qc);
            remainder = remainder.checked_sub(&step.checked_mul(divisor)?)?;
        }
        Ok(Some(quotient))
    }

    pub fn scale(&self, factor: i64) -> Polynomial {
        panic_on_overflow(self.checked_scale(factor))
    }

    pub fn pow(&self, exponent: u32) -> Polynomial {
        panic_on_overflow(self.checked_pow(exponent))
    }

    pub fn substitute(&self, symbol: Symbol, replacement: &Polynomial) -> ScmResult<Polynomial> {
        let mut bindings = HashMap::with_capacity(1);
        bindings.insert(symbol, replacement.clone());
        self.substitute_all(&bindings)
    }

    /// Replace every bound symbol by its polynomial. Unbound symbols stay.
    pub fn substitute_all(&self, bindings: &HashMap<Symbol, Polynomial>) -> ScmResult<Polynomial> {
        let mut out = Polynomial::zero();
        for (monomial, coeff) in self.terms() {
            let mut term = Polynomial::constant(coeff);
            let mut kept = Vec::new();
            for &(symbol, exponent) in monomial.factors() {
                match bindings.get(&symbol) {
                    Some(value) => term = term.checked_mul(&value.checked_pow(exponent)?)?,
                    None => kept.push((symbol, exponent)),
                }
            }
            let term = term.checked_mul(&Polynomial::monomial(Monomial::new(kept), 1))?;
            out = out.checked_add(&term)?;
        }
        Ok(out)
    }

    /// Evaluate numerically. Every symbol must be bound.
    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> ScmResult<f64> {
        let mut total = 0.0;
        for (monomial, coeff) in self.terms() {
            let mut term = coeff as f64;
            for (symbol, exponent) in monomial.factors() {
                let value = values.get(symbol).ok_or_else(|| ScmError::UnboundSymbol {
                    symbol: symbol.to_string(),
                })?;
                term *= value.powi(*exponent as i32);
            }
            total += term;
        }
        Ok(total)
    }

    /// Render as text, highest total degree first.
    ///
    /// `name` decides how each symbol is written and may refuse a symbol.
    pub fn render<E>(
        &self,
        style: &TermStyle,
        mut name: impl FnMut(&Symbol) -> Result<String, E>,
    ) -> Result<String, E> {
        if self.is_zero() {
            return Ok("0".to_string());
        }
        let mut ordered: Vec<(&Monomial, i64)> = self.terms().collect();
        ordered.sort_by(|a, b| b.0.degree().cmp(&a.0.degree()).then_with(|| a.0.cmp(b.0)));

        let mut out = String::new();
        for (i, (monomial, coeff)) in ordered.into_iter().enumerate() {
            match (i, coeff < 0) {
                (0, true) => out.push('-'),
                (0, false) => {}
                (_, true) => out.push_str(" - "),
                (_, false) => out.push_str(" + "),
            }
            let magnitude = coeff.unsigned_abs();
            if monomial.is_one() {
                out.push_str(&magnitude.to_string());
                continue;
            }
            if magnitude != 1 {
                out.push_str(&magnitude.to_string());
                out.push_str(style.times);
            }
            for (k, (symbol, exponent)) in monomial.factors().iter().enumerate() {
                if k > 0 {
                    out.push_str(style.times);
                }
                out.push_str(&style.write_power(&name(symbol)?, *exponent));
            }
        }
        Ok(out)
    }
}

/// # Panics
/// On coefficient overflow. Library code uses the `checked_*` methods.
fn panic_on_overflow(result: ScmResult<Polynomial>) -> Polynomial {
    match result {
        Ok(p) => p,
        Err(err) => panic!("{err}"),
    }
}

impl From<Symbol> for Polynomial {
    fn from(symbol: Symbol) -> Self {
        Polynomial::symbol(symbol)
    }
}

impl From<i64> for Polynomial {
    fn from(value: i64) -> Self {
        Polynomial::constant(value)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .render(&TermStyle::PLAIN, |s| Ok::<_, Infallible>(s.to_string()))
            .unwrap_or_else(|never| match never {});
        f.write_str(&text)
    }
}

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        *self = panic_on_overflow(self.checked_add(rhs));
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        panic_on_overflow(self.checked_add(rhs))
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        panic_on_overflow(self.checked_sub(rhs))
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        panic_on_overflow(self.checked_mul(rhs))
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1)
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident::$method:ident),*) => {$(
        impl $trait for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                (&self).$method(&rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul);
