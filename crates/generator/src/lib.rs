// Rust guideline compliant 2026-02-16

//! Transaction generator -- fabricates one synthetic card transaction per call
//! and classifies its fraud risk.
//!
//! Entry points: [`Generator::generate`], [`Generator::from_seed`], and the
//! pure policy [`classify`]. Randomness comes through the [`Entropy`] port so
//! tests can force specific amounts and draws.

mod names;

use domain::{CardProvider, RiskLevel, TransactionRecord};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use std::cell::RefCell;

/// Lower bound of the sampled amount range.
pub const MIN_AMOUNT: f64 = 10.0;
/// Upper bound of the sampled amount range.
pub const MAX_AMOUNT: f64 = 5000.0;
/// Probability that a transaction at or below the critical threshold is
/// flagged as fraud anyway.
pub const FRAUD_PROBABILITY: f64 = 0.05;

/// Amounts strictly above this are always CRITICAL fraud.
const CRITICAL_THRESHOLD: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);
/// Amounts strictly above this (and not flagged) are HIGH risk.
const HIGH_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

// ---------------------------------------------------------------------------
// Entropy port
// ---------------------------------------------------------------------------

/// Source of randomness consumed by the generator.
///
/// Implementations must return `index(len) < len` for every `len > 0`.
pub trait Entropy {
    /// Sample uniformly from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Sample uniformly from `0..len`.
    fn index(&mut self, len: usize) -> usize;
}

/// [`Entropy`] adapter over any `rand::Rng`.
#[derive(Debug)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    /// Wrap `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<StdRng> {
    /// `Some(seed)` gives a reproducible stream; `None` seeds from the OS.
    #[must_use]
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> Entropy for RngEntropy<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Round a raw sampled amount to cents, half-to-even on the value scaled by 100.
///
/// The input is clamped to `[MIN_AMOUNT, MAX_AMOUNT]` first, so the result
/// always has scale 2 and lies in `[10.00, 5000.00]`.
#[must_use]
pub fn round_amount(raw: f64) -> Decimal {
    let scaled = (raw.clamp(MIN_AMOUNT, MAX_AMOUNT) * 100.0).round_ties_even();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scaled is an integer-valued float in [1_000, 500_000]"
    )]
    let cents = scaled as i64;
    Decimal::new(cents, 2)
}

/// Classify a transaction amount into `(is_fraud, risk_level)`.
///
/// `draw` is the Bernoulli sample in `[0, 1)`; it is only invoked when the
/// amount is at or below 3000, mirroring a short-circuit `or`.
///
/// | condition | result |
/// |---|---|
/// | `amount > 3000` or `draw() < 0.05` | `(true, Critical)` |
/// | `amount > 1000` | `(false, High)` |
/// | otherwise | `(false, Low)` |
#[must_use]
pub fn classify(amount: Decimal, draw: impl FnOnce() -> f64) -> (bool, RiskLevel) {
    if amount > CRITICAL_THRESHOLD || draw() < FRAUD_PROBABILITY {
        (true, RiskLevel::Critical)
    } else if amount > HIGH_THRESHOLD {
        (false, RiskLevel::High)
    } else {
        (false, RiskLevel::Low)
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Produces synthetic [`TransactionRecord`]s from an [`Entropy`] source.
#[derive(Debug)]
pub struct Generator<E: Entropy> {
    /// Interior mutability required because `generate` takes `&self`.
    entropy: RefCell<E>,
}

impl<E: Entropy> Generator<E> {
    /// Create a generator drawing from `entropy`.
    #[must_use]
    pub fn new(entropy: E) -> Self {
        Self {
            entropy: RefCell::new(entropy),
        }
    }

    /// Generate and classify one transaction.
    ///
    /// Draw order: user name, amount, merchant name, card, fraud draw (the
    /// last only when the amount does not already force CRITICAL).
    #[must_use]
    pub fn generate(&self) -> TransactionRecord {
        let mut guard = self.entropy.borrow_mut();
        let entropy = &mut *guard;

        let user = names::person_name(entropy);
        let amount = round_amount(entropy.uniform(MIN_AMOUNT, MAX_AMOUNT));
        let merchant = names::company_name(entropy);
        let card = CardProvider::ALL[entropy.index(CardProvider::ALL.len())];
        let (is_fraud, risk_level) = classify(amount, || entropy.uniform(0.0, 1.0));

        TransactionRecord {
            user,
            amount,
            merchant,
            card,
            is_fraud,
            risk_level,
        }
    }
}

impl Generator<RngEntropy<StdRng>> {
    /// Generator backed by `StdRng`; `None` seeds from the OS.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::new(RngEntropy::seeded(seed))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
