//! Synthetic person and company names.
//!
//! Small fixed pools; every index is drawn with `Entropy::index(pool.len())`
//! so lookups never go out of bounds.

use crate::Entropy;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Daniel", "Karen",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Taylor", "Anderson", "Thomas", "Moore", "Martin", "Jackson", "Thompson", "White", "Lopez",
    "Lee", "Harris",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons"];

fn pick<E: Entropy>(entropy: &mut E, pool: &'static [&'static str]) -> &'static str {
    pool[entropy.index(pool.len())]
}

/// `"{first} {last}"`.
pub(crate) fn person_name<E: Entropy>(entropy: &mut E) -> String {
    let first = pick(entropy, FIRST_NAMES);
    let last = pick(entropy, LAST_NAMES);
    format!("{first} {last}")
}

/// One of `"{last} {suffix}"`, `"{last}-{last}"` or `"{last}, {last} and {last}"`.
pub(crate) fn company_name<E: Entropy>(entropy: &mut E) -> String {
    match entropy.index(3) {
        0 => {
            let name = pick(entropy, LAST_NAMES);
            let suffix = pick(entropy, COMPANY_SUFFIXES);
            format!("{name} {suffix}")
        }
        1 => {
            let a = pick(entropy, LAST_NAMES);
            let b = pick(entropy, LAST_NAMES);
            format!("{a}-{b}")
        }
        _ => {
            let a = pick(entropy, LAST_NAMES);
            let b = pick(entropy, LAST_NAMES);
            let c = pick(entropy, LAST_NAMES);
            format!("{a}, {b} and {c}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RngEntropy;

    /// Always returns the same index (modulo the pool length).
    struct FixedIndex(usize);

    impl Entropy for FixedIndex {
        fn uniform(&mut self, low: f64, _high: f64) -> f64 {
            low
        }

        fn index(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    #[test]
    fn person_name_has_first_and_last() {
        assert_eq!(person_name(&mut FixedIndex(0)), "James Smith");
        assert_eq!(person_name(&mut FixedIndex(1)), "Mary Johnson");
    }

    #[test]
    fn company_formats() {
        assert_eq!(company_name(&mut FixedIndex(0)), "Smith Inc");
        assert_eq!(company_name(&mut FixedIndex(1)), "Johnson-Johnson");
        assert_eq!(company_name(&mut FixedIndex(2)), "Williams, Williams and Williams");
    }

    #[test]
    fn random_names_never_empty() {
        let mut entropy = RngEntropy::seeded(Some(5));
        for _ in 0..500 {
            let person = person_name(&mut entropy);
            let company = company_name(&mut entropy);
            assert!(person.contains(' '), "person name {person:?} lacks a space");
            assert!(!company.trim().is_empty());
        }
    }
}
