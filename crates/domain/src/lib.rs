// Rust guideline compliant 2026-02-23

//! Shared domain types for the transaction simulator.
//!
//! Defines `TransactionRecord`, its classification enums, the time-series
//! `Point` it is written as, `SinkError`, and the hexagonal `Sink` port.
//! All other crates depend on this one; no workspace crate is imported here.

use rust_decimal::Decimal;
use std::fmt;

/// Measurement (series) name every transaction point is written under.
pub const MEASUREMENT: &str = "transactions";

/// Card network a synthetic transaction is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardProvider {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    Amex,
}

impl CardProvider {
    /// Every provider, in sampling order.
    pub const ALL: [Self; 3] = [Self::Visa, Self::Mastercard, Self::Amex];

    /// Name as written to the `card_provider` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "Amex",
        }
    }
}

impl fmt::Display for CardProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk bucket derived from the amount and the fraud draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// Amount at or below 1000, not flagged.
    Low,
    /// Amount in (1000, 3000], not flagged.
    High,
    /// Flagged as fraud.
    Critical,
}

impl RiskLevel {
    /// Upper-case label as written to the `risk_level` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthetic card transaction.
///
/// Created fresh for each loop iteration and discarded once written.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Card holder full name.
    pub user: String,
    /// Amount in dollars, range `[10.00, 5000.00]`, scale always 2.
    pub amount: Decimal,
    /// Merchant (company) name.
    pub merchant: String,
    /// Card network.
    pub card: CardProvider,
    /// `true` only when `risk_level` is `Critical`.
    pub is_fraud: bool,
    /// Derived risk bucket.
    pub risk_level: RiskLevel,
}

impl TransactionRecord {
    /// `"fraud"` or `"legit"`, as written to the `status` tag.
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.is_fraud { "fraud" } else { "legit" }
    }

    /// Map this record to its time-series point.
    ///
    /// Tags: `status`, `risk_level`, `card_provider`.
    /// Fields: `amount`, `user`, `merchant`. No timestamp; the store
    /// assigns ingestion time.
    #[must_use]
    pub fn to_point(&self) -> Point {
        Point::new(MEASUREMENT)
            .tag("status", self.status())
            .tag("risk_level", self.risk_level.as_str())
            .tag("card_provider", self.card.as_str())
            .field("amount", FieldValue::Decimal(self.amount))
            .field("user", FieldValue::Str(self.user.clone()))
            .field("merchant", FieldValue::Str(self.merchant.clone()))
    }
}

/// Unindexed value attached to a [`Point`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Exact decimal, written as a float.
    Decimal(Decimal),
    /// UTF-8 string.
    Str(String),
}

/// One measurement: indexed tags plus unindexed fields.
///
/// Tags and fields keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    /// Measurement (series) name.
    pub measurement: String,
    /// Indexed dimensions.
    pub tags: Vec<(String, String)>,
    /// Payload values.
    pub fields: Vec<(String, FieldValue)>,
}

impl Point {
    /// Start an empty point for `measurement`.
    #[must_use]
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: vec![],
            fields: vec![],
        }
    }

    /// Append a tag.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((key.into(), value));
        self
    }

    #[cfg(test)]
    fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    fn field_value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Errors a sink implementation may return from a write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The store could not be reached (connect, DNS, timeout, broken body).
    #[error("transport failure: {reason}")]
    Transport {
        /// Human-readable description.
        reason: String,
    },
    /// Credentials were rejected.
    #[error("unauthorized (status {status})")]
    Unauthorized {
        /// HTTP status returned by the store.
        status: u16,
    },
    /// Organization or bucket does not exist.
    #[error("not found: {reason}")]
    NotFound {
        /// Human-readable description.
        reason: String,
    },
    /// Any other refusal from the store.
    #[error("write rejected (status {status}): {reason}")]
    Rejected {
        /// HTTP status returned by the store.
        status: u16,
        /// Response body or description.
        reason: String,
    },
}

impl SinkError {
    /// `true` when retrying the same write could plausibly succeed.
    ///
    /// Transport failures, server errors (5xx) and throttling (429) are
    /// transient; credential and namespace errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Rejected { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Unauthorized { .. } | Self::NotFound { .. } => false,
        }
    }
}

/// Hexagonal port: the time-series store transactions are written to.
///
/// The simulator loop depends exclusively on this trait. It owns the sink for
/// the process lifetime and hands it back through [`close`](Sink::close)
/// exactly once.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait Sink {
    /// Write a single point, waiting for the store to acknowledge it.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] describing why the store did not accept it.
    async fn write(&self, point: &Point) -> Result<(), SinkError>;

    /// Release the underlying connection. Consumes the sink.
    async fn close(self);

    /// Human-readable store name for status lines (e.g. `"InfluxDB"`).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn make_record(amount: Decimal, is_fraud: bool, risk_level: RiskLevel) -> TransactionRecord {
        TransactionRecord {
            user: "Jane Doe".to_owned(),
            amount,
            merchant: "Acme Inc".to_owned(),
            card: CardProvider::Amex,
            is_fraud,
            risk_level,
        }
    }

    #[test]
    fn card_provider_labels() {
        let labels: Vec<&str> = CardProvider::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(labels, ["Visa", "Mastercard", "Amex"]);
        assert_eq!(CardProvider::Mastercard.to_string(), "Mastercard");
    }

    #[test]
    fn risk_level_labels() {
        assert_eq!(RiskLevel::Low.as_str(), "LOW");
        assert_eq!(RiskLevel::High.as_str(), "HIGH");
        assert_eq!(RiskLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn status_follows_is_fraud() {
        let fraud = make_record(Decimal::new(350_000, 2), true, RiskLevel::Critical);
        let legit = make_record(Decimal::new(50_000, 2), false, RiskLevel::Low);
        assert_eq!(fraud.status(), "fraud");
        assert_eq!(legit.status(), "legit");
    }

    #[test]
    fn to_point_maps_tags_and_fields() {
        let record = make_record(Decimal::new(150_050, 2), false, RiskLevel::High);
        let point = record.to_point();

        assert_eq!(point.measurement, "transactions");
        let tag_keys: Vec<&str> = point.tags.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(tag_keys, ["status", "risk_level", "card_provider"]);
        assert_eq!(point.tag_value("status"), Some("legit"));
        assert_eq!(point.tag_value("risk_level"), Some("HIGH"));
        assert_eq!(point.tag_value("card_provider"), Some("Amex"));

        assert_eq!(
            point.field_value("amount"),
            Some(&FieldValue::Decimal(Decimal::new(150_050, 2)))
        );
        assert_eq!(
            point.field_value("user"),
            Some(&FieldValue::Str("Jane Doe".to_owned()))
        );
        assert_eq!(
            point.field_value("merchant"),
            Some(&FieldValue::Str("Acme Inc".to_owned()))
        );
        assert_eq!(point.fields.len(), 3);
    }

    #[test]
    fn missing_keys_return_none() {
        let point = Point::new("m").tag("a", "1");
        assert_eq!(point.tag_value("b"), None);
        assert_eq!(point.field_value("a"), None);
    }

    #[test]
    fn transient_classification() {
        assert!(SinkError::Transport { reason: "refused".to_owned() }.is_transient());
        assert!(SinkError::Rejected { status: 503, reason: String::new() }.is_transient());
        assert!(SinkError::Rejected { status: 429, reason: String::new() }.is_transient());
        assert!(!SinkError::Rejected { status: 400, reason: String::new() }.is_transient());
        assert!(!SinkError::Unauthorized { status: 401 }.is_transient());
        assert!(!SinkError::NotFound { reason: "bucket".to_owned() }.is_transient());
    }

    #[test]
    fn sink_error_messages() {
        let e = SinkError::Rejected { status: 400, reason: "bad line".to_owned() };
        assert_eq!(e.to_string(), "write rejected (status 400): bad line");
        assert_eq!(
            SinkError::Unauthorized { status: 401 }.to_string(),
            "unauthorized (status 401)"
        );
    }

    /// Verify that a minimal `Sink` implementation compiles and is consumed by `close`.
    #[tokio::test]
    async fn sink_trait_compiles_with_minimal_impl() {
        struct VecSink<'a> {
            points: RefCell<Vec<Point>>,
            closed: &'a Cell<u32>,
        }

        impl Sink for VecSink<'_> {
            async fn write(&self, point: &Point) -> Result<(), SinkError> {
                self.points.borrow_mut().push(point.clone());
                Ok(())
            }

            async fn close(self) {
                self.closed.set(self.closed.get() + 1);
            }

            fn name(&self) -> &str {
                "vec"
            }
        }

        let closed = Cell::new(0);
        let sink = VecSink { points: RefCell::new(vec![]), closed: &closed };
        let point = Point::new("m").tag("t", "v");
        sink.write(&point).await.unwrap();
        assert_eq!(sink.points.borrow().len(), 1);
        assert_eq!(sink.name(), "vec");
        sink.close().await;
        assert_eq!(closed.get(), 1);
    }
}
