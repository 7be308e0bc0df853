use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound (exclusive) for generated dates, in milliseconds since the epoch.
pub const MAX_DATE_MILLIS: i64 = 100_000_000_000;

/// Amounts are drawn as whole cents below this value.
const MAX_AMOUNT_CENTS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Outcome,
}

/// One synthetic record. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(serialize_with = "serialize_millis")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
}

fn serialize_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Source of random transactions.
pub struct TransactionFactory {
    rng: StdRng,
}

impl TransactionFactory {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    pub fn create(&mut self) -> Transaction {
        let millis = self.rng.gen_range(0..MAX_DATE_MILLIS);
        let date = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let kind = if self.rng.gen_bool(0.5) {
            TransactionType::Income
        } else {
            TransactionType::Outcome
        };

        let cents = self.rng.gen_range(0..MAX_AMOUNT_CENTS);

        Transaction {
            date,
            kind,
            amount: f64::from(cents) / 100.0,
        }
    }
}

impl Default for TransactionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for TransactionFactory {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.create())
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: u64,
    pub bytes_written: u64,
    pub elapsed: Duration,
    pub output_path: PathBuf,
}
