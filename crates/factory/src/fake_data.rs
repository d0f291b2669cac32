//! Fake data generation for default attribute values
//!
//! A [`Faker`] owns its random number generator. Each build gets its own
//! faker, so a seeded factory always produces the same defaults.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const WORDS: &[&str] = &[
    "express", "standard", "priority", "economy", "overnight", "ground", "freight", "parcel",
    "courier", "local", "regional", "global", "insured", "tracked", "pickup", "same", "day",
    "next", "flat", "rate", "bulk", "light", "heavy", "secure", "green", "rapid", "direct",
    "premium", "basic", "saver",
];

const SUBJECTS: &[&str] = &[
    "The parcel",
    "The courier",
    "The carrier",
    "The service",
    "The package",
];
const VERBS: &[&str] = &["delivers", "ships", "handles", "routes", "collects", "tracks"];
const OBJECTS: &[&str] = &["orders", "shipments", "returns", "pallets", "envelopes", "boxes"];

/// Randomness source handed to default value providers
#[derive(Debug, Clone)]
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    /// Deterministic faker; equal seeds yield equal sequences
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Random number between `min` and `max` inclusive, in either order
    pub fn number_between(&mut self, min: i64, max: i64) -> i64 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(low..=high)
    }

    /// Random boolean with optional probability of `true` (defaults to 0.5)
    pub fn boolean(&mut self, probability: Option<f64>) -> bool {
        let prob = probability.unwrap_or(0.5).clamp(0.0, 1.0);
        self.rng.gen_bool(prob)
    }

    /// Random element of a slice, `None` when it is empty
    pub fn element<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn word(&mut self) -> String {
        WORDS.choose(&mut self.rng).copied().unwrap_or("word").to_string()
    }

    /// `count` random words joined by spaces
    pub fn words(&mut self, count: usize) -> String {
        (0..count).map(|_| self.word()).collect::<Vec<_>>().join(" ")
    }

    pub fn sentence(&mut self) -> String {
        let subject = SUBJECTS.choose(&mut self.rng).copied().unwrap_or("It");
        let verb = VERBS.choose(&mut self.rng).copied().unwrap_or("moves");
        let object = OBJECTS.choose(&mut self.rng).copied().unwrap_or("things");

        format!("{} {} {}.", subject, verb, object)
    }

    pub fn paragraph(&mut self) -> String {
        let count = self.number_between(3, 7);
        (0..count).map(|_| self.sentence()).collect::<Vec<_>>().join(" ")
    }

    /// Code-like identifier such as `zone_4821`
    pub fn code(&mut self, prefix: &str) -> String {
        format!("{}_{:04}", prefix, self.number_between(0, 9999))
    }

    /// Random timestamp in `start..=end` at second precision
    pub fn datetime_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let span = (end - start).num_seconds();
        start + Duration::seconds(self.number_between(0, span))
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::from_entropy()
    }
}
