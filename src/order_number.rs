//! Human-readable order numbers: `YYMMDD####`.
//!
//! The day is taken in the store's configured UTC offset and the four digits are a
//! per-day sequence starting at 1. Sequences past 9999 are not truncated; the number
//! simply grows a fifth digit.
//!
//! Numbers come from an in-process counter rather than a count of stored orders, so two
//! orders placed at once can never be handed the same sequence. The order store still
//! treats the number as a unique key, which catches the one remaining way to repeat a
//! number: the clock stepping back into a day whose counter was already discarded.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct DailySequence {
    day: NaiveDate,
    issued: u32,
}

#[derive(Debug)]
pub struct OrderNumberGenerator {
    offset: FixedOffset,
    current: Mutex<Option<DailySequence>>,
}

impl OrderNumberGenerator {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            current: Mutex::new(None),
        }
    }

    /// Continues a day on which `issued` orders already exist (e.g. after a restart).
    pub fn resume(offset: FixedOffset, day: NaiveDate, issued: u32) -> Self {
        Self {
            offset,
            current: Mutex::new(Some(DailySequence { day, issued })),
        }
    }

    /// Calendar day of `at` in the store's offset.
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Issues the next number for the day containing `at`.
    pub fn next(&self, at: DateTime<Utc>) -> String {
        let day = self.day_of(at);
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let sequence = match *current {
            // at u32::MAX the number repeats and the order store reports a conflict
            Some(seq) if seq.day == day => seq.issued.saturating_add(1),
            _ => 1,
        };
        *current = Some(DailySequence {
            day,
            issued: sequence,
        });
        let number = Self::format(day, sequence);
        debug!(%day, sequence, %number, "Order number issued");
        number
    }

    pub fn format(day: NaiveDate, sequence: u32) -> String {
        format!("{}{:04}", day.format("%y%m%d"), sequence)
    }
}
