//! Card expiry dates.
//!
//! An [`ExpiryDate`] is a plain month/year pair. Construction never fails:
//! an out-of-range month is stored as given and reported later by the
//! validator under the `month` field.
//!
//! # Example
//!
//! ```
//! use cc_card::ExpiryDate;
//!
//! let expiry = ExpiryDate::new(2, 17);
//! assert_eq!(expiry.year(), 2017);
//! assert_eq!(expiry.two_digit_month(), "02");
//! assert_eq!(expiry.two_digit_year(), "17");
//! assert!(expiry.is_expired());
//! ```

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Prefix used to complete years given with fewer than four digits.
const YEAR_PAD: &str = "20";

/// A card expiry month and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpiryDate {
    /// Month as supplied; 1-12 when valid.
    month: u8,
    /// Four-digit year.
    year: u16,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Years with fewer than four digits are left-padded with the repeating
    /// `"20"` pattern, so `17` becomes `2017`. The month is not range checked.
    pub fn new(month: u8, year: u16) -> Self {
        Self {
            month,
            year: normalize_year(year),
        }
    }

    /// Creates an expiry date from text fields.
    ///
    /// Surrounding whitespace is ignored. The year text is padded before it
    /// is read as a number, so `"06"` is 2006. A month that does not parse
    /// is stored as `0`, and a year that does not parse as `0` before
    /// padding.
    ///
    /// ```
    /// use cc_card::ExpiryDate;
    ///
    /// let expiry = ExpiryDate::parse("7", "29");
    /// assert_eq!((expiry.month(), expiry.year()), (7, 2029));
    ///
    /// assert_eq!(ExpiryDate::parse("July", "2029").month(), 0);
    /// ```
    pub fn parse(month: &str, year: &str) -> Self {
        let month = month.trim().parse().unwrap_or(0);
        let year = pad_year(year.trim())
            .parse()
            .unwrap_or_else(|_| normalize_year(0));
        Self { month, year }
    }

    /// Returns the month as stored.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the month is in 1-12.
    #[inline]
    pub const fn has_valid_month(&self) -> bool {
        self.month >= 1 && self.month <= 12
    }

    /// Returns the month zero-padded to two digits.
    pub fn two_digit_month(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Returns the last two digits of the year.
    pub fn two_digit_year(&self) -> String {
        format!("{:02}", self.year % 100)
    }

    /// Returns the instant the card stops being valid: 23:59:59 local time
    /// on the last day of the expiry month.
    ///
    /// Months outside 1-12 roll over into the neighbouring years, so month
    /// 13 of 2030 is January 2031 and month 0 is December of the previous
    /// year.
    pub fn expiration(&self) -> NaiveDateTime {
        let months = self.year as i32 * 12 + self.month as i32 - 1;
        let (year, month) = (months.div_euclid(12), months.rem_euclid(12) as u32 + 1);

        let last_day = last_day_of_month(year, month).unwrap_or(NaiveDate::MAX);
        last_day.and_time(end_of_day())
    }

    /// Returns true if the current local time is past the expiration.
    ///
    /// The clock is read on every call.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Local::now().naive_local())
    }

    /// Returns true if `now` is past the expiration.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        now > self.expiration()
    }
}

impl Default for ExpiryDate {
    fn default() -> Self {
        Self::new(1, 1970)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

fn normalize_year(year: u16) -> u16 {
    pad_year(&year.to_string()).parse().unwrap_or(year)
}

/// Left-pads year text to four characters with the repeating `YEAR_PAD`.
fn pad_year(year: &str) -> String {
    let len = year.chars().count();
    if len >= 4 {
        return year.to_owned();
    }

    YEAR_PAD
        .chars()
        .cycle()
        .take(4 - len)
        .chain(year.chars())
        .collect()
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}
