//! PhoneNumber value object (French numbering conventions).

use super::errors::FormatError;
use super::Searchable;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Pattern for a French phone number: a prefix ("+33" or "0") followed by
/// nine digits with arbitrary interior whitespace. The first digit selects
/// the region, the remaining eight identify the subscriber.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\+33|0)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*(\d)\s*$",
    )
    .expect("Failed to compile phone number regex")
});

/// Number prefix: national "0" or international "+33".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// National prefix, written "0".
    National,
    /// International prefix, written "+33".
    International,
}

impl Prefix {
    /// The written form of this prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "0",
            Self::International => "+33",
        }
    }
}

/// A French phone number.
///
/// The region digit classifies the number: 1-5 are regional hardwired
/// numbers, 6-7 mobile, 8-9 commercial, 9 exactly is a digital subscriber
/// number. Equality, ordering and hashing ignore the prefix: "01 ..." and
/// "+33 1 ..." designate the same line.
///
/// # Example
///
/// ```
/// use carnet::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("06 69 36 74 62").unwrap();
/// assert!(phone.is_mobile());
/// assert_eq!(phone.to_string(), "06 69 36 74 62");
/// ```
#[derive(Debug, Clone)]
pub struct PhoneNumber {
    prefix: Prefix,
    region: u8,
    subscriber: u32,
}

impl PhoneNumber {
    /// Parse a phone number from a string.
    ///
    /// The string must match the anchored pattern "(+33|0) d dddddddd" with
    /// arbitrary whitespace between digits. A region digit of 0 is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] carrying the input when it does not match.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let captures = PHONE_REGEX
            .captures(text)
            .ok_or_else(|| FormatError::new(text))?;

        let prefix = match &captures[1] {
            "+33" => Prefix::International,
            _ => Prefix::National,
        };

        let region: u8 = captures[2].parse().map_err(|_| FormatError::new(text))?;
        if region == 0 {
            return Err(FormatError::new(text));
        }

        let mut digits = String::with_capacity(8);
        for group in 3..=10 {
            digits.push_str(&captures[group]);
        }
        let subscriber: u32 = digits.parse().map_err(|_| FormatError::new(text))?;

        Ok(Self {
            prefix,
            region,
            subscriber,
        })
    }

    /// Replace this number's state from a fresh parse of `text`.
    ///
    /// On failure the number is left unchanged.
    pub fn reparse(&mut self, text: &str) -> Result<(), FormatError> {
        *self = Self::parse(text)?;
        Ok(())
    }

    /// The prefix of this number.
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The region digit (1-9).
    pub fn region(&self) -> u8 {
        self.region
    }

    /// The eight-digit subscriber number.
    pub fn subscriber(&self) -> u32 {
        self.subscriber
    }

    /// True if this number carries the international "+33" prefix.
    pub fn is_international(&self) -> bool {
        self.prefix == Prefix::International
    }

    /// True if this is a regional hardwired number (region 1-5).
    pub fn is_regional(&self) -> bool {
        (1..=5).contains(&self.region)
    }

    /// True if this is a mobile number (region 6-7).
    pub fn is_mobile(&self) -> bool {
        (6..=7).contains(&self.region)
    }

    /// True if this is a commercial number (region 8-9).
    pub fn is_commercial(&self) -> bool {
        (8..=9).contains(&self.region)
    }

    /// True if this is a digital subscriber number (region 9).
    pub fn is_digital(&self) -> bool {
        self.region == 9
    }
}

// Prefix is presentation only: two spellings of the same line compare equal.
impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.region == other.region && self.subscriber == other.subscriber
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.region.hash(state);
        self.subscriber.hash(state);
    }
}

impl Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.region
            .cmp(&other.region)
            .then_with(|| self.subscriber.cmp(&other.subscriber))
    }
}

impl PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical form: "+33 D DD DD DD DD" or "0D DD DD DD DD", with the eight
/// subscriber digits grouped in pairs. Only the international prefix takes a
/// space before the region digit.
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix.as_str())?;
        if self.is_international() {
            write!(f, " ")?;
        }
        write!(f, "{}", self.region)?;
        let digits = format!("{:08}", self.subscriber);
        for pair in 0..4 {
            write!(f, " {}", &digits[pair * 2..pair * 2 + 2])?;
        }
        Ok(())
    }
}

impl Searchable for PhoneNumber {
    fn contains_text(&self, element: &str) -> bool {
        self.to_string().contains(element)
    }
}

// Serde support - serialize as the canonical string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}
