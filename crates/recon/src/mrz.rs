//! Check digits of machine-readable zones (ICAO 9303).
//!
//! Only the passport layout (TD3: two lines of 44 characters) is read.

use std::fmt;
use std::ops::Range;

/// Length of each line of a TD3 (passport) machine-readable zone.
pub const TD3_LINE_LEN: usize = 44;

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Check digit of `data`: characters weighted 7, 3, 1, 7, ... and summed
/// modulo 10. Digits count at face value, `<` as 0, `A`..`Z` as 10..35.
///
/// `None` if `data` holds any other character.
pub fn checksum(data: &str) -> Option<char> {
    let mut sum = 0u32;
    for (i, c) in data.chars().enumerate() {
        let value = match c {
            '0'..='9' | 'A'..='Z' => c.to_digit(36)?,
            '<' => 0,
            _ => return None,
        };
        sum += WEIGHTS[i % 3] * value;
    }
    char::from_digit(sum % 10, 10)
}

/// A check digit protecting one or more ranges of the second MRZ line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MrzCheck {
    IdNumber,
    BirthDate,
    ExpiryDate,
    PersonalNumber,
    /// Document number, birth date, expiry date and personal number together.
    Composite,
}

impl MrzCheck {
    pub const ALL: [MrzCheck; 5] = [
        Self::IdNumber,
        Self::BirthDate,
        Self::ExpiryDate,
        Self::PersonalNumber,
        Self::Composite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::IdNumber => "mrz_valid_id_number",
            Self::BirthDate => "mrz_valid_birth_date",
            Self::ExpiryDate => "mrz_valid_expiry_date",
            Self::PersonalNumber => "mrz_valid_personal_number",
            Self::Composite => "mrz_valid_composite",
        }
    }

    fn ranges(&self) -> &'static [Range<usize>] {
        match self {
            Self::IdNumber => &[0..9],
            Self::BirthDate => &[13..19],
            Self::ExpiryDate => &[21..27],
            Self::PersonalNumber => &[28..42],
            Self::Composite => &[0..10, 13..20, 21..43],
        }
    }

    /// Position of the check digit, right after the protected data.
    fn digit_index(&self) -> usize {
        match self {
            Self::IdNumber => 9,
            Self::BirthDate => 19,
            Self::ExpiryDate => 27,
            Self::PersonalNumber => 42,
            Self::Composite => 43,
        }
    }

    /// The protected data, `None` when the line is too short or not ASCII.
    pub fn payload(&self, line2: &str) -> Option<String> {
        if !line2.is_ascii() {
            return None;
        }
        self.ranges()
            .iter()
            .map(|r| line2.get(r.clone()))
            .collect::<Option<Vec<&str>>>()
            .map(|parts| parts.concat())
    }

    pub fn validate(&self, line2: &str) -> bool {
        if line2.chars().count() != TD3_LINE_LEN {
            log::debug!(
                "{self}: MRZ line has {} characters, expected {TD3_LINE_LEN}",
                line2.chars().count()
            );
        }
        let Some(payload) = self.payload(line2) else {
            return false;
        };
        let expected = line2.as_bytes().get(self.digit_index()).map(|b| char::from(*b));
        expected.is_some() && checksum(&payload) == expected
    }
}

impl fmt::Display for MrzCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primary identifier (surname) encoded in the first line, `<` read as a
/// space. `None` when the line is too short or the name is blank.
pub fn surname_from_line1(line1: &str) -> Option<String> {
    let name_zone = line1.get(5..)?;
    let primary = name_zone.split("<<").next()?;
    let surname = primary.replace('<', " ").trim().to_string();
    (!surname.is_empty()).then_some(surname)
}
