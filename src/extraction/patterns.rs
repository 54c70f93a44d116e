//! Priority-ordered pattern lists for each extracted field.
//!
//! A list is evaluated top to bottom and the first pattern that matches
//! anywhere in the text wins, even when a lower-priority pattern would have
//! matched earlier in the string.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

/// A single named candidate in a priority list
#[derive(Debug, Clone)]
pub struct NamedPattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// Ordered candidates for one field category
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<NamedPattern>,
}

impl PatternList {
    /// Compile `(name, pattern)` pairs case-insensitively, keeping their order
    /// as the priority order.
    pub fn compile(specs: &[(&'static str, &str)]) -> Result<Self, regex::Error> {
        let patterns = specs
            .iter()
            .map(|&(name, pattern)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| NamedPattern { name, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Captures of the highest-priority pattern that matches, with its name
    pub fn first_match<'t>(&self, text: &'t str) -> Option<(&'static str, Captures<'t>)> {
        self.patterns
            .iter()
            .find_map(|p| p.regex.captures(text).map(|caps| (p.name, caps)))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

pub const DATE_PATTERNS: &[(&str, &str)] = &[
    ("weekday_month_day", r"(\w+day),?\s+(\w+)\s+(\d+)(?:st|nd|rd|th)?"), // "Saturday, July 8th"
    ("month_day_year", r"(\w+)\s+(\d+)(?:st|nd|rd|th)?,?\s+(\d{4})"),    // "July 8th, 2025"
    ("numeric_slash", r"(\d+)/(\d+)/(\d{4})"),                           // "7/8/2025"
    ("numeric_dash", r"(\d+)-(\d+)-(\d{4})"),                            // "7-8-2025"
    ("month_day", r"(\w+)\s+(\d+)(?:st|nd|rd|th)?"),                     // "July 8th"
];

pub const TIME_PATTERNS: &[(&str, &str)] = &[
    ("hour_minute_meridiem", r"(\d+):(\d+)\s*(pm|am)"), // "8:30 PM"
    ("hour_meridiem", r"(\d+)\s*(pm|am)"),              // "8 PM"
    ("hour_minute_24h", r"(\d+):(\d+)"),                // "20:30"
];

/// Group 1 of every cover pattern is the amount
pub const COVER_PATTERNS: &[(&str, &str)] = &[
    ("amount_cover", r"\$(\d+)\s*cover"),
    ("cover_amount", r"cover\s*\$(\d+)"),
    ("amount_admission", r"\$(\d+)\s*admission"),
];

/// The three priority lists used by the extractor
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    pub date: PatternList,
    pub time: PatternList,
    pub cover: PatternList,
}

impl FieldPatterns {
    pub fn compile(
        date: &[(&'static str, &str)],
        time: &[(&'static str, &str)],
        cover: &[(&'static str, &str)],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            date: PatternList::compile(date)?,
            time: PatternList::compile(time)?,
            cover: PatternList::compile(cover)?,
        })
    }

    /// The built-in lists
    pub fn standard() -> &'static FieldPatterns {
        &STANDARD_PATTERNS
    }
}

static STANDARD_PATTERNS: Lazy<FieldPatterns> = Lazy::new(|| {
    FieldPatterns::compile(DATE_PATTERNS, TIME_PATTERNS, COVER_PATTERNS)
        .expect("built-in field patterns are valid")
});
