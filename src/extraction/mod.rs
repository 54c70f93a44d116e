//! Structured field extraction from flyer text.

pub mod patterns;
pub mod venue;

pub use patterns::{FieldPatterns, PatternList};
pub use venue::{title_case, VenueGazetteer, VenueMatcher};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fields pulled out of a flyer. Each one is independently optional and
/// omitted from the serialized record when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(rename = "extracted_date", skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    #[serde(rename = "extracted_time", skip_serializing_if = "Option::is_none", default)]
    pub time: Option<String>,
    #[serde(rename = "extracted_venue", skip_serializing_if = "Option::is_none", default)]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cover_charge: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.venue.is_none() && self.cover_charge.is_none()
    }
}

/// Date, time and cover charge extraction over a set of priority lists
#[derive(Debug, Clone, Copy)]
pub struct PatternExtractor<'p> {
    patterns: &'p FieldPatterns,
}

impl Default for PatternExtractor<'static> {
    fn default() -> Self {
        Self::new(FieldPatterns::standard())
    }
}

impl<'p> PatternExtractor<'p> {
    pub fn new(patterns: &'p FieldPatterns) -> Self {
        Self { patterns }
    }

    /// Date, time and cover charge. The venue is left unset; see
    /// [`parse_flyer_text`] for the full set.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            date: self.extract_date(text),
            time: self.extract_time(text),
            venue: None,
            cover_charge: self.extract_cover_charge(text),
        }
    }

    /// Matched substring, verbatim
    pub fn extract_date(&self, text: &str) -> Option<String> {
        let (name, caps) = self.patterns.date.first_match(text)?;
        let date = caps.get(0)?.as_str().to_string();
        debug!(pattern = name, "Found date in flyer: {}", date);
        Some(date)
    }

    /// Matched substring, verbatim
    pub fn extract_time(&self, text: &str) -> Option<String> {
        let (name, caps) = self.patterns.time.first_match(text)?;
        let time = caps.get(0)?.as_str().to_string();
        debug!(pattern = name, "Found time in flyer: {}", time);
        Some(time)
    }

    /// Normalized to `$N` whichever pattern matched
    pub fn extract_cover_charge(&self, text: &str) -> Option<String> {
        let (name, caps) = self.patterns.cover.first_match(text)?;
        let cover = format!("${}", caps.get(1)?.as_str());
        debug!(pattern = name, "Found cover charge in flyer: {}", cover);
        Some(cover)
    }
}

/// Every structured field a flyer can yield: the pattern fields plus the
/// first gazetteer venue it mentions.
pub fn parse_flyer_text(text: &str, extractor: &PatternExtractor<'_>, gazetteer: &VenueGazetteer) -> ExtractedFields {
    if text.is_empty() {
        return ExtractedFields::default();
    }
    let mut fields = extractor.extract(text);
    fields.venue = VenueMatcher::find(text, gazetteer);
    if let Some(venue) = &fields.venue {
        debug!("Found venue in flyer: {}", venue);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PatternExtractor<'static> {
        PatternExtractor::default()
    }

    #[test]
    fn each_date_shape_is_returned_verbatim() {
        let cases = [
            ("Join us Saturday, July 8th for music", "Saturday, July 8th"),
            ("Save the date: July 8th, 2025!", "July 8th, 2025"),
            ("Doors on 7/8/2025", "7/8/2025"),
            ("Doors on 7-8-2025", "7-8-2025"),
            ("See you July 8th", "July 8th"),
        ];
        for (text, expected) in cases {
            assert_eq!(extractor().extract_date(text).as_deref(), Some(expected), "text: {text}");
        }
    }

    #[test]
    fn date_priority_beats_earlier_position() {
        // The bare month/day shape occurs first in the text, the weekday shape wins anyway
        let text = "Tickets on sale June 1st. Show is Saturday, July 8th";
        assert_eq!(extractor().extract_date(text).as_deref(), Some("Saturday, July 8th"));
    }

    #[test]
    fn time_shapes_in_priority_order() {
        assert_eq!(extractor().extract_time("Music at 8:30 PM").as_deref(), Some("8:30 PM"));
        assert_eq!(extractor().extract_time("Music at 8 pm").as_deref(), Some("8 pm"));
        assert_eq!(extractor().extract_time("Music at 20:30").as_deref(), Some("20:30"));
        // 24h shape appears first but the meridiem shape has priority
        assert_eq!(extractor().extract_time("Load-in 17:00, music 9PM").as_deref(), Some("9PM"));
    }

    #[test]
    fn cover_charge_is_normalized() {
        for text in ["$20 cover", "cover $20", "$20 admission", "$20 COVER at the door"] {
            assert_eq!(extractor().extract_cover_charge(text).as_deref(), Some("$20"), "text: {text}");
        }
    }

    #[test]
    fn absent_fields_stay_unset() {
        let fields = extractor().extract("no details here");
        assert!(fields.is_empty());
    }

    #[test]
    fn flyer_text_yields_all_fields() {
        let text = "FRIDAY, AUGUST 15TH\nBLUE MOON SALOON\n9 PM\n$10 COVER";
        let fields = parse_flyer_text(text, &extractor(), &VenueGazetteer::default());
        assert_eq!(fields.date.as_deref(), Some("FRIDAY, AUGUST 15TH"));
        assert_eq!(fields.time.as_deref(), Some("9 PM"));
        assert_eq!(fields.venue.as_deref(), Some("Blue Moon Saloon"));
        assert_eq!(fields.cover_charge.as_deref(), Some("$10"));
    }

    #[test]
    fn empty_flyer_text_yields_nothing() {
        assert!(parse_flyer_text("", &extractor(), &VenueGazetteer::default()).is_empty());
    }

    #[test]
    fn flyer_text_follows_the_given_lists() {
        let reordered = FieldPatterns::compile(
            &[patterns::DATE_PATTERNS[4], patterns::DATE_PATTERNS[2]],
            patterns::TIME_PATTERNS,
            patterns::COVER_PATTERNS,
        )
        .unwrap();
        let text = "Tickets June 1st. Show 7/8/2025 at Whiskey Tales";
        let gazetteer = VenueGazetteer::default();

        let fields = parse_flyer_text(text, &extractor(), &gazetteer);
        assert_eq!(fields.date.as_deref(), Some("7/8/2025"));

        let fields = parse_flyer_text(text, &PatternExtractor::new(&reordered), &gazetteer);
        assert_eq!(fields.date.as_deref(), Some("June 1st"));
        assert_eq!(fields.venue.as_deref(), Some("Whiskey Tales"));
    }

    #[test]
    fn absent_fields_are_omitted_when_serialized() {
        let fields = ExtractedFields {
            date: Some("July 8th".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, serde_json::json!({ "extracted_date": "July 8th" }));
    }
}
