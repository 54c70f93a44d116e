use crate::extraction::{VenueGazetteer, VenueMatcher};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TIME_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*(pm|am)|tonight|today|\d+:\d+").expect("time signal pattern is valid")
});

/// Which of the three independent signals fired for a caption
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSignals {
    pub keyword: bool,
    pub venue: bool,
    pub time: bool,
}

impl ClassificationSignals {
    pub fn any(&self) -> bool {
        self.keyword || self.venue || self.time
    }
}

/// Decides whether a caption announces an event. Any single signal is
/// enough; there is no negative filtering.
#[derive(Debug, Clone, Copy)]
pub struct EventClassifier<'c> {
    keywords: &'c [String],
    gazetteer: &'c VenueGazetteer,
}

impl<'c> EventClassifier<'c> {
    pub fn new(keywords: &'c [String], gazetteer: &'c VenueGazetteer) -> Self {
        Self { keywords, gazetteer }
    }

    pub fn is_event(&self, text: Option<&str>) -> bool {
        self.signals(text).any()
    }

    pub fn signals(&self, text: Option<&str>) -> ClassificationSignals {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return ClassificationSignals::default(),
        };
        let lowered = text.to_lowercase();
        ClassificationSignals {
            keyword: self
                .keywords
                .iter()
                .any(|k| !k.is_empty() && lowered.contains(&k.to_lowercase())),
            venue: VenueMatcher::mentions_venue(&lowered, self.gazetteer),
            time: TIME_SIGNAL.is_match(&lowered),
        }
    }
}
