use crate::constants::DEFAULT_VENUES;

/// Ordered list of known venue names. Entries are stored lowercased and
/// trimmed; blank entries are dropped since they would match any text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueGazetteer {
    venues: Vec<String>,
}

impl VenueGazetteer {
    pub fn new<I, S>(venues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let venues = venues
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        Self { venues }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.venues.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl Default for VenueGazetteer {
    fn default() -> Self {
        Self::new(DEFAULT_VENUES)
    }
}

/// Substring lookup of venue names, first configured entry wins.
pub struct VenueMatcher;

impl VenueMatcher {
    /// Returns the first gazetteer entry contained in `text`, title-cased.
    pub fn find(text: &str, gazetteer: &VenueGazetteer) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        gazetteer
            .iter()
            .find(|venue| haystack.contains(venue))
            .map(title_case)
    }

    pub fn mentions_venue(text: &str, gazetteer: &VenueGazetteer) -> bool {
        Self::find(text, gazetteer).is_some()
    }
}

/// Upper-case the first letter of each run of letters, lower-case the rest.
/// Any non-letter starts a new run, so "rock n' roll" becomes "Rock N' Roll".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
