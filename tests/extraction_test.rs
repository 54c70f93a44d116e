use fb_event_scraper::config::{Config, RunSettings};
use fb_event_scraper::extraction::{parse_flyer_text, FieldPatterns, PatternExtractor, VenueGazetteer, VenueMatcher};
use fb_event_scraper::record::EventRecordBuilder;
use fb_event_scraper::types::ArtistConfig;

fn default_config() -> Config {
    Config::from_lookup(|_| None, RunSettings::default())
}

#[test]
fn weekday_date_wins_over_earlier_bare_date() {
    let text = "July 3rd rehearsal, show on Saturday, July 8th";
    let fields = PatternExtractor::default().extract(text);
    assert_eq!(fields.date.as_deref(), Some("Saturday, July 8th"));
}

#[test]
fn custom_priority_list_changes_the_winner() {
    // Same text, bare month/day promoted to the top of the list
    let patterns = FieldPatterns::compile(
        &[("month_day", r"(\w+)\s+(\d+)(?:st|nd|rd|th)?")],
        &[],
        &[],
    )
    .unwrap();
    let fields = PatternExtractor::new(&patterns).extract("July 3rd rehearsal, show on Saturday, July 8th");
    assert_eq!(fields.date.as_deref(), Some("July 3rd"));
    assert_eq!(fields.time, None);
    assert_eq!(fields.cover_charge, None);
}

#[test]
fn classifier_gate_examples() {
    let config = default_config();
    let classifier = config.classifier();
    assert!(!classifier.is_event(Some("")));
    assert!(!classifier.is_event(None));
    assert!(classifier.is_event(Some("doors open tonight at 8pm")));
}

#[test]
fn default_gazetteer_lookup() {
    assert_eq!(
        VenueMatcher::find("Show at the blue moon saloon tonight", &VenueGazetteer::default()).as_deref(),
        Some("Blue Moon Saloon")
    );
}

#[test]
fn flyer_to_record_end_to_end() {
    let config = default_config();
    let artist = ArtistConfig::new("facebook.com/cajun.trio", "Cajun Trio", 8);
    let flyer = "CAJUN TRIO\nFriday, August 1st\nEl Sid O's\n9PM\ncover $5";
    let fields = parse_flyer_text(flyer, &config.extractor(), &config.venues);

    assert_eq!(fields.date.as_deref(), Some("Friday, August 1st"));
    assert_eq!(fields.time.as_deref(), Some("9PM"));
    assert_eq!(fields.venue.as_deref(), Some("El Sid O"));
    assert_eq!(fields.cover_charge.as_deref(), Some("$5"));

    let record = EventRecordBuilder::build(&artist, "Zydeco this friday!", flyer, fields);
    assert_eq!(record.title, "Cajun Trio at El Sid O");
    assert!(record.description.ends_with("\n\nCover: $5"));
    assert!(record.description.starts_with("Facebook Post: Zydeco this friday!\n\nFlyer Details: CAJUN TRIO"));
}
