//! Pure ranking helpers
//!
//! Everything here operates on in-memory slices so it can be exercised
//! without a database. Counting preserves first-encounter order and the
//! sort is stable, so ties rank in the order the scan produced them.

use chrono::{DateTime, Timelike};
use sideline_tracking::{EventType, Interaction};

use crate::types::{HourActivity, InterestCount, TrendingTopic};

/// Lexical prefix marking an element as a trending-topic click
pub const TOPIC_PREFIX: &str = "hashtag-";

/// Substring that qualifies a clicked element for hashtag recommendations
const TOPIC_MARKER: &str = "hashtag";

/// Topics recommended to users with little or no hashtag history
pub const DEFAULT_TOPICS: [&str; 5] = [
    "WomensFootball",
    "UWCL",
    "RedFlames",
    "WomenInSports",
    "FemaleSoccer",
];

/// How many top interests a user report carries
pub const TOP_INTERESTS: usize = 5;

/// How many peak hours a user report carries
pub const TOP_HOURS: usize = 3;

/// How many hashtags a recommendation list is padded to
pub const RECOMMENDED_TOPICS: usize = 5;

/// How many of those may come from the user's own clicks
const OWN_TOPICS: usize = 3;

/// Fallback posting time for users with no recorded activity
const DEFAULT_POST_TIME: &str = "09:00";

/// Count occurrences of each key, preserving first-encounter order for ties
///
/// Returns (key, count) sorted by count descending; the sort is stable so
/// equal counts keep the order keys first appeared in the input.
pub fn count_ordered<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, u64)> = Vec::new();

    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Elements the user clicked, ranked by click count
///
/// Interactions are expected newest-first; ties rank by first appearance in
/// that scan.
pub fn top_clicked_elements(interactions: &[Interaction], limit: usize) -> Vec<InterestCount> {
    let clicked = interactions
        .iter()
        .filter(|i| i.event_type == EventType::Click)
        .filter_map(|i| i.element.as_deref());

    count_ordered(clicked)
        .into_iter()
        .take(limit)
        .map(|(element, clicks)| InterestCount {
            element: element.to_string(),
            clicks,
        })
        .collect()
}

/// Hours of the day (UTC) ranked by activity
pub fn peak_hours(interactions: &[Interaction], limit: usize) -> Vec<HourActivity> {
    let hours = interactions.iter().filter_map(|i| hour_of_day(i.timestamp));

    count_ordered(hours)
        .into_iter()
        .take(limit)
        .map(|(hour, interactions)| HourActivity { hour, interactions })
        .collect()
}

/// Engagement proxy: recent interaction volume times ten
pub fn engagement_score(interaction_count: usize) -> u64 {
    interaction_count as u64 * 10
}

/// Suggest hashtags from the user's clicked elements
///
/// Takes up to three of the user's own clicked topics (elements carrying the
/// topic marker, prefix stripped), then pads from [`DEFAULT_TOPICS`] to five
/// entries total, skipping duplicates.
pub fn suggest_hashtags(clicked_elements: &[InterestCount]) -> Vec<String> {
    let mut suggested: Vec<String> = clicked_elements
        .iter()
        .filter(|interest| interest.element.to_lowercase().contains(TOPIC_MARKER))
        .map(|interest| interest.element.replace(TOPIC_PREFIX, ""))
        .take(OWN_TOPICS)
        .collect();

    for topic in DEFAULT_TOPICS {
        if suggested.len() >= RECOMMENDED_TOPICS {
            break;
        }
        if !suggested.iter().any(|s| s == topic) {
            suggested.push(topic.to_string());
        }
    }

    suggested
}

/// Best posting time: the most active hour as `HH:00`
///
/// Falls back to a fixed morning slot when the user has no activity.
pub fn optimal_post_time(peak_hours: &[HourActivity]) -> String {
    match peak_hours.first() {
        Some(peak) => format!("{:02}:00", peak.hour),
        None => DEFAULT_POST_TIME.to_string(),
    }
}

/// Rank topic clicks into the site-wide trending list
///
/// Only elements carrying the `hashtag-` prefix count; the prefix is
/// stripped from the reported topic.
pub fn trending_topics(clicks: &[Interaction], limit: usize) -> Vec<TrendingTopic> {
    let topics = clicks
        .iter()
        .filter_map(|i| i.element.as_deref())
        .filter_map(|element| element.strip_prefix(TOPIC_PREFIX));

    count_ordered(topics)
        .into_iter()
        .take(limit)
        .map(|(hashtag, clicks)| TrendingTopic {
            hashtag: hashtag.to_string(),
            clicks,
            trending_score: clicks * 100,
        })
        .collect()
}

/// Hour of day (UTC) for a unix-seconds timestamp
fn hour_of_day(timestamp: f64) -> Option<u32> {
    DateTime::from_timestamp(timestamp as i64, 0).map(|dt| dt.hour())
}
