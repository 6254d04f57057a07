//! Mirrored post model and enrichment
//!
//! Posts are enriched at fetch time with extracted hashtags and a keyword
//! sentiment label. Both heuristics are deliberately shallow; they feed a
//! dashboard widget, not a model.

use serde::Serialize;

/// Terms treated as virtual hashtags when they appear in post text
const TOPIC_KEYWORDS: [&str; 14] = [
    "womens", "women", "wsl", "nwsl", "uwcl", "lionesses", "matildas", "uswnt", "soccer",
    "football", "goal", "match", "final", "champion",
];

const POSITIVE_WORDS: [&str; 17] = [
    "amazing",
    "incredible",
    "brilliant",
    "fantastic",
    "great",
    "awesome",
    "wonderful",
    "excellent",
    "love",
    "best",
    "win",
    "winner",
    "champion",
    "goal",
    "historic",
    "proud",
    "beautiful",
];

const NEGATIVE_WORDS: [&str; 16] = [
    "bad",
    "terrible",
    "awful",
    "worst",
    "hate",
    "disappointed",
    "disappointing",
    "poor",
    "loss",
    "lost",
    "injury",
    "injured",
    "unfair",
    "robbery",
    "sad",
    "unfortunate",
];

/// Score above which a post's reach counts toward positive sentiment
const ENGAGEMENT_BONUS_SCORE: i64 = 100;

/// Naive sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A mirrored social media post
#[derive(Debug, Clone, Serialize)]
pub struct SocialPost {
    /// Upstream post id
    pub id: String,
    /// Post title
    pub title: String,
    /// Post body text, may be empty for link posts
    pub text: String,
    /// Source subreddit
    pub subreddit: String,
    /// Upstream vote score
    pub score: i64,
    /// Upstream comment count
    pub num_comments: i64,
    /// Post author
    pub author: String,
    /// Upstream creation time, unix seconds
    pub created_utc: f64,
    /// Path to the post on the upstream site
    pub permalink: String,
    /// Hashtags extracted from title and body
    pub hashtags: Vec<String>,
    /// Keyword sentiment label
    pub sentiment: Sentiment,
}

/// Extract hashtags from post text
///
/// Picks up literal `#tag` tokens plus the fixed topic keywords as virtual
/// hashtags, capitalized, without duplicates.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut hashtags: Vec<String> = Vec::new();

    for (i, c) in text.char_indices() {
        if c != '#' {
            continue;
        }
        let rest = &text[i + 1..];
        let tag: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if !tag.is_empty() && !hashtags.iter().any(|h| h.eq_ignore_ascii_case(&tag)) {
            hashtags.push(tag);
        }
    }

    let lower = text.to_lowercase();
    for keyword in TOPIC_KEYWORDS {
        if lower.contains(keyword) && !hashtags.iter().any(|h| h.eq_ignore_ascii_case(keyword)) {
            hashtags.push(capitalize(keyword));
        }
    }

    hashtags
}

/// Label post sentiment from keyword counts
///
/// High-reach posts get one bonus point toward positive, mirroring how the
/// dashboard treats widely upvoted posts.
pub fn analyze_sentiment(text: &str, score: i64) -> Sentiment {
    if text.is_empty() {
        return Sentiment::Neutral;
    }

    let lower = text.to_lowercase();

    let positive = POSITIVE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .count();

    let engagement_bonus = usize::from(score > ENGAGEMENT_BONUS_SCORE);

    if positive + engagement_bonus > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_literal_hashtags() {
        let tags = extract_hashtags("Big night in the #UWCL for #Arsenal!");
        assert!(tags.contains(&"UWCL".to_string()));
        assert!(tags.contains(&"Arsenal".to_string()));
    }

    #[test]
    fn test_extract_virtual_hashtags() {
        let tags = extract_hashtags("What a match, that goal was historic");
        assert!(tags.contains(&"Match".to_string()));
        assert!(tags.contains(&"Goal".to_string()));
    }

    #[test]
    fn test_extract_deduplicates_case_insensitively() {
        let tags = extract_hashtags("#NWSL nwsl talk");
        assert_eq!(
            tags.iter().filter(|t| t.eq_ignore_ascii_case("nwsl")).count(),
            1
        );
    }

    #[test]
    fn test_extract_from_empty_text() {
        assert!(extract_hashtags("").is_empty());
    }

    #[test]
    fn test_sentiment_positive() {
        assert_eq!(
            analyze_sentiment("What an amazing, historic win", 10),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_sentiment_negative() {
        assert_eq!(
            analyze_sentiment("Terrible refereeing, absolute robbery", 10),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_neutral_and_empty() {
        assert_eq!(analyze_sentiment("Lineups are out", 10), Sentiment::Neutral);
        assert_eq!(analyze_sentiment("", 5000), Sentiment::Neutral);
    }

    #[test]
    fn test_sentiment_engagement_bonus_breaks_tie() {
        // no keywords either way, but a high score tips it positive
        assert_eq!(analyze_sentiment("Lineups are out", 500), Sentiment::Positive);
    }
}
