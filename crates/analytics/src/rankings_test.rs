//! Tests for the ranking helpers

use chrono::Utc;
use sideline_tracking::{EventType, Interaction};

use crate::rankings::{
    count_ordered, optimal_post_time, peak_hours, suggest_hashtags, top_clicked_elements,
    trending_topics,
};
use crate::types::{HourActivity, InterestCount};

fn click(element: &str, timestamp: f64) -> Interaction {
    Interaction {
        user_id: "user_abcdef123456".to_string(),
        event_type: EventType::Click,
        timestamp,
        session_id: None,
        element: Some(element.to_string()),
        page_url: None,
        target: None,
        value: None,
        x: None,
        y: None,
        scroll_depth: None,
        duration: None,
        metadata: None,
        received_at: Utc::now(),
    }
}

fn interest(element: &str, clicks: u64) -> InterestCount {
    InterestCount {
        element: element.to_string(),
        clicks,
    }
}

#[test]
fn test_count_ordered_ranks_by_count() {
    let counts = count_ordered(["a", "b", "b", "c", "b", "c"]);
    assert_eq!(
        counts,
        vec![("b", 3), ("c", 2), ("a", 1)]
    );
}

#[test]
fn test_count_ordered_ties_keep_first_encounter_order() {
    let counts = count_ordered(["late", "early", "late", "early", "middle"]);
    // late and early tie at 2; late was seen first
    assert_eq!(counts[0].0, "late");
    assert_eq!(counts[1].0, "early");
    assert_eq!(counts[2], ("middle", 1));
}

#[test]
fn test_top_clicked_elements_ignores_non_clicks() {
    let mut events = vec![
        click("nav-home", 1_000.0),
        click("nav-home", 1_001.0),
        click("nav-fixtures", 1_002.0),
    ];
    let mut hover = click("nav-tables", 1_003.0);
    hover.event_type = EventType::Hover;
    events.push(hover);

    let top = top_clicked_elements(&events, 5);
    assert_eq!(
        top,
        vec![interest("nav-home", 2), interest("nav-fixtures", 1)]
    );
}

#[test]
fn test_top_clicked_elements_respects_limit() {
    let events: Vec<Interaction> = (0..10)
        .map(|i| click(&format!("el-{}", i), 1_000.0 + i as f64))
        .collect();

    assert_eq!(top_clicked_elements(&events, 5).len(), 5);
}

#[test]
fn test_peak_hours_groups_by_utc_hour() {
    // 2025-06-01: 08:00, 08:30, 14:00 UTC
    let events = vec![
        click("a", 1_748_764_800.0),
        click("b", 1_748_766_600.0),
        click("c", 1_748_786_400.0),
    ];

    let peaks = peak_hours(&events, 3);
    assert_eq!(
        peaks,
        vec![
            HourActivity {
                hour: 8,
                interactions: 2
            },
            HourActivity {
                hour: 14,
                interactions: 1
            },
        ]
    );
}

#[test]
fn test_suggest_hashtags_prefers_own_clicks() {
    let clicked = vec![
        interest("hashtag-Lionesses", 4),
        interest("nav-home", 3),
        interest("hashtag-NWSL", 2),
    ];

    let suggested = suggest_hashtags(&clicked);
    assert_eq!(
        suggested,
        vec!["Lionesses", "NWSL", "WomensFootball", "UWCL", "RedFlames"]
    );
}

#[test]
fn test_suggest_hashtags_skips_duplicates_when_padding() {
    let clicked = vec![interest("hashtag-UWCL", 2)];

    let suggested = suggest_hashtags(&clicked);
    assert_eq!(suggested.len(), 5);
    assert_eq!(suggested[0], "UWCL");
    // UWCL from the defaults is skipped, not repeated
    assert_eq!(
        suggested.iter().filter(|s| s.as_str() == "UWCL").count(),
        1
    );
}

#[test]
fn test_suggest_hashtags_caps_own_topics_at_three() {
    let clicked = vec![
        interest("hashtag-A", 5),
        interest("hashtag-B", 4),
        interest("hashtag-C", 3),
        interest("hashtag-D", 2),
    ];

    let suggested = suggest_hashtags(&clicked);
    assert_eq!(suggested[..3], ["A", "B", "C"]);
    assert_eq!(suggested.len(), 5);
}

#[test]
fn test_suggest_hashtags_all_defaults_without_history() {
    let suggested = suggest_hashtags(&[]);
    assert_eq!(
        suggested,
        vec![
            "WomensFootball",
            "UWCL",
            "RedFlames",
            "WomenInSports",
            "FemaleSoccer"
        ]
    );
}

#[test]
fn test_optimal_post_time() {
    let peaks = vec![
        HourActivity {
            hour: 21,
            interactions: 9,
        },
        HourActivity {
            hour: 8,
            interactions: 3,
        },
    ];
    assert_eq!(optimal_post_time(&peaks), "21:00");

    let single_digit = vec![HourActivity {
        hour: 7,
        interactions: 1,
    }];
    assert_eq!(optimal_post_time(&single_digit), "07:00");

    assert_eq!(optimal_post_time(&[]), "09:00");
}

#[test]
fn test_trending_topics_requires_prefix() {
    let clicks = vec![
        click("hashtag-UWCL", 1_000.0),
        click("hashtag-UWCL", 1_001.0),
        click("hashtag-Lionesses", 1_002.0),
        click("nav-home", 1_003.0),
        // marker in the middle does not count as a topic click
        click("promo-hashtag-UWCL", 1_004.0),
    ];

    let trending = trending_topics(&clicks, 10);
    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0].hashtag, "UWCL");
    assert_eq!(trending[0].clicks, 2);
    assert_eq!(trending[0].trending_score, 200);
    assert_eq!(trending[1].hashtag, "Lionesses");
}

#[test]
fn test_trending_topics_limit() {
    let clicks: Vec<Interaction> = (0..15)
        .map(|i| click(&format!("hashtag-T{}", i), 1_000.0 + i as f64))
        .collect();

    assert_eq!(trending_topics(&clicks, 10).len(), 10);
}
