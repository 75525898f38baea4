//! Property tests for calendar alignment and the horizon window.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use synapse::models::DaySchedule;
use synapse::services::calendar_aligner::{align, match_offset};
use synapse::services::horizon::apply_window;

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Monday".to_string()),
        Just("sun".to_string()),
        Just("Day 3".to_string()),
        "(Mon|Tue|Wed|Thu|Fri|Sat|Sun)[a-z]{0,6}",
        (1u32..=12, 1u32..=31).prop_map(|(m, d)| format!("{}/{}", m, d)),
        (1u32..=28).prop_map(|d| format!("Oct {}", d)),
        "[ -~]{0,12}",
    ]
}

fn entries() -> impl Strategy<Value = Vec<DaySchedule>> {
    prop::collection::vec((label(), label()), 0..14).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(day, date)| DaySchedule::new(day, date, vec![]))
            .collect()
    })
}

fn today() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|n| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(n))
}

proptest! {
    #[test]
    fn aligned_dates_are_contiguous(days in entries(), today in today()) {
        let count = days.len();
        let aligned = align(days, today);
        prop_assert_eq!(aligned.len(), count);
        for pair in aligned.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
    }

    #[test]
    fn matched_entry_lands_on_today(days in entries(), today in today()) {
        prop_assume!(!days.is_empty());
        let offset = match_offset(&days, today);
        prop_assert!(offset < days.len());
        let aligned = align(days, today);
        prop_assert_eq!(aligned[offset].date, today);
    }

    #[test]
    fn labels_render_from_dates(days in entries(), today in today()) {
        for day in align(days, today) {
            let weekday = day.date.format("%a").to_string();
            let date = day.date.format("%b %-d").to_string();
            prop_assert_eq!(&day.schedule.day, &weekday);
            prop_assert_eq!(&day.schedule.date, &date);
        }
    }

    #[test]
    fn window_is_an_ordered_prefix(days in entries(), today in today(), extra in 0i64..20, cap in 0usize..12) {
        let aligned = align(days, today);
        let cutoff = today + Duration::days(extra);
        let kept = apply_window(aligned.clone(), cutoff, cap);
        prop_assert!(kept.len() <= cap);
        prop_assert!(kept.iter().all(|d| d.date <= cutoff));
        // Dates increase, so the survivors are a prefix of the input.
        prop_assert_eq!(&kept[..], &aligned[..kept.len()]);
    }
}
