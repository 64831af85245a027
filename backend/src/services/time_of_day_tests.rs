#[cfg(test)]
mod tests {
    use crate::models::time::ZoneSetting;
    use crate::services::time_of_day::{
        describe_hour, format_clock_label, select_dominant_hour, summarize_histogram,
        AggregationResult, HourHistogram, HourOfDay, HourOfDayAggregator,
        InvalidTimestampPolicy, MostCommonTime, TimeOfDayError, NO_DATA_DESCRIPTION,
        NO_DATA_TIME,
    };
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    const NONE: [&str; 0] = [];

    fn hour(h: u8) -> HourOfDay {
        HourOfDay::new(h).unwrap()
    }

    fn utc_skip() -> HourOfDayAggregator {
        HourOfDayAggregator::new(ZoneSetting::Utc, InvalidTimestampPolicy::Skip)
    }

    fn utc_reject() -> HourOfDayAggregator {
        HourOfDayAggregator::new(ZoneSetting::Utc, InvalidTimestampPolicy::Reject)
    }

    #[test]
    fn test_hour_of_day_bounds() {
        assert!(HourOfDay::new(0).is_some());
        assert!(HourOfDay::new(23).is_some());
        assert!(HourOfDay::new(24).is_none());
        assert!(HourOfDay::try_from(99).is_err());
        assert_eq!(serde_json::to_string(&hour(8)).unwrap(), "8");
        assert!(serde_json::from_str::<HourOfDay>("24").is_err());
    }

    #[test]
    fn test_describe_hour_table_edges() {
        let cases = [
            (0, "Night walk"),
            (4, "Night walk"),
            (5, "Morning walk"),
            (9, "Morning walk"),
            (10, "Late morning walk"),
            (11, "Late morning walk"),
            (12, "Afternoon walk"),
            (14, "Afternoon walk"),
            (15, "Late afternoon walk"),
            (17, "Late afternoon walk"),
            (18, "Evening walk"),
            (21, "Evening walk"),
            (22, "Night walk"),
            (23, "Night walk"),
        ];
        for (h, expected) in cases {
            assert_eq!(describe_hour(hour(h)), expected, "hour {h}");
        }
    }

    #[test]
    fn test_format_clock_label() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_clock_label(&day.and_hms_opt(8, 5, 0).unwrap()), "8:05 AM");
        assert_eq!(format_clock_label(&day.and_hms_opt(0, 0, 0).unwrap()), "12:00 AM");
        assert_eq!(format_clock_label(&day.and_hms_opt(12, 30, 0).unwrap()), "12:30 PM");
        assert_eq!(format_clock_label(&day.and_hms_opt(23, 59, 0).unwrap()), "11:59 PM");
    }

    #[test]
    fn test_empty_histogram() {
        let histogram = utc_skip().build_histogram(NONE).unwrap();
        assert!(histogram.is_empty());
        assert_eq!(select_dominant_hour(&histogram), None);
    }

    #[test]
    fn test_summarize_empty_reports_no_data() {
        let result = utc_skip().summarize(NONE, NONE).unwrap();
        assert_eq!(result, AggregationResult::no_data());
        assert_eq!(result.display_time, NO_DATA_TIME);
        assert_eq!(result.description, NO_DATA_DESCRIPTION);

        let card = MostCommonTime::from(&result);
        assert_eq!(card.time, "N/A");
        assert_eq!(card.description, "No data available");
    }

    #[test]
    fn test_summarize_uses_label_of_first_occurrence() {
        let pee = ["2024-01-01T08:05:00", "2024-01-01T08:45:00", "2024-01-01T14:00:00"];
        let result = utc_skip().summarize(pee, NONE).unwrap();

        assert_eq!(result.most_common_hour, Some(hour(8)));
        assert_eq!(result.display_time, "8:05 AM");
        assert_eq!(result.description, "Morning walk");
    }

    #[test]
    fn test_summarize_combines_pee_and_poop() {
        let pee = ["2024-01-01T08:05:00", "2024-01-01T19:10:00"];
        let poop = ["2024-01-02T19:40:00", "2024-01-03T19:00:00"];
        let result = utc_skip().summarize(pee, poop).unwrap();

        assert_eq!(result.most_common_hour, Some(hour(19)));
        assert_eq!(result.display_time, "7:10 PM");
        assert_eq!(result.description, "Evening walk");
    }

    #[test]
    fn test_histogram_labels_are_not_overwritten() {
        let histogram = utc_skip()
            .build_histogram(["2024-01-01T08:45:00", "2024-01-02T08:05:00"])
            .unwrap();
        let bucket = histogram.get(hour(8)).unwrap();
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.display_label, "8:45 AM");
    }

    #[test]
    fn test_tie_goes_to_lowest_hour_regardless_of_order() {
        let forward = [
            "2024-01-01T08:00:00",
            "2024-01-02T08:30:00",
            "2024-01-01T20:00:00",
            "2024-01-02T20:15:00",
        ];
        let mut backward = forward;
        backward.reverse();
        let interleaved = [forward[2], forward[0], forward[3], forward[1]];

        for input in [forward, backward, interleaved] {
            let result = utc_skip().summarize(input, NONE).unwrap();
            assert_eq!(result.most_common_hour, Some(hour(8)));
            assert_eq!(result.description, "Morning walk");
        }

        let first = utc_skip().summarize(forward, NONE).unwrap();
        let again = utc_skip().summarize(forward, NONE).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_tie_between_pee_and_poop_hours() {
        let pee = ["2024-01-01T21:00:00"];
        let poop = ["2024-01-01T06:00:00"];
        let result = utc_skip().summarize(pee, poop).unwrap();
        assert_eq!(result.most_common_hour, Some(hour(6)));
    }

    #[test]
    fn test_skip_policy_drops_invalid_entries() {
        let pee = ["2024-01-01T08:05:00", "not a date", "", "2024-01-01T14:00:00"];
        let histogram = utc_skip().build_histogram(pee).unwrap();
        assert_eq!(histogram.total_count(), 2);
        assert_eq!(histogram.len(), 2);

        let result = utc_skip().summarize(["garbage"], NONE).unwrap();
        assert_eq!(result, AggregationResult::no_data());
    }

    #[test]
    fn test_reject_policy_fails_the_batch() {
        let pee = ["2024-01-01T08:05:00"];
        let poop = ["2024-01-01T09:00:00", "bogus"];
        let err = utc_reject().summarize(pee, poop).unwrap_err();

        let TimeOfDayError::InvalidTimestamp { index, source } = err;
        assert_eq!(index, 2);
        assert_eq!(source.value, "bogus");
    }

    #[test]
    fn test_zone_shifts_absolute_timestamps() {
        let plus_two = ZoneSetting::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        let aggregator = HourOfDayAggregator::new(plus_two, InvalidTimestampPolicy::Reject);

        let result = aggregator
            .summarize(["2024-01-01T06:05:00Z", "2024-01-01T06:40:00+00:00"], NONE)
            .unwrap();
        assert_eq!(result.most_common_hour, Some(hour(8)));
        assert_eq!(result.display_time, "8:05 AM");

        let in_utc = utc_reject()
            .summarize(["2024-01-01T06:05:00Z"], NONE)
            .unwrap();
        assert_eq!(in_utc.most_common_hour, Some(hour(6)));
        assert_eq!(in_utc.description, "Morning walk");
    }

    #[test]
    fn test_summarize_instants_matches_strings() {
        let instants = vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 22, 15, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 22, 50, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 7, 0, 0).unwrap(),
        ];
        let strings: Vec<String> = instants.iter().map(|i| i.to_rfc3339()).collect();

        let no_instants: Vec<DateTime<Utc>> = Vec::new();
        let no_strings: Vec<String> = Vec::new();
        let from_instants = utc_skip().summarize_instants(instants, no_instants);
        let from_strings = utc_skip().summarize(&strings, &no_strings).unwrap();

        assert_eq!(from_instants, from_strings);
        assert_eq!(from_instants.display_time, "10:15 PM");
        assert_eq!(from_instants.description, "Night walk");
    }

    #[test]
    fn test_summarize_histogram_direct() {
        let mut histogram = HourHistogram::new();
        let day = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        histogram.record(&day.and_hms_opt(13, 20, 0).unwrap());
        let result = summarize_histogram(&histogram);
        assert_eq!(result.display_time, "1:20 PM");
        assert_eq!(result.description, "Afternoon walk");
    }

    fn timestamp_strategy() -> impl Strategy<Value = String> {
        (0u32..28, 0u32..24, 0u32..60).prop_map(|(day, h, m)| {
            format!("2024-02-{:02}T{:02}:{:02}:00", day + 1, h, m)
        })
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_valid_inputs(
            valid in prop::collection::vec(timestamp_strategy(), 0..64),
            invalid in 0usize..5,
        ) {
            let mut input = valid.clone();
            input.extend((0..invalid).map(|i| format!("bad-{}", i)));

            let histogram = utc_skip().build_histogram(&input).unwrap();
            prop_assert_eq!(histogram.total_count(), valid.len());
            prop_assert!(histogram.hours().all(|h| h.value() < 24));
            prop_assert!(histogram.iter().all(|b| b.count >= 1));
        }

        #[test]
        fn prop_hours_match_distinct_input_hours(
            valid in prop::collection::vec(timestamp_strategy(), 0..64),
        ) {
            let histogram = utc_skip().build_histogram(&valid).unwrap();
            let mut expected: Vec<u8> = valid
                .iter()
                .map(|s| s[11..13].parse::<u8>().unwrap())
                .collect();
            expected.sort_unstable();
            expected.dedup();
            let actual: Vec<u8> = histogram.hours().map(|h| h.value()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_dominant_hour_is_order_independent(
            valid in prop::collection::vec(timestamp_strategy(), 1..48),
        ) {
            let mut reversed = valid.clone();
            reversed.reverse();

            let forward = utc_skip().build_histogram(&valid).unwrap();
            let backward = utc_skip().build_histogram(&reversed).unwrap();
            let chosen = select_dominant_hour(&forward);
            prop_assert_eq!(chosen, select_dominant_hour(&backward));

            let chosen = chosen.unwrap();
            let max = forward.iter().map(|b| b.count).max().unwrap();
            prop_assert_eq!(forward.get(chosen).unwrap().count, max);
            prop_assert!(forward
                .iter()
                .filter(|b| b.count == max)
                .all(|b| b.hour >= chosen));
        }
    }
}
