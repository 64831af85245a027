#[cfg(test)]
mod tests {
    use crate::models::time::{parse_timestamp, ParsedTimestamp, ZoneSetting};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Timelike, Utc};

    fn plus_two() -> ZoneSetting {
        ZoneSetting::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
    }

    #[test]
    fn test_parse_rfc3339_is_absolute() {
        let parsed = parse_timestamp("2024-01-01T08:05:00Z").unwrap();
        assert!(matches!(parsed, ParsedTimestamp::Absolute(_)));

        let parsed = parse_timestamp("2024-01-01T08:05:00.123+02:00").unwrap();
        assert!(matches!(parsed, ParsedTimestamp::Absolute(_)));
    }

    #[test]
    fn test_parse_wall_clock_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();

        for raw in [
            "2024-01-01T08:05:00",
            "2024-01-01T08:05",
            "2024-01-01 08:05:00",
            "2024-01-01 08:05",
            "  2024-01-01T08:05:00  ",
        ] {
            match parse_timestamp(raw).unwrap() {
                ParsedTimestamp::WallClock(naive) => assert_eq!(naive, expected, "{raw}"),
                other => panic!("expected wall clock for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "   ", "yesterday", "2024-13-01T08:00:00", "08:05 AM", "NaN"] {
            let err = parse_timestamp(raw).unwrap_err();
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn test_wall_clock_of_converts_absolute_into_zone() {
        let wall = plus_two().wall_clock_of("2024-01-01T06:05:00Z").unwrap();
        assert_eq!(wall.hour(), 8);
        assert_eq!(wall.minute(), 5);

        let wall = ZoneSetting::Utc.wall_clock_of("2024-01-01T08:05:00+02:00").unwrap();
        assert_eq!(wall.hour(), 6);
    }

    #[test]
    fn test_wall_clock_of_keeps_bare_values() {
        for zone in [ZoneSetting::Utc, ZoneSetting::Local, plus_two()] {
            let wall = zone.wall_clock_of("2024-01-01T08:05:00").unwrap();
            assert_eq!(wall.hour(), 8);
        }
    }

    #[test]
    fn test_parse_instant_applies_zone_to_bare_values() {
        let instant = plus_two().parse_instant("2024-01-01T08:05").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 1, 6, 5, 0).unwrap());

        let instant = ZoneSetting::Utc.parse_instant("2024-01-01T08:05").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 1, 8, 5, 0).unwrap());
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(
            plus_two().local_date(&instant),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            ZoneSetting::Utc.local_date(&instant),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_zone_setting_from_str() {
        assert_eq!("utc".parse::<ZoneSetting>().unwrap(), ZoneSetting::Utc);
        assert_eq!("Z".parse::<ZoneSetting>().unwrap(), ZoneSetting::Utc);
        assert_eq!("LOCAL".parse::<ZoneSetting>().unwrap(), ZoneSetting::Local);
        assert_eq!("+02:00".parse::<ZoneSetting>().unwrap(), plus_two());
        assert_eq!("+0200".parse::<ZoneSetting>().unwrap(), plus_two());
        assert_eq!("+02".parse::<ZoneSetting>().unwrap(), plus_two());
        assert_eq!("+00:00".parse::<ZoneSetting>().unwrap(), ZoneSetting::Utc);
        assert_eq!(
            "-05:30".parse::<ZoneSetting>().unwrap(),
            ZoneSetting::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );

        assert!("Europe/Paris".parse::<ZoneSetting>().is_err());
        assert!("+25:00".parse::<ZoneSetting>().is_err());
        assert!("+2".parse::<ZoneSetting>().is_err());
    }

    #[test]
    fn test_zone_setting_display_roundtrip() {
        for zone in [ZoneSetting::Utc, ZoneSetting::Local, plus_two()] {
            let text = zone.to_string();
            assert_eq!(text.parse::<ZoneSetting>().unwrap(), zone);
        }
        assert_eq!(plus_two().to_string(), "+02:00");
    }

    #[test]
    fn test_zone_setting_serde() {
        let json = serde_json::to_string(&plus_two()).unwrap();
        assert_eq!(json, "\"+02:00\"");
        let back: ZoneSetting = serde_json::from_str("\"utc\"").unwrap();
        assert_eq!(back, ZoneSetting::Utc);
        assert!(serde_json::from_str::<ZoneSetting>("\"mars\"").is_err());
    }
}
