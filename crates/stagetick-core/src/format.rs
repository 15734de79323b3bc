//! Display formatting for elapsed/remaining time.
//!
//! Times are rendered as `MM : SS`, switching to `HH : MM : SS` once the
//! value reaches a full hour. Every field is zero-padded to two digits.

/// Format a millisecond count for display.
///
/// Truncates to whole seconds. Values under an hour render as `MM : SS`,
/// longer ones as `HH : MM : SS`.
pub fn format_time(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02} : {minutes:02} : {seconds:02}")
    } else {
        format!("{minutes:02} : {seconds:02}")
    }
}

/// Split a millisecond count into the minutes/seconds pair the duration
/// inputs hold. Sub-second precision is dropped; minutes may exceed 59.
pub fn input_fields_from_ms(milliseconds: u64) -> (u64, u64) {
    let total_seconds = milliseconds / 1000;
    (total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_renders_minutes_seconds() {
        assert_eq!(format_time(0), "00 : 00");
    }

    #[test]
    fn sub_second_truncates_to_zero() {
        assert_eq!(format_time(999), "00 : 00");
    }

    #[test]
    fn under_an_hour_has_two_fields() {
        assert_eq!(format_time(5_000), "00 : 05");
        assert_eq!(format_time(83_000), "01 : 23");
        assert_eq!(format_time(3_599_999), "59 : 59");
    }

    #[test]
    fn hour_boundary_switches_to_three_fields() {
        assert_eq!(format_time(3_600_000), "01 : 00 : 00");
        assert_eq!(format_time(3_661_000), "01 : 01 : 01");
    }

    #[test]
    fn input_fields_round_down() {
        assert_eq!(input_fields_from_ms(90_500), (1, 30));
        assert_eq!(input_fields_from_ms(599 * 60_000), (599, 0));
    }

    proptest! {
        #[test]
        fn valid_field_pairs_round_trip(m in 0u64..=599, s in 0u64..=59) {
            let ms = (m * 60 + s) * 1000;
            prop_assert_eq!(input_fields_from_ms(ms), (m, s));
            let rendered = format_time(ms);
            if m >= 60 {
                prop_assert_eq!(
                    rendered,
                    format!("{:02} : {:02} : {:02}", m / 60, m % 60, s)
                );
            } else {
                prop_assert_eq!(rendered, format!("{m:02} : {s:02}"));
            }
        }
    }
}
