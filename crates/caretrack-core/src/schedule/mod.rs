//! Dose schedule calculator.
//!
//! Computes, from a medication's daily start time and repeat interval, the
//! next dose instant relative to a caller-supplied "now", the remaining-time
//! label shown in reminder lists, and the next three upcoming doses.
//!
//! This is a total function by design: a reminder display must never crash
//! or blank out because of a bad record, so every malformed input degrades
//! to a defined sentinel output instead of an error.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::{DoseDisplayInfo, Medication};

/// Remaining-millis sentinel for medications without a usable schedule.
/// Maximum value so such entries sort after every scheduled one.
pub const UNSCHEDULED_REMAINING_MILLIS: i64 = i64::MAX;

/// Remaining-time label for medications without a usable schedule.
pub const UNSCHEDULED_LABEL: &str = "--h --min";

/// Remaining-time label for the defensive negative-gap path.
pub const ERROR_LABEL: &str = "Error";

/// Format of each line in the upcoming-doses list.
pub const DOSE_TIMESTAMP_FORMAT: &str = "%H:%M - %d/%m/%Y";

/// Number of upcoming doses listed per medication.
pub const UPCOMING_DOSE_COUNT: usize = 3;

/// Compute the dose display view of a medication against `now`.
///
/// Never fails. Unschedulable records (non-positive or non-numeric
/// interval, unparseable start time) produce the sentinel label and
/// maximum remaining-millis, anchored at `now` for list formatting.
pub fn compute_display_info(medication: &Medication, now: NaiveDateTime) -> DoseDisplayInfo {
    let Some(interval_hours) = medication.parsed_interval_hours() else {
        return unscheduled(medication, now);
    };

    let Some(start) = parse_start_time(&medication.start_time) else {
        return unscheduled(medication, now);
    };

    // Today's anchor dose: today's date at HH:MM, seconds zeroed.
    let anchor = now.date().and_time(start);

    // Shift the anchor by whole interval multiples to the first dose
    // instant at or after now. O(1) equivalent of the repeated-addition
    // loop; an exact multiple lands on now itself, never behind it. The
    // step count may be negative when today's anchor is still ahead, so
    // the next dose is always within one interval of now. Ceiling division
    // over a positive step: truncation already rounds a negative gap
    // toward zero, a positive remainder rounds up.
    let step_secs = interval_hours * 3600;
    let gap_secs = (now - anchor).num_seconds();
    let quotient = gap_secs / step_secs;
    let steps = if gap_secs % step_secs > 0 {
        quotient + 1
    } else {
        quotient
    };
    let next_dose = anchor + Duration::seconds(steps * step_secs);

    let gap = next_dose - now;
    if gap < Duration::zero() {
        // Unreachable given the advance above; degrade rather than panic.
        return DoseDisplayInfo {
            medication: medication.clone(),
            remaining_label: ERROR_LABEL.to_string(),
            remaining_millis: UNSCHEDULED_REMAINING_MILLIS,
            upcoming_doses: format_upcoming(next_dose, interval_hours),
        };
    }

    let total_minutes = gap.num_minutes();
    let remaining_label = format!("{}h {}min", total_minutes / 60, total_minutes % 60);

    DoseDisplayInfo {
        medication: medication.clone(),
        remaining_label,
        remaining_millis: gap.num_milliseconds(),
        upcoming_doses: format_upcoming(next_dose, interval_hours),
    }
}

/// Sort dose views ascending by time-to-next-dose, soonest first.
/// Unschedulable entries carry the maximum sentinel and end up last;
/// the sort is stable so equal entries keep their input order.
pub fn sort_soonest_first(infos: &mut [DoseDisplayInfo]) {
    infos.sort_by_key(|info| info.remaining_millis);
}

fn unscheduled(medication: &Medication, now: NaiveDateTime) -> DoseDisplayInfo {
    DoseDisplayInfo {
        medication: medication.clone(),
        remaining_label: UNSCHEDULED_LABEL.to_string(),
        remaining_millis: UNSCHEDULED_REMAINING_MILLIS,
        // Anchor at now so the list still renders something sensible.
        upcoming_doses: format_upcoming(now, medication.interval_hours_or_default()),
    }
}

fn format_upcoming(next_dose: NaiveDateTime, interval_hours: i64) -> String {
    (0..UPCOMING_DOSE_COUNT as i64)
        .map(|i| {
            (next_dose + Duration::hours(interval_hours * i))
                .format(DOSE_TIMESTAMP_FORMAT)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strict "HH:MM" parse: two digits, colon, two digits, in range.
fn parse_start_time(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return None;
    }
    let hour: u32 = text[0..2].parse().ok()?;
    let minute: u32 = text[3..5].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
