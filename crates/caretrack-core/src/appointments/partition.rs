//! Appointment partitioning.
//!
//! Splits stored appointments into the two displayed views at today's
//! midnight: "upcoming" keeps today-or-later ascending, "all" shows the
//! full set oldest first. Pure reorderings; applied after every mutation
//! so the visible list always matches the active filter.

use chrono::NaiveDateTime;

use crate::models::{Appointment, AppointmentFilter};

/// Appointments dated today or later, soonest first.
///
/// The boundary is `now` with the time-of-day zeroed, so an appointment
/// earlier today still counts as upcoming. Sorting is stable: equal
/// instants keep their stored order.
pub fn upcoming(all: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let today_start = today_start(now);
    let mut kept: Vec<Appointment> = all
        .iter()
        .filter(|appt| appt.date >= today_start)
        .cloned()
        .collect();
    kept.sort_by_key(|appt| appt.date);
    kept
}

/// The full unfiltered set, oldest first.
pub fn all_oldest_first(all: &[Appointment]) -> Vec<Appointment> {
    let mut sorted = all.to_vec();
    sorted.sort_by_key(|appt| appt.date);
    sorted
}

/// Which filter should become active after saving an appointment.
///
/// A newly created appointment dated before today's midnight would be
/// invisible under the Upcoming view, so the filter switches to whichever
/// partition the record actually lands in. A UX policy, not a correctness
/// invariant.
pub fn filter_for_saved(date: NaiveDateTime, now: NaiveDateTime) -> AppointmentFilter {
    if date < today_start(now) {
        AppointmentFilter::Past
    } else {
        AppointmentFilter::Upcoming
    }
}

fn today_start(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_hms_opt(0, 0, 0).expect("midnight is valid")
}
