//! Visitor transformation
//!
//! Turns a raw visitor row into the public record: categorical fields are
//! copied, workflow stage times become absolute timestamps anchored at the
//! arrival instant, and the birth date is reduced to an age bucket.

use crate::core::time::{derive_absolute, derive_relative, localize};
use crate::domain::{RawVisitor, Result, Timestamp, Visitor};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use chrono_tz::Tz;

/// Transforms one raw visitor into its public form
///
/// The registration instant is best-effort: if it cannot be placed in
/// `location` the field is left empty. Every other derivation failure
/// rejects the record.
///
/// # Errors
///
/// Returns [`crate::domain::EdflowError::Format`] naming the first malformed
/// date or time-of-day fragment.
pub fn transform_visitor(raw: &RawVisitor, location: Tz) -> Result<Visitor> {
    let arrival = derive_absolute(&raw.arrival_date, &raw.arrival_time, location)?;
    let anchor = arrival.as_ref();
    let stage = |time: &str| -> Result<Option<Timestamp>> {
        Ok(derive_relative(anchor, time, location)?.map(|t| t.fixed_offset()))
    };

    let age_bucket = match (&arrival, raw.birth_date) {
        (Some(arrival), Some(birth_date)) => age_in_decades(arrival, birth_date).to_string(),
        _ => String::new(),
    };

    Ok(Visitor {
        location: raw.location.clone(),
        department: raw.department.clone(),
        visit_number: raw.visit_number,
        mutation_id: raw.mutation_id,
        room: raw.room.clone(),
        bed: raw.bed.clone(),
        age_bucket,
        registered_at: raw
            .registered_at
            .and_then(|registered| registered_in(registered, location)),
        arrival: arrival.map(|t| t.fixed_offset()),
        triage: stage(&raw.triage_time)?,
        to_room: stage(&raw.to_room_time)?,
        seen_by_physician: stage(&raw.seen_by_physician_time)?,
        physician_done: stage(&raw.physician_done_time)?,
        ready_for_admission: stage(&raw.ready_for_admission_time)?,
        departure: stage(&raw.departure_time)?,
        end: stage(&raw.end_time)?,
        mutation_end: stage(&raw.mutation_end_time)?,
        mutation_status: raw.mutation_status.clone(),
        cancelled: raw.cancelled,
        complaint: raw.complaint.clone(),
        urgency: raw.urgency.clone(),
        specialty: raw.specialty.clone(),
        origin: raw.origin.clone(),
        transporter: raw.transporter.clone(),
        discharge_destination: raw.discharge_destination.clone(),
        admission_department: raw.admission_department.clone(),
        admission_specialty: raw.admission_specialty.clone(),
    })
}

/// Transforms a batch of visitors, preserving order
///
/// Stops at the first record that fails.
pub fn transform_visitors(raws: &[RawVisitor], location: Tz) -> Result<Vec<Visitor>> {
    raws.iter()
        .map(|raw| transform_visitor(raw, location))
        .collect()
}

/// Minute-precision registration instant, or `None` if the wall clock does
/// not exist in `location`
fn registered_in(registered: NaiveDateTime, location: Tz) -> Option<Timestamp> {
    let minute = registered.with_second(0)?.with_nanosecond(0)?;
    match localize(minute, location) {
        Ok(t) => Some(t.fixed_offset()),
        Err(e) => {
            tracing::debug!(error = %e, "Dropping unplaceable registration time");
            None
        }
    }
}

/// Whole years between `birth_date` and the local arrival date, in decades
fn age_in_decades(arrival: &DateTime<Tz>, birth_date: NaiveDateTime) -> i32 {
    let mut years = arrival.year() - birth_date.year();
    if arrival.ordinal() < birth_date.ordinal() {
        years -= 1;
    }
    years.div_euclid(10)
}
