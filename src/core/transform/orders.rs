//! Order transformation
//!
//! Orders carry full timestamps already; they only need to be placed in the
//! hospital's time zone.

use crate::core::time::localize;
use crate::domain::{
    ConsultOrder, LabOrder, RadiologyOrder, RawConsultOrder, RawLabOrder, RawRadiologyOrder,
    Result, Timestamp,
};
use chrono::NaiveDateTime;
use chrono_tz::Tz;

fn place(wall_clock: Option<NaiveDateTime>, location: Tz) -> Result<Option<Timestamp>> {
    match wall_clock {
        Some(naive) => Ok(Some(localize(naive, location)?.fixed_offset())),
        None => Ok(None),
    }
}

pub fn transform_radiology_order(raw: &RawRadiologyOrder, location: Tz) -> Result<RadiologyOrder> {
    Ok(RadiologyOrder {
        visit_number: raw.visit_number,
        order_number: raw.order_number,
        status: raw.status.clone(),
        start: place(raw.start, location)?,
        end: place(raw.end, location)?,
        module: raw.module.clone(),
    })
}

pub fn transform_lab_order(raw: &RawLabOrder, location: Tz) -> Result<LabOrder> {
    Ok(LabOrder {
        visit_number: raw.visit_number,
        order_number: raw.order_number,
        status: raw.status.clone(),
        start: place(raw.start, location)?,
        end: place(raw.end, location)?,
    })
}

pub fn transform_consult_order(raw: &RawConsultOrder, location: Tz) -> Result<ConsultOrder> {
    Ok(ConsultOrder {
        visit_number: raw.visit_number,
        order_number: raw.order_number,
        status: raw.status.clone(),
        start: place(raw.start, location)?,
        end: place(raw.end, location)?,
        specialty: raw.specialty.clone(),
    })
}

/// Transforms a batch of radiology orders, preserving order
pub fn transform_radiology_orders(
    raws: &[RawRadiologyOrder],
    location: Tz,
) -> Result<Vec<RadiologyOrder>> {
    raws.iter()
        .map(|raw| transform_radiology_order(raw, location))
        .collect()
}

/// Transforms a batch of lab orders, preserving order
pub fn transform_lab_orders(raws: &[RawLabOrder], location: Tz) -> Result<Vec<LabOrder>> {
    raws.iter()
        .map(|raw| transform_lab_order(raw, location))
        .collect()
}

/// Transforms a batch of consult orders, preserving order
pub fn transform_consult_orders(
    raws: &[RawConsultOrder],
    location: Tz,
) -> Result<Vec<ConsultOrder>> {
    raws.iter()
        .map(|raw| transform_consult_order(raw, location))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdflowError, FormatError};
    use chrono::NaiveDate;
    use chrono_tz::Europe::Amsterdam;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_radiology_order() {
        let raw = RawRadiologyOrder {
            visit_number: 12,
            order_number: 345,
            status: "afgerond".to_string(),
            start: Some(naive(2017, 1, 1, 0, 40)),
            end: None,
            module: "CT".to_string(),
        };

        let order = transform_radiology_order(&raw, Amsterdam).unwrap();

        assert_eq!(order.visit_number, 12);
        assert_eq!(order.order_number, 345);
        assert_eq!(order.status, "afgerond");
        assert_eq!(order.start.unwrap().to_rfc3339(), "2017-01-01T00:40:00+01:00");
        assert_eq!(order.end, None);
        assert_eq!(order.module, "CT");
    }

    #[test]
    fn test_consult_order_keeps_specialty() {
        let raw = RawConsultOrder {
            visit_number: 1,
            order_number: 2,
            specialty: "CAR".to_string(),
            end: Some(naive(2017, 7, 1, 13, 5)),
            ..Default::default()
        };

        let order = transform_consult_order(&raw, Amsterdam).unwrap();

        assert_eq!(order.specialty, "CAR");
        assert_eq!(order.end.unwrap().to_rfc3339(), "2017-07-01T13:05:00+02:00");
    }

    #[test]
    fn test_lab_order_in_daylight_saving_gap_fails() {
        let raw = RawLabOrder {
            start: Some(naive(2017, 3, 26, 2, 15)),
            ..Default::default()
        };

        let result = transform_lab_order(&raw, Amsterdam);

        assert!(matches!(
            result,
            Err(EdflowError::Format(FormatError::NonexistentLocalTime(_)))
        ));
    }

    #[test]
    fn test_batch_keeps_order() {
        let raws: Vec<RawLabOrder> = [5, 3, 9]
            .into_iter()
            .map(|n| RawLabOrder {
                order_number: n,
                ..Default::default()
            })
            .collect();

        let orders = transform_lab_orders(&raws, Amsterdam).unwrap();

        let numbers: Vec<i64> = orders.iter().map(|o| o.order_number).collect();
        assert_eq!(numbers, vec![5, 3, 9]);
    }
}
