use crate::models::OverlapWindow;
use chrono::NaiveDate;

/// Compute the inclusive overlap window of two date ranges
///
/// Both endpoints count: trips sharing a single day overlap by 1 day.
/// Returns None when the ranges are disjoint.
#[inline]
pub fn date_overlap(
    start1: NaiveDate,
    end1: NaiveDate,
    start2: NaiveDate,
    end2: NaiveDate,
) -> Option<OverlapWindow> {
    let start = start1.max(start2);
    let end = end1.min(end2);

    if start > end {
        return None;
    }

    Some(OverlapWindow {
        start,
        end,
        days: (end - start).num_days() + 1,
    })
}

/// Cheap intersection test for two inclusive date ranges
#[inline]
pub fn dates_intersect(
    start1: NaiveDate,
    end1: NaiveDate,
    start2: NaiveDate,
    end2: NaiveDate,
) -> bool {
    start1 <= end2 && start2 <= end1
}

/// Ratio of the overlap of two grade-score intervals to their average width
///
/// Returns 0.0 for disjoint intervals and guards the divide against
/// zero-width or inverted ranges so dirty profile data cannot produce a
/// NaN or a ratio outside [0, 1].
#[inline]
pub fn grade_overlap_ratio(min1: i32, max1: i32, min2: i32, max2: i32) -> f64 {
    let overlap_start = min1.max(min2);
    let overlap_end = max1.min(max2);

    if overlap_start > overlap_end {
        return 0.0;
    }

    let overlap_range = (overlap_end - overlap_start) as f64;
    let avg_range = ((max1 - min1) + (max2 - min2)) as f64 / 2.0;

    if avg_range <= 0.0 {
        return 0.0;
    }

    (overlap_range / avg_range).clamp(0.0, 1.0)
}
