//! Semester-count derivation for the academic section.

/// Semesters in a complete degree.
pub const FULL_DEGREE_SEMESTERS: usize = 8;

/// Fewest semester fields ever shown.
pub const MIN_SEMESTERS: usize = 2;

const SEMESTERS_PER_YEAR: i64 = 2;

/// Number of semester score fields for an expected passout year.
///
/// A year that does not parse, or that is not in the future relative to
/// `current_year`, means the degree is complete and every semester is shown.
pub fn derive_semester_count(year_text: &str, current_year: i32) -> usize {
    let Ok(passout) = year_text.trim().parse::<i64>() else {
        return FULL_DEGREE_SEMESTERS;
    };
    let years_remaining = match passout.checked_sub(i64::from(current_year)) {
        Some(years) if years > 0 => years,
        _ => return FULL_DEGREE_SEMESTERS,
    };
    let remaining = (FULL_DEGREE_SEMESTERS as i64)
        .saturating_sub(years_remaining.saturating_mul(SEMESTERS_PER_YEAR));
    remaining.max(MIN_SEMESTERS as i64) as usize
}

/// Resizes `scores` to `count`, keeping leading entries in place.
pub fn resize_scores(scores: &mut Vec<String>, count: usize) {
    scores.resize(count, String::new());
}

/// Ordinal payload label for a zero-based semester index (`sem1`, `sem2`, ...).
pub fn semester_label(index: usize) -> String {
    format!("sem{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_year_counts_as_complete() {
        assert_eq!(derive_semester_count("2025", 2025), 8);
    }

    #[test]
    fn two_years_remaining_leaves_four_semesters() {
        assert_eq!(derive_semester_count("2027", 2025), 4);
    }

    #[test]
    fn unparseable_or_empty_text_counts_as_complete() {
        assert_eq!(derive_semester_count("abc", 2025), 8);
        assert_eq!(derive_semester_count("", 2025), 8);
        assert_eq!(derive_semester_count("20 27", 2025), 8);
    }

    #[test]
    fn past_year_counts_as_complete() {
        assert_eq!(derive_semester_count("2019", 2025), 8);
    }

    #[test]
    fn future_years_follow_formula_and_clamp_at_two() {
        for current in [2000, 2025, 2040] {
            for ahead in 1..=12 {
                let expected = std::cmp::max(2, 8 - 2 * ahead) as usize;
                let year = (current + ahead).to_string();
                assert_eq!(derive_semester_count(&year, current), expected, "{year} vs {current}");
            }
        }
    }

    #[test]
    fn far_future_year_does_not_overflow() {
        assert_eq!(derive_semester_count("9223372036854775807", 2025), 2);
    }

    #[test]
    fn extreme_negative_year_counts_as_complete() {
        assert_eq!(derive_semester_count("-9223372036854775808", 2025), 8);
    }

    #[test]
    fn resize_preserves_entries_positionally() {
        let mut scores = vec!["8.0".to_string(), "8.5".to_string(), "9.0".to_string()];
        resize_scores(&mut scores, 5);
        assert_eq!(scores, vec!["8.0", "8.5", "9.0", "", ""]);
        resize_scores(&mut scores, 2);
        assert_eq!(scores, vec!["8.0", "8.5"]);
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(semester_label(0), "sem1");
        assert_eq!(semester_label(7), "sem8");
    }
}
