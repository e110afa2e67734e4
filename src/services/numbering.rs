//! Human-readable proposal numbers.

use chrono::Datelike;
use rand::Rng;

/// Generate a display code of the form `PROP-<year>-<4-digit random>`.
///
/// The four digits are drawn uniformly from 0000..=9999, so this function on
/// its own offers no uniqueness guarantee (a 1-in-10000-per-year collision
/// space). The proposal service retries against the store at creation time;
/// see `ProposalService::create`.
pub fn generate_proposal_number() -> String {
    number_for_year(chrono::Local::now().year(), &mut rand::thread_rng())
}

fn number_for_year<R: Rng>(year: i32, rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(0..10_000);
    format!("PROP-{}-{:04}", year, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::mock::StepRng;
    use regex::Regex;

    #[test]
    fn number_matches_expected_pattern() {
        let pattern = Regex::new(r"^PROP-\d{4}-\d{4}$").unwrap();
        for _ in 0..50 {
            let number = generate_proposal_number();
            assert!(pattern.is_match(&number), "unexpected format: {number}");
        }
    }

    #[test]
    fn number_carries_the_current_year() {
        let year = chrono::Local::now().year().to_string();
        let number = generate_proposal_number();
        assert_eq!(number.split('-').nth(1), Some(year.as_str()));
    }

    #[test]
    fn small_suffixes_are_zero_padded() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(number_for_year(2025, &mut rng), "PROP-2025-0000");
    }
}
