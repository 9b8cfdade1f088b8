//! Statistics derived from a restaurant's reviews and a customer's visits.
//!
//! Every function here is total: an empty input yields `0` or `None`
//! instead of an error, so callers never branch on failure.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::entities::PricingCategory;

/// Blended outcome for specific two-way ties, checked in order.
const TIE_RULES: [([PricingCategory; 2], PricingCategory); 3] = [
    (
        [PricingCategory::Cheap, PricingCategory::High],
        PricingCategory::Moderate,
    ),
    (
        [PricingCategory::Cheap, PricingCategory::Overpriced],
        PricingCategory::Moderate,
    ),
    (
        [PricingCategory::Moderate, PricingCategory::Overpriced],
        PricingCategory::High,
    ),
];

/// Arithmetic mean of the ratings, `0.0` when there are none.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    sum as f64 / ratings.len() as f64
}

/// Representative pricing category of a set of reviews.
///
/// Returns the most frequent category. A tie for first place is resolved by
/// [`TIE_RULES`] when the tied set contains one of the listed pairs;
/// otherwise the tied categories are joined with `" - "`, ordered by count
/// (descending) and then by name. `None` when there are no reviews.
pub fn pricing_category_evaluation(pricings: &[PricingCategory]) -> Option<String> {
    if pricings.is_empty() {
        return None;
    }

    let mut counts: HashMap<PricingCategory, usize> = HashMap::new();
    for pricing in pricings {
        *counts.entry(*pricing).or_insert(0) += 1;
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let mut tied: Vec<PricingCategory> = counts
        .iter()
        .filter(|&(_, &count)| count == max)
        .map(|(&pricing, _)| pricing)
        .collect();

    if let [single] = tied.as_slice() {
        return Some(single.to_string());
    }

    for (pair, result) in TIE_RULES {
        if pair.iter().all(|p| tied.contains(p)) {
            return Some(result.to_string());
        }
    }

    tied.sort_by(|a, b| {
        counts[b]
            .cmp(&counts[a])
            .then_with(|| a.as_str().cmp(b.as_str()))
    });
    Some(
        tied.iter()
            .map(PricingCategory::as_str)
            .collect::<Vec<_>>()
            .join(" - "),
    )
}

/// Sum of the spending amounts, `0` when there are none.
pub fn total_spending(spendings: &[Decimal]) -> Decimal {
    to_money(spendings.iter().sum())
}

/// Fixes an amount at two decimal places. SQLite hands back floats that lose the scale.
pub fn to_money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}
