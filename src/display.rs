//! Display Formatting
//!
//! Text shown next to ratings. Rounding happens here and nowhere else.

use crate::models::RatingValue;

/// Format an average to one decimal place
pub fn format_rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// Five star slots, the first `filled` of them lit
pub fn star_row(filled: u8) -> [bool; 5] {
    std::array::from_fn(|i| (i as u8) < filled)
}

/// Number of lit stars for a backend average (rounded down, capped at 5)
pub fn full_stars(average: f64) -> u8 {
    if average.is_nan() || average <= 0.0 {
        0
    } else {
        average.floor().min(5.0) as u8
    }
}

/// "1 review" or "<n> reviews"
pub fn review_label(count: u64) -> String {
    if count == 1 {
        "1 review".to_string()
    } else {
        format!("{} reviews", count)
    }
}

/// Caption under the star picker
pub fn rating_caption(rating: Option<RatingValue>) -> &'static str {
    match rating.map(RatingValue::get) {
        None => "Click on stars to rate",
        Some(1) => "Poor",
        Some(2) => "Fair",
        Some(3) => "Good",
        Some(4) => "Very Good",
        _ => "Excellent",
    }
}

/// "n/5"
pub fn out_of_five(rating: RatingValue) -> String {
    format!("{}/5", rating)
}
