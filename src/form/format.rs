//! Number formatting for rendered results

/// Two decimals, e.g. `712.35`
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Thousands separators, two decimals and a trailing dollar sign,
/// e.g. `15000.5` -> `15,000.50$`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}$", sign, grouped, frac_part)
}
