//! Number formatting shared by the view models.

pub fn currency_symbol(currency: &str) -> String {
    match currency.to_lowercase().as_str() {
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "jpy" => "¥".to_string(),
        other => format!("{} ", other.to_uppercase()),
    }
}

/// Inserts `,` every three digits of the integer part.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Prices keep more decimals the smaller they get.
pub fn format_price(value: f64, currency: &str) -> String {
    let decimals = match value.abs() {
        v if v >= 1.0 => 2,
        v if v >= 0.01 => 4,
        _ => 8,
    };
    format!("{}{}", currency_symbol(currency), group_thousands(value, decimals))
}

/// Large amounts as `$1.23T`, `$45.60B`, `$7.89M`
pub fn format_compact(value: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{}{:.2}T", symbol, value / 1e12)
    } else if abs >= 1e9 {
        format!("{}{:.2}B", symbol, value / 1e9)
    } else if abs >= 1e6 {
        format!("{}{:.2}M", symbol, value / 1e6)
    } else {
        format!("{}{}", symbol, group_thousands(value, 0))
    }
}

pub fn format_change(change_percent: Option<f64>) -> String {
    match change_percent {
        Some(pct) if pct > 0.0 => format!("+{:.2}%", pct),
        Some(pct) => format!("{:.2}%", pct),
        None => "N/A".to_string(),
    }
}

pub fn format_count(value: u64) -> String {
    group_thousands(value as f64, 0)
}
