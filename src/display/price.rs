const RUPEE: &str = "₹";

const CRORE: i64 = 10_000_000;
const LAKH: i64 = 100_000;

/// Canonical price rendering: Crore/Lakh units with up to two decimals
/// (trailing zeros trimmed), plain grouped rupees below one lakh.
///
/// Every surface that shows a price goes through this function or its
/// compact sibling, so the same amount never renders two ways.
pub fn format_price(price: i64) -> String {
    if price >= CRORE {
        format!("{}{} Crore", RUPEE, scaled(price, CRORE, 2))
    } else if price >= LAKH {
        format!("{}{} Lakh", RUPEE, scaled(price, LAKH, 2))
    } else {
        format!("{}{}", RUPEE, group_inr(price))
    }
}

/// Card variant: one decimal, `Cr`/`L` suffixes, same thresholds.
pub fn format_price_compact(price: i64) -> String {
    if price >= CRORE {
        format!("{}{}Cr", RUPEE, scaled(price, CRORE, 1))
    } else if price >= LAKH {
        format!("{}{}L", RUPEE, scaled(price, LAKH, 1))
    } else {
        format!("{}{}", RUPEE, group_inr(price))
    }
}

/// Indian-system digit grouping for a non-negative amount: the last three
/// digits, then pairs (`1234567` becomes `12,34,567`).
pub fn group_inr(value: i64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut index = head_chars.len();
    while index > 0 {
        let start = index.saturating_sub(2);
        groups.push(head_chars[start..index].iter().collect());
        index = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Area rendering for cards and overview rows.
pub fn format_area(area_sqft: f64) -> String {
    format!("{} sqft", group_inr(area_sqft.round() as i64))
}

fn scaled(price: i64, unit: i64, decimals: usize) -> String {
    let value = price as f64 / unit as f64;
    let rendered = format!("{:.*}", decimals, value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
