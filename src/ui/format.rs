//! Text formats for the KPI metrics.

/// Shown in place of a KPI that is undefined for an empty selection.
pub const UNDEFINED: &str = "–";

/// `$1,234.50`
pub fn currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

pub fn optional_currency(amount: Option<f64>) -> String {
    amount.map_or_else(|| UNDEFINED.to_string(), currency)
}

/// `66.7%`
pub fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| UNDEFINED.to_string(), |r| format!("{r:.1}%"))
}

/// `12,345`
pub fn count(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
