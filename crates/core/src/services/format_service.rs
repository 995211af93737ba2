/// Placeholder shown in place of a balance when the user hides amounts.
const SECURE_PLACEHOLDER: &str = "••••";

/// Renders numeric amounts for display and parses free-form numeric text.
///
/// This is deliberately NOT locale-aware formatting: a fixed separator
/// scheme, base-10 positional, driven by the platform's shortest
/// float-to-string conversion. Financial amounts are expected to be
/// pre-rounded (see [`format_price`](FormatService::format_price), which
/// enforces the rounding).
pub struct FormatService;

impl FormatService {
    pub fn new() -> Self {
        Self
    }

    /// Format a number with configurable grouping and decimal separators.
    ///
    /// The integer part is grouped in 3-digit clusters from the right.
    /// When both separators are identical AND a fractional part exists,
    /// grouping is suppressed: `1234.56` with `"."` for both must render
    /// as `"1234.56"`, never the unparseable `"1.234.56"`.
    pub fn format_number(
        &self,
        value: f64,
        decimal_separator: &str,
        thousand_separator: &str,
    ) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }

        let sign = if value < 0.0 { "-" } else { "" };
        let text = value.abs().to_string();
        let (integer_part, fraction_part) = match text.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (text.as_str(), None),
        };

        let suppress_grouping =
            thousand_separator == decimal_separator && fraction_part.is_some();
        let grouped = if suppress_grouping {
            integer_part.to_string()
        } else {
            group_thousands(integer_part, thousand_separator)
        };

        match fraction_part {
            Some(frac) => format!("{sign}{grouped}{decimal_separator}{frac}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Round to at most `max_digits` fractional digits, strip trailing
    /// fractional zeros (`10.50` → `10.5`, `10.00` → `10`), group with
    /// `.` as both separators, and append the currency code.
    pub fn format_price(&self, value: f64, max_digits: usize, currency: &str) -> String {
        if !value.is_finite() {
            return format!("0 {currency}");
        }

        let fixed = format!("{value:.max_digits$}");
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };
        let rounded: f64 = trimmed.parse().unwrap_or(0.0);

        format!("{} {currency}", self.format_number(rounded, ".", "."))
    }

    /// Compact K/M/B rendering for dashboard tiles: magnitudes ≥ 1000 get
    /// a suffix letter at one fixed fractional digit, smaller values fall
    /// back to plain formatting.
    pub fn format_compact(&self, value: f64, currency: Option<&str>) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let abs = value.abs();

        let display = if abs >= 1_000_000_000.0 {
            format!("{:.1}B", value / 1_000_000_000.0)
        } else if abs >= 1_000_000.0 {
            format!("{:.1}M", value / 1_000_000.0)
        } else if abs >= 1_000.0 {
            format!("{:.1}K", value / 1_000.0)
        } else {
            self.format_number(value, ".", ".")
        };

        match currency {
            Some(code) => format!("{display} {code}"),
            None => display,
        }
    }

    /// Masked form used when balances are hidden.
    pub fn format_secure(&self) -> String {
        SECURE_PLACEHOLDER.to_string()
    }

    /// Best-effort parse of pasted/typed numeric text into a float.
    ///
    /// Tolerates mixed `.`/`,` usage: with a single separator type, a
    /// group of exactly 3 digits after the last occurrence is read as a
    /// thousands group (`"1.234"` → `1234`); with both types, the
    /// rightmost separator is the decimal point and the other is stripped
    /// as grouping. The 3-digit rule is a known-ambiguous heuristic, kept
    /// for compatibility — a genuinely decimal `"1.234"` parses as 1234.
    /// Unparseable input yields `0.0`, never an error.
    pub fn parse_amount(&self, text: &str) -> f64 {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return 0.0;
        }

        let negative = compact.starts_with('-');
        let unsigned: String = compact
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .collect();
        if unsigned.is_empty() {
            return 0.0;
        }

        let dots = unsigned.matches('.').count();
        let commas = unsigned.matches(',').count();

        let normalized = if dots > 0 && commas == 0 {
            normalize_single_separator(&unsigned, '.')
        } else if commas > 0 && dots == 0 {
            normalize_single_separator(&unsigned, ',')
        } else if dots > 0 && commas > 0 {
            normalize_mixed_separators(&unsigned)
        } else {
            unsigned.clone()
        };

        let parsed = normalized.parse::<f64>().unwrap_or(0.0);
        let signed = if negative { -parsed } else { parsed };
        if signed.is_finite() {
            signed
        } else {
            0.0
        }
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert `separator` every 3 digits from the right.
fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Normalize a string containing only one kind of separator.
fn normalize_single_separator(value: &str, separator: char) -> String {
    let parts: Vec<&str> = value.split(separator).collect();
    match parts.as_slice() {
        [only] => (*only).to_string(),
        [integer, fraction] => {
            // `1.000` / `1,000` reads as a thousand-grouped value.
            if fraction.len() == 3 && !integer.is_empty() {
                format!("{integer}{fraction}")
            } else {
                let integer = if integer.is_empty() { "0" } else { integer };
                format!("{integer}.{fraction}")
            }
        }
        // Three or more groups can only be thousands grouping.
        many => many.concat(),
    }
}

/// Both `.` and `,` present: the rightmost one is the decimal point,
/// everything else is grouping.
fn normalize_mixed_separators(value: &str) -> String {
    let decimal = if value.rfind('.') > value.rfind(',') {
        '.'
    } else {
        ','
    };
    let split = value.rfind(decimal).unwrap_or(value.len());
    let (integer_raw, fraction_raw) = value.split_at(split);

    let integer: String = integer_raw.chars().filter(char::is_ascii_digit).collect();
    let fraction: String = fraction_raw.chars().filter(char::is_ascii_digit).collect();

    let integer = if integer.is_empty() {
        "0".to_string()
    } else {
        integer
    };
    if fraction.is_empty() {
        integer
    } else {
        format!("{integer}.{fraction}")
    }
}
