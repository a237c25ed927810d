use crate::cli::output::current_preferences;

const BAR_WIDTH: usize = 24;

/// Formats `amount` as `<symbol>1,234.56`, with a leading minus for negatives.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let body = format!("{}{}.{}", symbol, group_digits(whole, ','), fraction);
    if amount < 0.0 && rounded != "0.00" {
        format!("-{}", body)
    } else {
        body
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Horizontal bar proportional to `value / max`, used in place of charts.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    let ch = if current_preferences().plain_mode {
        '#'
    } else {
        '█'
    };
    ch.to_string().repeat(cells.min(BAR_WIDTH))
}

pub struct Formatter;

impl Formatter {
    pub fn new() -> Self {
        Self
    }

    pub fn two_column(&self, entries: &[(&str, String)]) -> String {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|(label, value)| format!("  {:<width$}  {}", label, value, width = label_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        if entries.is_empty() {
            return;
        }
        println!("{}", self.two_column(entries));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}
