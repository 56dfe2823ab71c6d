use once_cell::sync::OnceCell;
use regex::Regex;

fn relative_age_pattern() -> &'static Regex {
    static RE_AGE: OnceCell<Regex> = OnceCell::new();
    RE_AGE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(second|minute|hour|day|week|month|year)")
            .expect("relative age regex")
    })
}

fn unit_days(unit: &str) -> f64 {
    match unit {
        "second" => 1.0 / 86_400.0,
        "minute" => 1.0 / 1_440.0,
        "hour" => 1.0 / 24.0,
        "day" => 1.0,
        "week" => 7.0,
        "month" => 30.0,
        "year" => 365.0,
        _ => 0.0,
    }
}

pub fn parse_relative_age(text: &str) -> Option<f64> {
    let captures = relative_age_pattern().captures(text)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_lowercase();
    Some(amount * unit_days(&unit))
}
