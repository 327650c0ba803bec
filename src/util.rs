use crate::data::Metric;

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Grouped whole part, plus one decimal only when it is not zero.
pub fn format_decimal(value: f64) -> String {
    let value = value.max(0.0);
    let whole = value.trunc();
    let tenths = ((value - whole) * 10.0).round() as u64;
    match tenths {
        0 => format_count(whole as u64),
        10 => format_count(whole as u64 + 1),
        _ => format!("{}.{}", format_count(whole as u64), tenths),
    }
}

pub fn format_metric(metric: Metric, value: f64) -> String {
    let number = match metric {
        Metric::Population => format_count(value.max(0.0).round() as u64),
        Metric::LandArea => format_decimal(value),
    };
    match metric.unit() {
        Some(unit) => format!("{number} {unit}"),
        None => number,
    }
}

pub fn format_area(km2: f64) -> String {
    format_metric(Metric::LandArea, km2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(67_000_000), "67,000,000");
        assert_eq!(format_count(380_000), "380,000");
    }

    #[test]
    fn decimals_are_dropped_when_zero() {
        assert_eq!(format_decimal(0.44), "0.4");
        assert_eq!(format_decimal(2.02), "2");
        assert_eq!(format_decimal(1_999.97), "2,000");
    }

    #[test]
    fn formats_areas_with_unit() {
        assert_eq!(format_area(551_695.0), "551,695 km²");
        assert_eq!(format_area(0.44), "0.4 km²");
    }

    #[test]
    fn formats_by_metric() {
        assert_eq!(format_metric(Metric::Population, 38_000_000.0), "38,000,000");
        assert_eq!(format_metric(Metric::LandArea, 312_696.0), "312,696 km²");
    }
}
