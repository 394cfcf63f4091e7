use serde::{Deserialize, Serialize};

/// Locale settings for facet counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatFormat {
    pub decimal_separator: String,
}

impl Default for StatFormat {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
        }
    }
}

const SCALES: [(u64, &str); 3] = [(1_000_000_000, "G"), (1_000_000, "M"), (1_000, "k")];

/// Display text for a facet count; unknown counts render as nothing.
pub fn format_stat(count: Option<u64>) -> Option<String> {
    format_stat_with(count, &StatFormat::default())
}

pub fn format_stat_with(count: Option<u64>, format: &StatFormat) -> Option<String> {
    count.map(|n| format_short_int(n, format))
}

/// Short integer form: `999`, `1.2k`, `12k`, `3.4M`...
///
/// Below ten units of a scale one truncated decimal is kept, dropped when it
/// is zero. Larger values show whole units.
pub fn format_short_int(n: u64, format: &StatFormat) -> String {
    for (scale, suffix) in SCALES {
        if n >= scale {
            let whole = n / scale;
            if whole >= 10 {
                return format!("{whole}{suffix}");
            }
            let tenth = (n % scale) * 10 / scale;
            return if tenth == 0 {
                format!("{whole}{suffix}")
            } else {
                format!("{whole}{}{tenth}{suffix}", format.decimal_separator)
            };
        }
    }
    n.to_string()
}
