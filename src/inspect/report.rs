//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// The result of inspecting a raw sequence array.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Number of sequences (records the adapter would yield).
    pub num_sequences: usize,
    /// Raw (time, sequence, height, width) dimensions.
    pub raw_shape: [usize; 4],
    /// Per-record (time, height, width, channels) dimensions.
    pub record_shape: [usize; 4],
    pub pixels: PixelStats,
    pub histogram: Vec<IntensityBucket>,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Pixel value statistics over the whole array.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PixelStats {
    pub count: usize,
    pub min: Option<u8>,
    pub max: Option<u8>,
    pub mean: Option<f64>,
}

/// Pixels whose value falls in `low..=high`.
#[derive(Clone, Debug, Serialize)]
pub struct IntensityBucket {
    pub low: u8,
    pub high: u8,
    pub count: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "┌─ Summary ─────────────────────────────────────────────────┐")?;
        writeln!(f, "│   Sequences:     {:>12}", group_thousands(self.num_sequences))?;
        writeln!(f, "│   Raw shape:     {:>12}", fmt_shape(&self.raw_shape))?;
        writeln!(f, "│   Record shape:  {:>12}", fmt_shape(&self.record_shape))?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;
        writeln!(f)?;

        let p = &self.pixels;
        writeln!(f, "┌─ Pixels ──────────────────────────────────────────────────┐")?;
        writeln!(f, "│   Count:         {:>12}", group_thousands(p.count))?;
        writeln!(f, "│   Min:           {:>12}", fmt_opt(p.min))?;
        writeln!(f, "│   Max:           {:>12}", fmt_opt(p.max))?;
        writeln!(
            f,
            "│   Mean:          {:>12}",
            p.mean
                .map(|mean| format!("{mean:.2}"))
                .unwrap_or_else(|| "n/a".to_string())
        )?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;
        writeln!(f)?;

        writeln!(f, "┌─ Intensity ───────────────────────────────────────────────┐")?;
        let fullest = self.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        for bucket in &self.histogram {
            writeln!(
                f,
                "│   {:>3}-{:<3} {:>12} {:>6}  {}",
                bucket.low,
                bucket.high,
                group_thousands(bucket.count),
                bucket_share(bucket.count, p.count),
                intensity_bar(bucket.count, fullest, self.bar_width)
            )?;
        }
        writeln!(f, "└───────────────────────────────────────────────────────────┘")
    }
}

fn fmt_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(usize::to_string).collect();
    format!("({})", dims.join(", "))
}

fn fmt_opt(value: Option<u8>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// `1234567` -> `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share of all pixels that fall in one bucket.
fn bucket_share(count: usize, total: usize) -> String {
    match total {
        0 => "n/a".to_string(),
        total => format!("{:.1}%", count as f64 * 100.0 / total as f64),
    }
}

/// Bar scaled so the fullest bucket spans `width` cells.
fn intensity_bar(count: usize, fullest: usize, width: usize) -> String {
    let filled = match fullest {
        0 => 0,
        fullest => (count * width / fullest).min(width),
    };
    (0..width).map(|cell| if cell < filled { '█' } else { '░' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(123_456), "123,456");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(81_920_000), "81,920,000");
    }

    #[test]
    fn test_fmt_shape() {
        assert_eq!(fmt_shape(&[20, 64, 64, 1]), "(20, 64, 64, 1)");
    }

    #[test]
    fn bar_is_scaled_to_fullest_bucket() {
        assert_eq!(intensity_bar(5, 10, 10), "█████░░░░░");
        assert_eq!(intensity_bar(10, 10, 4), "████");
        assert_eq!(intensity_bar(0, 0, 3), "░░░");
    }

    #[test]
    fn share_of_empty_array_is_na() {
        assert_eq!(bucket_share(1, 4), "25.0%");
        assert_eq!(bucket_share(0, 0), "n/a");
    }

    #[test]
    fn display_includes_sections() {
        let report = InspectReport {
            num_sequences: 3,
            raw_shape: [20, 3, 64, 64],
            record_shape: [20, 64, 64, 1],
            pixels: PixelStats {
                count: 10,
                min: Some(0),
                max: Some(255),
                mean: Some(12.5),
            },
            histogram: vec![IntensityBucket {
                low: 0,
                high: 255,
                count: 10,
            }],
            bar_width: 10,
        };
        let text = report.to_string();
        assert!(text.contains("(20, 64, 64, 1)"));
        assert!(text.contains("12.50"));
        assert!(text.contains("100.0%"));
    }
}
