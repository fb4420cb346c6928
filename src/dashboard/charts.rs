//! Static datasets behind the two dashboard charts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Doughnut,
}

pub struct ChartSeries {
    pub label: &'static str,
    pub value: u32,
    /// Hex colour used by the renderer, if the series has its own.
    pub color: Option<&'static str>,
}

impl ChartSeries {
    /// The series colour mapped onto the xterm 6x6x6 colour cube.
    pub fn color256(&self) -> Option<u8> {
        let hex = self.color?.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| -> Option<u8> {
            let v = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
            Some((v as f64 * 5.0 / 255.0).round() as u8)
        };
        Some(16 + 36 * channel(0)? + 6 * channel(2)? + channel(4)?)
    }
}

pub struct Chart {
    pub title: &'static str,
    pub kind: ChartKind,
    pub series: &'static [ChartSeries],
}

impl Chart {
    pub fn max_value(&self) -> u32 {
        self.series.iter().map(|s| s.value).max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.series.iter().map(|s| s.value).sum()
    }

    /// Share of the total for one series, in percent.
    pub fn share(&self, value: u32) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        value as f64 * 100.0 / total as f64
    }
}

pub static VULNERABILITY_TRENDS: Chart = Chart {
    title: "Vulnerabilities Found",
    kind: ChartKind::Line,
    series: &[
        ChartSeries { label: "Jan", value: 146, color: None },
        ChartSeries { label: "Feb", value: 161, color: None },
        ChartSeries { label: "Mar", value: 122, color: None },
        ChartSeries { label: "Apr", value: 181, color: None },
        ChartSeries { label: "May", value: 224, color: None },
        ChartSeries { label: "Jun", value: 195, color: None },
    ],
};

pub static RISK_DISTRIBUTION: Chart = Chart {
    title: "Risk Distribution",
    kind: ChartKind::Doughnut,
    series: &[
        ChartSeries { label: "Critical", value: 23, color: Some("#e74c3c") },
        ChartSeries { label: "High", value: 67, color: Some("#f39c12") },
        ChartSeries { label: "Medium", value: 134, color: Some("#f1c40f") },
        ChartSeries { label: "Low", value: 89, color: Some("#27ae60") },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_peak() {
        assert_eq!(VULNERABILITY_TRENDS.max_value(), 224);
        assert_eq!(VULNERABILITY_TRENDS.series.len(), 6);
    }

    #[test]
    fn test_series_colour_maps_to_cube() {
        let critical = &RISK_DISTRIBUTION.series[0];
        assert_eq!(critical.color256(), Some(203));
        assert_eq!(RISK_DISTRIBUTION.series[3].color256(), Some(72));
        assert_eq!(VULNERABILITY_TRENDS.series[0].color256(), None);

        let broken = ChartSeries { label: "x", value: 1, color: Some("#zz0000") };
        assert_eq!(broken.color256(), None);
    }

    #[test]
    fn test_risk_shares_sum_to_hundred() {
        assert_eq!(RISK_DISTRIBUTION.total(), 313);
        let sum: f64 = RISK_DISTRIBUTION
            .series
            .iter()
            .map(|s| RISK_DISTRIBUTION.share(s.value))
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }
}
