//! Colour classification of debt amounts
use serde::{Deserialize, Serialize};

/// Sign of an amount as shown in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTone {
    /// Positive: still owed
    Owed,
    /// Negative: the agent is in credit
    Credit,
    Neutral,
}

impl AmountTone {
    pub fn of(amount: i64) -> Self {
        match amount.signum() {
            1 => AmountTone::Owed,
            -1 => AmountTone::Credit,
            _ => AmountTone::Neutral,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            AmountTone::Owed => "amount-owed",
            AmountTone::Credit => "amount-credit",
            AmountTone::Neutral => "amount-neutral",
        }
    }
}

/// Row band derived from a closing balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtBand {
    High,
    Medium,
    Low,
    Credit,
    Balanced,
}

impl DebtBand {
    pub const ALL: [DebtBand; 5] = [
        DebtBand::High,
        DebtBand::Medium,
        DebtBand::Low,
        DebtBand::Credit,
        DebtBand::Balanced,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            DebtBand::High => "debt-band-high",
            DebtBand::Medium => "debt-band-medium",
            DebtBand::Low => "debt-band-low",
            DebtBand::Credit => "debt-band-credit",
            DebtBand::Balanced => "debt-band-balanced",
        }
    }
}

/// Thresholds (VND) separating the positive bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtBands {
    pub high: i64,
    pub medium: i64,
}

impl Default for DebtBands {
    fn default() -> Self {
        Self {
            high: 50_000_000,
            medium: 10_000_000,
        }
    }
}

impl DebtBands {
    pub fn classify(&self, last_debt: i64) -> DebtBand {
        if last_debt > self.high {
            DebtBand::High
        } else if last_debt > self.medium {
            DebtBand::Medium
        } else if last_debt > 0 {
            DebtBand::Low
        } else if last_debt < 0 {
            DebtBand::Credit
        } else {
            DebtBand::Balanced
        }
    }

    /// Legend caption, e.g. "Nợ cao (> 50M)"
    pub fn legend(&self, band: DebtBand) -> String {
        match band {
            DebtBand::High => format!("Nợ cao (> {})", short_millions(self.high)),
            DebtBand::Medium => format!(
                "Nợ trung bình ({} - {})",
                short_millions(self.medium),
                short_millions(self.high)
            ),
            DebtBand::Low => format!("Nợ thấp (< {})", short_millions(self.medium)),
            DebtBand::Credit => "Dư có (< 0)".to_string(),
            DebtBand::Balanced => "Không nợ (= 0)".to_string(),
        }
    }
}

fn short_millions(amount: i64) -> String {
    if amount % 1_000_000 == 0 {
        format!("{}M", amount / 1_000_000)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_tone() {
        assert_eq!(AmountTone::of(1), AmountTone::Owed);
        assert_eq!(AmountTone::of(-1), AmountTone::Credit);
        assert_eq!(AmountTone::of(0), AmountTone::Neutral);
    }

    #[test]
    fn test_default_band_boundaries() {
        let bands = DebtBands::default();
        assert_eq!(bands.classify(50_000_001), DebtBand::High);
        assert_eq!(bands.classify(50_000_000), DebtBand::Medium);
        assert_eq!(bands.classify(10_000_001), DebtBand::Medium);
        assert_eq!(bands.classify(10_000_000), DebtBand::Low);
        assert_eq!(bands.classify(1), DebtBand::Low);
        assert_eq!(bands.classify(0), DebtBand::Balanced);
        assert_eq!(bands.classify(-1), DebtBand::Credit);
    }

    #[test]
    fn test_custom_thresholds() {
        let bands = DebtBands {
            high: 1_000,
            medium: 100,
        };
        assert_eq!(bands.classify(1_001), DebtBand::High);
        assert_eq!(bands.classify(101), DebtBand::Medium);
    }

    #[test]
    fn test_legend() {
        let bands = DebtBands::default();
        assert_eq!(bands.legend(DebtBand::High), "Nợ cao (> 50M)");
        assert_eq!(bands.legend(DebtBand::Medium), "Nợ trung bình (10M - 50M)");
        assert_eq!(bands.legend(DebtBand::Low), "Nợ thấp (< 10M)");
    }
}
