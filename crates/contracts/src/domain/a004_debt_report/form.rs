use std::fmt;

use super::aggregate::DebtRecord;
use crate::domain::a001_agent::Agent;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Parses an amount typed by the user: everything except digits and `-` is
/// dropped ("1.500.000 ₫" → 1500000). Input without digits is zero; `None`
/// when the number does not fit in an `i64`.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Some(0);
    }

    let signed = if negative { format!("-{}", digits) } else { digits };
    signed.parse::<i64>().ok()
}

/// Money inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    FirstDebt,
    ArisenDebt,
    LastDebt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtFormError {
    MonthMissing,
    MonthOutOfRange,
    YearOutOfRange,
    AgentMissing,
    AgentUnknown,
    AmountInvalid(AmountField),
}

impl DebtFormError {
    /// Form field the error is shown under
    pub fn field(&self) -> &'static str {
        match self {
            DebtFormError::MonthMissing | DebtFormError::MonthOutOfRange => "month",
            DebtFormError::YearOutOfRange => "year",
            DebtFormError::AgentMissing | DebtFormError::AgentUnknown => "agent",
            DebtFormError::AmountInvalid(AmountField::FirstDebt) => "first_debt",
            DebtFormError::AmountInvalid(AmountField::ArisenDebt) => "arisen_debt",
            DebtFormError::AmountInvalid(AmountField::LastDebt) => "last_debt",
        }
    }
}

impl fmt::Display for DebtFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DebtFormError::MonthMissing => "Vui lòng chọn tháng",
            DebtFormError::MonthOutOfRange => "Tháng phải từ 1 đến 12",
            DebtFormError::YearOutOfRange => "Năm không hợp lệ",
            DebtFormError::AgentMissing => "Vui lòng chọn đại lý",
            DebtFormError::AgentUnknown => "Đại lý không tồn tại",
            DebtFormError::AmountInvalid(AmountField::LastDebt) => "Nợ cuối kỳ vượt quá giới hạn",
            DebtFormError::AmountInvalid(_) => "Số tiền quá lớn",
        };
        f.write_str(text)
    }
}

impl std::error::Error for DebtFormError {}

/// Create/edit form state for a debt report.
///
/// Both amounts are kept as typed; `last_debt` is never stored and always
/// derives from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtReportDraft {
    pub debt_report_id: Option<i32>,
    pub month: u32,
    pub year: i32,
    pub agent_id: Option<i32>,
    first_debt: String,
    arisen_debt: String,
}

impl DebtReportDraft {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            debt_report_id: None,
            month,
            year,
            agent_id: None,
            first_debt: String::new(),
            arisen_debt: String::new(),
        }
    }

    pub fn from_record(record: &DebtRecord) -> Self {
        Self {
            debt_report_id: record.debt_report_id,
            month: record.month,
            year: record.year,
            agent_id: Some(record.agent_id),
            first_debt: record.first_debt.to_string(),
            arisen_debt: record.arisen_debt.to_string(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.debt_report_id.is_some()
    }

    pub fn first_debt_text(&self) -> &str {
        &self.first_debt
    }

    pub fn arisen_debt_text(&self) -> &str {
        &self.arisen_debt
    }

    pub fn first_debt(&self) -> Result<i64, DebtFormError> {
        parse_amount(&self.first_debt).ok_or(DebtFormError::AmountInvalid(AmountField::FirstDebt))
    }

    pub fn arisen_debt(&self) -> Result<i64, DebtFormError> {
        parse_amount(&self.arisen_debt).ok_or(DebtFormError::AmountInvalid(AmountField::ArisenDebt))
    }

    /// `first_debt + arisen_debt`; the first failing input otherwise
    pub fn last_debt(&self) -> Result<i64, DebtFormError> {
        self.first_debt()?
            .checked_add(self.arisen_debt()?)
            .ok_or(DebtFormError::AmountInvalid(AmountField::LastDebt))
    }

    pub fn set_first_debt(&mut self, raw: &str) {
        self.first_debt = raw.to_string();
    }

    pub fn set_arisen_debt(&mut self, raw: &str) {
        self.arisen_debt = raw.to_string();
    }

    /// Checks every field and resolves the agent name from `agents`.
    /// All failures are returned so each field can show its own message.
    pub fn validate(&self, agents: &[Agent]) -> Result<DebtRecord, Vec<DebtFormError>> {
        let mut errors = Vec::new();

        if self.month == 0 {
            errors.push(DebtFormError::MonthMissing);
        } else if self.month > 12 {
            errors.push(DebtFormError::MonthOutOfRange);
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            errors.push(DebtFormError::YearOutOfRange);
        }

        let agent = match self.agent_id {
            None => {
                errors.push(DebtFormError::AgentMissing);
                None
            }
            Some(id) => {
                let found = agents.iter().find(|a| a.agent_id == id);
                if found.is_none() {
                    errors.push(DebtFormError::AgentUnknown);
                }
                found
            }
        };

        let first_debt = self.first_debt();
        let arisen_debt = self.arisen_debt();
        for amount in [&first_debt, &arisen_debt] {
            if let Err(e) = amount {
                errors.push(e.clone());
            }
        }
        let last_debt = match (first_debt, arisen_debt) {
            (Ok(first), Ok(arisen)) => {
                let sum = first.checked_add(arisen);
                if sum.is_none() {
                    errors.push(DebtFormError::AmountInvalid(AmountField::LastDebt));
                }
                sum.map(|last| (first, arisen, last))
            }
            _ => None,
        };

        match (agent, last_debt) {
            (Some(agent), Some((first_debt, arisen_debt, last_debt))) if errors.is_empty() => {
                Ok(DebtRecord {
                    debt_report_id: self.debt_report_id,
                    agent_id: agent.agent_id,
                    agent_name: agent.agent_name.clone(),
                    month: self.month,
                    year: self.year,
                    first_debt,
                    arisen_debt,
                    last_debt,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents() -> Vec<Agent> {
        vec![Agent {
            agent_id: 3,
            agent_name: "Đại lý Sao Mai".into(),
            phone: None,
            email: None,
            address: None,
            debt_money: 0,
        }]
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.500.000"), Some(1_500_000));
        assert_eq!(parse_amount("-2.000 ₫"), Some(-2_000));
        assert_eq!(parse_amount("abc"), Some(0));
        assert_eq!(parse_amount(""), Some(0));
        assert_eq!(parse_amount("-"), Some(0));
        assert_eq!(parse_amount("12-3"), Some(12));
        assert_eq!(parse_amount("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_amount("9223372036854775808"), None);
    }

    #[test]
    fn test_last_debt_follows_inputs() {
        let mut draft = DebtReportDraft::new(5, 2024);
        draft.set_first_debt("1.000");
        assert_eq!(draft.last_debt(), Ok(1_000));
        draft.set_arisen_debt("-250");
        assert_eq!(draft.last_debt(), Ok(750));
        draft.set_first_debt("");
        assert_eq!(draft.last_debt(), Ok(-250));
        assert_eq!(draft.first_debt_text(), "");
        assert_eq!(draft.arisen_debt_text(), "-250");
    }

    #[test]
    fn test_oversized_amounts_are_errors() {
        let mut draft = DebtReportDraft::new(5, 2024);
        draft.agent_id = Some(3);
        draft.set_first_debt("9223372036854775807");
        draft.set_arisen_debt("1");
        assert_eq!(
            draft.last_debt(),
            Err(DebtFormError::AmountInvalid(AmountField::LastDebt))
        );
        let errors = draft.validate(&agents()).unwrap_err();
        assert_eq!(errors, vec![DebtFormError::AmountInvalid(AmountField::LastDebt)]);
        assert_eq!(errors[0].field(), "last_debt");

        draft.set_first_debt("99999999999999999999");
        assert_eq!(
            draft.last_debt(),
            Err(DebtFormError::AmountInvalid(AmountField::FirstDebt))
        );
        assert_eq!(
            draft.validate(&agents()).unwrap_err(),
            vec![DebtFormError::AmountInvalid(AmountField::FirstDebt)]
        );
        assert_eq!(draft.first_debt_text(), "99999999999999999999");
    }

    #[test]
    fn test_validate_success() {
        let mut draft = DebtReportDraft::new(5, 2024);
        draft.agent_id = Some(3);
        draft.set_first_debt("100");
        draft.set_arisen_debt("50");
        let record = draft.validate(&agents()).unwrap();
        assert_eq!(record.agent_name, "Đại lý Sao Mai");
        assert_eq!(record.last_debt, 150);
        assert!(record.is_balanced());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let draft = DebtReportDraft::new(13, 1999);
        let errors = draft.validate(&agents()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                DebtFormError::MonthOutOfRange,
                DebtFormError::YearOutOfRange,
                DebtFormError::AgentMissing
            ]
        );
        assert_eq!(errors[0].to_string(), "Tháng phải từ 1 đến 12");
    }

    #[test]
    fn test_unknown_agent() {
        let mut draft = DebtReportDraft::new(1, 2024);
        draft.agent_id = Some(99);
        assert_eq!(
            draft.validate(&agents()).unwrap_err(),
            vec![DebtFormError::AgentUnknown]
        );
    }

    #[test]
    fn test_edit_keeps_id() {
        let mut draft = DebtReportDraft::new(2, 2024);
        draft.agent_id = Some(3);
        draft.debt_report_id = Some(41);
        draft.set_arisen_debt("7.000");
        let record = draft.validate(&agents()).unwrap();
        let again = DebtReportDraft::from_record(&record);
        assert!(again.is_editing());
        assert_eq!(again.arisen_debt_text(), "7000");
        assert_eq!(again.validate(&agents()).unwrap(), record);
    }
}
