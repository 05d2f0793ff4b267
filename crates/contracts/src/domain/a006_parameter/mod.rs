use serde::{Deserialize, Serialize};
use std::fmt;

pub const EXPORT_PRICE_RATIO: &str = "export_price_ratio";
pub const MAX_AGENT_PER_DISTRICT: &str = "max_agent_per_district";

/// Tham số hệ thống: a named key/value configuration entry stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(alias = "param_key")]
    pub param_key: String,

    #[serde(default, alias = "param_value")]
    pub param_value: String,

    #[serde(default, alias = "param_description")]
    pub param_description: Option<String>,
}

impl Parameter {
    /// Vietnamese label for known keys, the raw key otherwise
    pub fn label(&self) -> &str {
        match self.param_key.as_str() {
            MAX_AGENT_PER_DISTRICT => "Số lượng đại lý tối đa",
            EXPORT_PRICE_RATIO => "Tỷ lệ giá xuất",
            other => other,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.param_value.trim().parse().ok()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.param_value.trim().parse().ok()
    }

    /// Value as shown in the list: the ratio with two decimals
    pub fn display_value(&self) -> String {
        match (self.param_key.as_str(), self.as_f64()) {
            (EXPORT_PRICE_RATIO, Some(ratio)) => format!("{:.2}", ratio),
            _ => self.param_value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    KeyMissing,
    ValueMissing,
    MaxAgentsInvalid,
    RatioInvalid,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParameterError::KeyMissing => "Tên tham số không được để trống",
            ParameterError::ValueMissing => "Giá trị tham số không được để trống",
            ParameterError::MaxAgentsInvalid => "Nhập tham số hợp lý.",
            ParameterError::RatioInvalid => "Tỷ lệ giá xuất phải là số dương",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ParameterError {}

/// Checks a value before it is sent; known keys have typed rules
pub fn validate_parameter(param_key: &str, param_value: &str) -> Result<(), ParameterError> {
    if param_key.trim().is_empty() {
        return Err(ParameterError::KeyMissing);
    }
    let value = param_value.trim();
    match param_key {
        MAX_AGENT_PER_DISTRICT => match value.parse::<i64>() {
            Ok(max) if max >= 1 => Ok(()),
            _ => Err(ParameterError::MaxAgentsInvalid),
        },
        EXPORT_PRICE_RATIO => match value.parse::<f64>() {
            Ok(ratio) if ratio > 0.0 && ratio.is_finite() => Ok(()),
            _ => Err(ParameterError::RatioInvalid),
        },
        _ if value.is_empty() => Err(ParameterError::ValueMissing),
        _ => Ok(()),
    }
}

pub fn find<'a>(parameters: &'a [Parameter], param_key: &str) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.param_key == param_key)
}

pub fn export_price_ratio(parameters: &[Parameter]) -> Option<f64> {
    find(parameters, EXPORT_PRICE_RATIO).and_then(Parameter::as_f64)
}

pub fn max_agent_per_district(parameters: &[Parameter]) -> Option<i64> {
    find(parameters, MAX_AGENT_PER_DISTRICT).and_then(Parameter::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(key: &str, value: &str) -> Parameter {
        Parameter {
            param_key: key.into(),
            param_value: value.into(),
            param_description: None,
        }
    }

    #[test]
    fn test_typed_accessors() {
        let params = vec![param(EXPORT_PRICE_RATIO, "1.02"), param(MAX_AGENT_PER_DISTRICT, " 4 ")];
        assert_eq!(export_price_ratio(&params), Some(1.02));
        assert_eq!(max_agent_per_district(&params), Some(4));
        assert_eq!(export_price_ratio(&[]), None);
        assert_eq!(params[0].display_value(), "1.02");
        assert_eq!(param(EXPORT_PRICE_RATIO, "1.5").display_value(), "1.50");
    }

    #[test]
    fn test_validation_rules() {
        assert_eq!(validate_parameter(MAX_AGENT_PER_DISTRICT, "0"), Err(ParameterError::MaxAgentsInvalid));
        assert_eq!(validate_parameter(MAX_AGENT_PER_DISTRICT, "abc"), Err(ParameterError::MaxAgentsInvalid));
        assert!(validate_parameter(MAX_AGENT_PER_DISTRICT, "3").is_ok());
        assert_eq!(validate_parameter(EXPORT_PRICE_RATIO, "-1"), Err(ParameterError::RatioInvalid));
        assert!(validate_parameter(EXPORT_PRICE_RATIO, "1.1").is_ok());
        assert_eq!(validate_parameter("note", "  "), Err(ParameterError::ValueMissing));
        assert_eq!(validate_parameter("", "x"), Err(ParameterError::KeyMissing));
    }

    #[test]
    fn test_snake_case_payload() {
        let p: Parameter = serde_json::from_str(
            r#"{"param_key":"export_price_ratio","param_value":"1.02","param_description":"Tỷ lệ"}"#,
        )
        .unwrap();
        assert_eq!(p.label(), "Tỷ lệ giá xuất");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["paramKey"], "export_price_ratio");
    }
}
