//! Backend paths used by the console.
//!
//! Each endpoint keeps the parameter convention the backend exposes for it
//! (query string for debt reports and parameters, plain collection paths for
//! catalogues and receipts).

pub const DEBT_REPORTS: &str = "/api/debt-reports";
pub const PARAMETERS: &str = "/api/parameters";
pub const PRODUCTS: &str = "/api/products";
pub const AGENTS: &str = "/api/agents";
pub const IMPORT_RECEIPTS: &str = "/api/import-receipts";
pub const EXPORT_RECEIPTS: &str = "/api/export-receipts";

/// GET one agent's report for a period; DELETE uses the same address
pub fn debt_report(month: u32, year: i32, agent_id: i32) -> String {
    format!(
        "{}?month={}&year={}&agentId={}",
        DEBT_REPORTS, month, year, agent_id
    )
}

pub fn debt_reports_all() -> String {
    format!("{}/all", DEBT_REPORTS)
}

/// POST creates, PUT updates
pub fn debt_reports() -> String {
    DEBT_REPORTS.to_string()
}

pub fn summarize_debt_reports(month: u32, year: i32) -> String {
    format!("{}/summarize?month={}&year={}", DEBT_REPORTS, month, year)
}

pub fn parameters_all() -> String {
    format!("{}/all", PARAMETERS)
}

pub fn parameter_by_key(param_key: &str) -> String {
    format!(
        "{}?paramKey={}",
        PARAMETERS,
        urlencoding::encode(param_key)
    )
}

/// PUT updates, POST creates
pub fn parameters() -> String {
    PARAMETERS.to_string()
}

pub fn products() -> String {
    PRODUCTS.to_string()
}

pub fn agents() -> String {
    AGENTS.to_string()
}

pub fn import_receipts() -> String {
    IMPORT_RECEIPTS.to_string()
}

pub fn export_receipts() -> String {
    EXPORT_RECEIPTS.to_string()
}

/// One import receipt with its lines
pub fn import_receipt(receipt_id: i32) -> String {
    format!("{}/{}", IMPORT_RECEIPTS, receipt_id)
}

/// One export receipt with its lines
pub fn export_receipt(receipt_id: i32) -> String {
    format!("{}/{}", EXPORT_RECEIPTS, receipt_id)
}

/// Joins a configured origin and a path without doubling the slash
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_report_paths() {
        assert_eq!(
            debt_report(3, 2024, 17),
            "/api/debt-reports?month=3&year=2024&agentId=17"
        );
        assert_eq!(debt_reports_all(), "/api/debt-reports/all");
        assert_eq!(
            summarize_debt_reports(12, 2023),
            "/api/debt-reports/summarize?month=12&year=2023"
        );
    }

    #[test]
    fn test_parameter_paths() {
        assert_eq!(parameters_all(), "/api/parameters/all");
        assert_eq!(
            parameter_by_key("export_price_ratio"),
            "/api/parameters?paramKey=export_price_ratio"
        );
        assert_eq!(
            parameter_by_key("a b&c"),
            "/api/parameters?paramKey=a%20b%26c"
        );
    }

    #[test]
    fn test_receipt_paths() {
        assert_eq!(import_receipts(), "/api/import-receipts");
        assert_eq!(import_receipt(12), "/api/import-receipts/12");
        assert_eq!(export_receipt(7), "/api/export-receipts/7");
    }

    #[test]
    fn test_join() {
        assert_eq!(
            join("http://localhost:8080/", "/api/agents"),
            "http://localhost:8080/api/agents"
        );
        assert_eq!(
            join("http://localhost:8080", &import_receipts()),
            "http://localhost:8080/api/import-receipts"
        );
    }
}
