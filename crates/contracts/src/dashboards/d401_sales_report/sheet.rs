//! Spreadsheet layout for the monthly sales report

use super::dto::{AgentSales, SalesTotals};
use crate::shared::sheet::{SheetCell, SheetLayout};
use crate::shared::sort::Ranked;

pub const SALES_SHEET_NAME: &str = "BaoCaoDoanhSo";
pub const SALES_TITLE: &str = "BÁO CÁO DOANH SỐ";
pub const SALES_HEADERS: [&str; 5] = [
    "STT",
    "Tên Đại Lý",
    "Số Phiếu Xuất",
    "Tổng Trị Giá (VNĐ)",
    "Tỷ Lệ (%)",
];

pub fn sales_report_file_name(month: u32, year: i32) -> String {
    format!("BaoCaoDoanhSo_{}_{}.xlsx", month, year)
}

/// `rows` in displayed order; the ratio column is written as text so the
/// two decimals survive
pub fn sales_report_sheet(
    month: u32,
    year: i32,
    rows: &[Ranked<AgentSales>],
    totals: &SalesTotals,
) -> SheetLayout {
    let mut layout = SheetLayout::new(
        SALES_SHEET_NAME,
        sales_report_file_name(month, year),
        SALES_HEADERS.len() as u32,
    );
    layout.column_widths = vec![8.0, 32.0, 16.0, 20.0, 12.0];

    layout.push_banner(SALES_TITLE);
    layout.push_banner(format!("Tháng {}/{}", month, year));
    layout.push_blank();

    let revenue = layout.push_row(vec![
        SheetCell::text("Tổng Doanh Thu:"),
        SheetCell::Integer(totals.total_revenue),
    ]);
    layout.emphasize(revenue);
    layout.push_blank();

    let header = layout.push_row(SALES_HEADERS.iter().map(|h| SheetCell::text(*h)).collect());
    layout.emphasize(header);

    for row in rows {
        layout.push_row(vec![
            SheetCell::Integer(row.stt as i64),
            SheetCell::text(row.item.agent_name.clone()),
            SheetCell::Integer(row.item.export_count),
            SheetCell::Integer(row.item.total_amount),
            SheetCell::text(row.item.ratio_label()),
        ]);
    }

    let total = layout.push_row(vec![
        SheetCell::Empty,
        SheetCell::text("TỔNG CỘNG"),
        SheetCell::Integer(totals.export_count),
        SheetCell::Integer(totals.total_revenue),
        SheetCell::text(if totals.total_revenue == 0 { "0.00" } else { "100.00" }),
    ]);
    layout.emphasize(total);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d401_sales_report::dto::SalesSummary;
    use crate::domain::a001_agent::AgentRef;
    use crate::domain::a005_receipt::{ReceiptKind, StoredReceipt};
    use crate::shared::sort::{SortDirection, SortState};
    use chrono::NaiveDate;

    fn export(id: i32, agent_id: i32, name: &str, total: i64) -> StoredReceipt {
        StoredReceipt {
            kind: ReceiptKind::Export,
            receipt_id: id,
            create_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            agent: Some(AgentRef {
                agent_id,
                agent_name: name.into(),
            }),
            total_amount: total,
            paid_amount: 0,
            lines: Vec::new(),
        }
    }

    fn sheet(state: &SortState) -> SheetLayout {
        let summary = SalesSummary::for_period(
            5,
            2024,
            &[
                export(1, 1, "Bình An", 100_000),
                export(2, 2, "An Phát", 300_000),
                export(3, 2, "An Phát", 100_000),
            ],
        );
        let rows = summary.sorted(state);
        sales_report_sheet(summary.month, summary.year, &rows, &summary.totals)
    }

    #[test]
    fn test_names_and_banners() {
        let layout = sheet(&SortState::new("total_amount", SortDirection::Descending));
        assert_eq!(layout.sheet_name, "BaoCaoDoanhSo");
        assert_eq!(layout.file_name, "BaoCaoDoanhSo_5_2024.xlsx");
        assert_eq!(layout.cell(1, 1), Some(&SheetCell::text(SALES_TITLE)));
        assert_eq!(layout.cell(2, 1), Some(&SheetCell::text("Tháng 5/2024")));
        assert_eq!(layout.cell(4, 2), Some(&SheetCell::Integer(500_000)));
        for (col, header) in SALES_HEADERS.iter().enumerate() {
            assert_eq!(layout.cell(6, col as u32 + 1), Some(&SheetCell::text(*header)));
        }
    }

    #[test]
    fn test_rows_follow_displayed_order() {
        let layout = sheet(&SortState::new("total_amount", SortDirection::Descending));
        assert_eq!(layout.cell(7, 2), Some(&SheetCell::text("An Phát")));
        assert_eq!(layout.cell(7, 3), Some(&SheetCell::Integer(2)));
        assert_eq!(layout.cell(7, 5), Some(&SheetCell::text("80.00")));
        assert_eq!(layout.cell(8, 2), Some(&SheetCell::text("Bình An")));

        let by_name = sheet(&SortState::new("agent_name", SortDirection::Ascending));
        assert_eq!(by_name.cell(7, 2), Some(&SheetCell::text("An Phát")));
        assert_eq!(by_name.cell(7, 1), Some(&SheetCell::Integer(1)));

        assert_eq!(layout.cell(9, 2), Some(&SheetCell::text("TỔNG CỘNG")));
        assert_eq!(layout.cell(9, 3), Some(&SheetCell::Integer(3)));
        assert!(layout.emphasis_rows.contains(&9));
    }
}
