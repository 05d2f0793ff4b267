//! Spreadsheet layouts for the debt summary and for a receipt being composed

use chrono::NaiveDate;

use crate::domain::a004_debt_report::{DebtRecord, DebtTotals};
use crate::domain::a005_receipt::{ReceiptKind, ReceiptLineItem, ReceiptTotals};
use crate::shared::sheet::{SheetCell, SheetLayout};
use crate::shared::sort::Ranked;

pub const DEBT_SHEET_NAME: &str = "Báo cáo công nợ";
pub const DEBT_TITLE: &str = "BÁO CÁO TỔNG HỢP CÔNG NỢ";
pub const DEBT_HEADERS: [&str; 5] = [
    "STT",
    "Tên Đại Lý",
    "Nợ Đầu (VNĐ)",
    "Phát Sinh (VNĐ)",
    "Nợ Cuối (VNĐ)",
];

pub fn debt_summary_file_name(month: u32, year: i32) -> String {
    format!("BaoCaoCongNo_{}_{}.xlsx", month, year)
}

/// Lays out the debt summary exactly as displayed: `rows` must already be
/// in table order, their `stt` is written as-is.
pub fn debt_summary_sheet(
    month: u32,
    year: i32,
    rows: &[Ranked<DebtRecord>],
    totals: &DebtTotals,
) -> SheetLayout {
    let mut layout = SheetLayout::new(
        DEBT_SHEET_NAME,
        debt_summary_file_name(month, year),
        DEBT_HEADERS.len() as u32,
    );
    layout.column_widths = vec![8.0, 32.0, 18.0, 18.0, 18.0];

    layout.push_banner(DEBT_TITLE);
    layout.push_banner(format!("Tháng {}/{}", month, year));
    layout.push_blank();

    let block = layout.push_row(vec![SheetCell::text("TỔNG KẾT:")]);
    layout.emphasize(block);
    layout.push_row(vec![
        SheetCell::text("Tổng Nợ Đầu:"),
        SheetCell::Integer(totals.total_first_debt),
    ]);
    layout.push_row(vec![
        SheetCell::text("Tổng Phát Sinh:"),
        SheetCell::Integer(totals.total_arisen_debt),
    ]);
    layout.push_row(vec![
        SheetCell::text("Tổng Nợ Cuối:"),
        SheetCell::Integer(totals.total_last_debt),
    ]);
    layout.push_blank();

    let header = layout.push_row(DEBT_HEADERS.iter().map(|h| SheetCell::text(*h)).collect());
    layout.emphasize(header);

    for row in rows {
        layout.push_row(vec![
            SheetCell::Integer(row.stt as i64),
            SheetCell::text(row.item.agent_name.clone()),
            SheetCell::Integer(row.item.first_debt),
            SheetCell::Integer(row.item.arisen_debt),
            SheetCell::Integer(row.item.last_debt),
        ]);
    }

    layout
}

pub const RECEIPT_HEADERS: [&str; 6] = [
    "STT",
    "Mặt hàng",
    "Đơn vị",
    "Số lượng",
    "Đơn giá (VNĐ)",
    "Thành tiền (VNĐ)",
];

pub fn receipt_file_name(kind: ReceiptKind, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", kind.file_prefix(), date.format("%Y-%m-%d"))
}

/// Lays out the lines of a receipt that has not been submitted yet
pub fn receipt_sheet(
    kind: ReceiptKind,
    date: NaiveDate,
    counterparty: Option<&str>,
    lines: &[ReceiptLineItem],
    totals: &ReceiptTotals,
) -> SheetLayout {
    let mut layout = SheetLayout::new(
        kind.title(),
        receipt_file_name(kind, date),
        RECEIPT_HEADERS.len() as u32,
    );
    layout.column_widths = vec![8.0, 30.0, 12.0, 12.0, 18.0, 20.0];

    layout.push_banner(kind.title().to_uppercase());
    layout.push_banner(format!("Ngày {}", date.format("%d/%m/%Y")));
    if let Some(name) = counterparty {
        layout.push_banner(format!("Đại lý: {}", name));
    }
    layout.push_blank();

    let header = layout.push_row(RECEIPT_HEADERS.iter().map(|h| SheetCell::text(*h)).collect());
    layout.emphasize(header);

    for (index, line) in lines.iter().enumerate() {
        layout.push_row(vec![
            SheetCell::Integer(index as i64 + 1),
            SheetCell::text(line.product().product_name.clone()),
            SheetCell::text(line.product().unit_name()),
            SheetCell::Integer(i64::from(line.quantity())),
            SheetCell::Integer(line.unit_price()),
            SheetCell::Integer(line.total_price()),
        ]);
    }

    let total = layout.push_row(vec![
        SheetCell::Empty,
        SheetCell::text("TỔNG CỘNG"),
        SheetCell::Empty,
        SheetCell::Integer(totals.total_quantity),
        SheetCell::Empty,
        SheetCell::Integer(totals.total_amount),
    ]);
    layout.emphasize(total);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_debt_summary::dto::DebtSummary;
    use crate::domain::a003_product::Product;
    use crate::shared::aggregate::aggregate;
    use crate::shared::sort::{SortDirection, SortState};

    fn record(agent_id: i32, name: &str, first: i64, arisen: i64) -> DebtRecord {
        DebtRecord {
            debt_report_id: None,
            agent_id,
            agent_name: name.into(),
            month: 3,
            year: 2024,
            first_debt: first,
            arisen_debt: arisen,
            last_debt: first + arisen,
        }
    }

    fn summary_sheet(state: &SortState) -> SheetLayout {
        let summary = DebtSummary::from_records(
            3,
            2024,
            vec![
                record(1, "Bình An", 1000, 500),
                record(2, "An Phát", -200, 100),
                record(3, "Cửu Long", 0, 0),
            ],
        );
        let rows = summary.sorted(state);
        debt_summary_sheet(summary.month, summary.year, &rows, &summary.totals)
    }

    #[test]
    fn test_title_and_subtitle_merged() {
        let layout = summary_sheet(&SortState::new("last_debt", SortDirection::Descending));
        let merges: Vec<String> = layout.merges.iter().map(|m| m.a1()).collect();
        assert_eq!(merges, vec!["A1:E1", "A2:E2"]);
        assert_eq!(layout.cell(1, 1), Some(&SheetCell::text(DEBT_TITLE)));
        assert_eq!(layout.cell(2, 1), Some(&SheetCell::text("Tháng 3/2024")));
        assert_eq!(layout.sheet_name, "Báo cáo công nợ");
        assert_eq!(layout.file_name, "BaoCaoCongNo_3_2024.xlsx");
    }

    #[test]
    fn test_totals_block_before_header() {
        let layout = summary_sheet(&SortState::new("last_debt", SortDirection::Descending));
        assert!(layout.rows[2].is_empty());
        assert_eq!(layout.cell(4, 1), Some(&SheetCell::text("TỔNG KẾT:")));
        assert_eq!(layout.cell(5, 2), Some(&SheetCell::Integer(800)));
        assert_eq!(layout.cell(6, 2), Some(&SheetCell::Integer(600)));
        assert_eq!(layout.cell(7, 2), Some(&SheetCell::Integer(1400)));
        assert!(layout.rows[7].is_empty());
        for (col, header) in DEBT_HEADERS.iter().enumerate() {
            assert_eq!(layout.cell(9, col as u32 + 1), Some(&SheetCell::text(*header)));
        }
        assert!(layout.emphasis_rows.contains(&9));
    }

    #[test]
    fn test_rows_follow_displayed_order() {
        let by_debt = summary_sheet(&SortState::new("last_debt", SortDirection::Descending));
        let names: Vec<&SheetCell> = (10..=12).filter_map(|r| by_debt.cell(r, 2)).collect();
        assert_eq!(
            names,
            vec![
                &SheetCell::text("Bình An"),
                &SheetCell::text("Cửu Long"),
                &SheetCell::text("An Phát")
            ]
        );

        let by_name = summary_sheet(&SortState::new("agent_name", SortDirection::Ascending));
        assert_eq!(by_name.cell(10, 1), Some(&SheetCell::Integer(1)));
        assert_eq!(by_name.cell(10, 2), Some(&SheetCell::text("An Phát")));
        assert_eq!(by_name.cell(12, 2), Some(&SheetCell::text("Cửu Long")));
        assert_eq!(by_name.rows.len(), 12);
    }

    #[test]
    fn test_empty_summary_still_has_header() {
        let layout = debt_summary_sheet(1, 2025, &[], &DebtTotals::default());
        assert_eq!(layout.rows.len(), 9);
        assert_eq!(layout.cell(7, 2), Some(&SheetCell::Integer(0)));
    }

    #[test]
    fn test_receipt_sheet() {
        let product = Product {
            product_id: 1,
            product_name: "Đường".into(),
            unit: None,
            import_price: 20_000,
            export_price: 22_000,
            inventory_quantity: 10,
        };
        let lines = vec![ReceiptLineItem::new(product, 3, 22_000).unwrap()];
        let totals = aggregate(&lines);
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        let layout = receipt_sheet(ReceiptKind::Export, date, Some("Đại lý X"), &lines, &totals);

        assert_eq!(layout.file_name, "PhieuXuat_2024-07-09.xlsx");
        assert_eq!(layout.merges.len(), 3);
        assert_eq!(layout.merges[0].a1(), "A1:F1");
        assert_eq!(layout.cell(6, 6), Some(&SheetCell::Integer(66_000)));
        assert_eq!(layout.cell(7, 6), Some(&SheetCell::Integer(66_000)));
        assert_eq!(
            receipt_file_name(ReceiptKind::Import, date),
            "PhieuNhap_2024-07-09.xlsx"
        );
    }
}
