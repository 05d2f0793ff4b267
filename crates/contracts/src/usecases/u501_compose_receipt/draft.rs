use chrono::NaiveDate;
use std::fmt;

use super::shortfall::InventoryShortfall;
use crate::domain::a003_product::Product;
use crate::domain::a005_receipt::{
    CreateExportReceiptRequest, CreateImportReceiptRequest, ExportDetailRequest,
    ImportDetailRequest, ReceiptKind, ReceiptLineItem, ReceiptTotals,
};
use crate::shared::aggregate::aggregate;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    ProductMissing,
    Duplicate(ReceiptKind),
    QuantityMissing,
    QuantityInvalid,
    PriceMissing,
    PriceInvalid,
    ExceedsInventory { available: i64 },
    LineNotFound,
}

impl fmt::Display for LineItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineItemError::ProductMissing => f.write_str("Vui lòng chọn sản phẩm"),
            LineItemError::Duplicate(ReceiptKind::Import) => {
                f.write_str("Sản phẩm này đã được thêm vào phiếu nhập")
            }
            LineItemError::Duplicate(ReceiptKind::Export) => {
                f.write_str("Sản phẩm này đã được thêm vào phiếu xuất")
            }
            LineItemError::QuantityMissing => f.write_str("Vui lòng nhập số lượng"),
            LineItemError::QuantityInvalid => f.write_str("Số lượng phải là số dương"),
            LineItemError::PriceMissing => f.write_str("Vui lòng nhập đơn giá"),
            LineItemError::PriceInvalid => f.write_str("Đơn giá phải là số không âm"),
            LineItemError::ExceedsInventory { available } => write!(
                f,
                "Số lượng xuất không được vượt quá tồn kho ({})",
                available
            ),
            LineItemError::LineNotFound => f.write_str("Không tìm thấy sản phẩm trong phiếu"),
        }
    }
}

impl std::error::Error for LineItemError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptHeaderError {
    DateMissing(ReceiptKind),
    DateInFuture(ReceiptKind),
    AgentMissing,
    PaidAmountMissing,
    PaidAmountInvalid,
    PaidAmountExceedsTotal { total: i64 },
    NoLines(ReceiptKind),
}

impl ReceiptHeaderError {
    pub fn field(&self) -> &'static str {
        match self {
            ReceiptHeaderError::DateMissing(_) | ReceiptHeaderError::DateInFuture(_) => "create_date",
            ReceiptHeaderError::AgentMissing => "agent",
            ReceiptHeaderError::PaidAmountMissing
            | ReceiptHeaderError::PaidAmountInvalid
            | ReceiptHeaderError::PaidAmountExceedsTotal { .. } => "paid_amount",
            ReceiptHeaderError::NoLines(_) => "lines",
        }
    }
}

fn action_word(kind: ReceiptKind) -> &'static str {
    match kind {
        ReceiptKind::Import => "nhập",
        ReceiptKind::Export => "xuất",
    }
}

impl fmt::Display for ReceiptHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptHeaderError::DateMissing(kind) => {
                write!(f, "Vui lòng chọn ngày {}", action_word(*kind))
            }
            ReceiptHeaderError::DateInFuture(kind) => write!(
                f,
                "Ngày {} không được lớn hơn ngày hiện tại",
                action_word(*kind)
            ),
            ReceiptHeaderError::AgentMissing => f.write_str("Vui lòng chọn đại lý"),
            ReceiptHeaderError::PaidAmountMissing => f.write_str("Vui lòng nhập số tiền đã trả"),
            ReceiptHeaderError::PaidAmountInvalid => {
                f.write_str("Số tiền đã trả phải là số không âm")
            }
            ReceiptHeaderError::PaidAmountExceedsTotal { total } => write!(
                f,
                "Số tiền đã trả không được vượt quá tổng tiền ({} VNĐ)",
                total
            ),
            ReceiptHeaderError::NoLines(kind) => write!(
                f,
                "Vui lòng thêm ít nhất một sản phẩm vào phiếu {}",
                action_word(*kind)
            ),
        }
    }
}

impl std::error::Error for ReceiptHeaderError {}

// ============================================================================
// Input parsing
// ============================================================================

fn parse_quantity(raw: &str) -> Result<u32, LineItemError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LineItemError::QuantityMissing);
    }
    match raw.parse::<i64>() {
        Ok(q) if q > 0 => u32::try_from(q).map_err(|_| LineItemError::QuantityInvalid),
        _ => Err(LineItemError::QuantityInvalid),
    }
}

/// Money typed by the user; `.`/`,`/space thousand separators are accepted
fn parse_money(raw: &str) -> Option<Result<i64, ()>> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned.parse::<i64>().map_err(|_| ()))
}

/// A typed price is blamed for an oversized total, otherwise the quantity is
fn overflow_error(price_typed: bool) -> LineItemError {
    if price_typed {
        LineItemError::PriceInvalid
    } else {
        LineItemError::QuantityInvalid
    }
}

fn parse_price(raw: &str) -> Result<i64, LineItemError> {
    match parse_money(raw) {
        None => Err(LineItemError::PriceMissing),
        Some(Ok(price)) if price >= 0 => Ok(price),
        Some(_) => Err(LineItemError::PriceInvalid),
    }
}

// ============================================================================
// Header
// ============================================================================

/// Header fields entered above the line list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptHeader {
    pub create_date: Option<NaiveDate>,
    /// Exports only
    pub agent_id: Option<i32>,
    /// Exports only; raw text as typed
    pub paid_amount: String,
}

impl ReceiptHeader {
    pub fn validate(
        &self,
        kind: ReceiptKind,
        total_amount: i64,
        today: NaiveDate,
    ) -> Result<(), Vec<ReceiptHeaderError>> {
        let mut errors = Vec::new();

        match self.create_date {
            None => errors.push(ReceiptHeaderError::DateMissing(kind)),
            Some(date) if date > today => errors.push(ReceiptHeaderError::DateInFuture(kind)),
            Some(_) => {}
        }

        if kind == ReceiptKind::Export {
            if self.agent_id.is_none() {
                errors.push(ReceiptHeaderError::AgentMissing);
            }
            match parse_money(&self.paid_amount) {
                None => errors.push(ReceiptHeaderError::PaidAmountMissing),
                Some(Ok(paid)) if paid < 0 => errors.push(ReceiptHeaderError::PaidAmountInvalid),
                Some(Ok(paid)) if paid > total_amount => {
                    errors.push(ReceiptHeaderError::PaidAmountExceedsTotal {
                        total: total_amount,
                    })
                }
                Some(Ok(_)) => {}
                Some(Err(())) => errors.push(ReceiptHeaderError::PaidAmountInvalid),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn paid_amount_value(&self) -> i64 {
        match parse_money(&self.paid_amount) {
            Some(Ok(paid)) => paid,
            _ => 0,
        }
    }
}

// ============================================================================
// Draft
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortfallAdjustment {
    /// Quantity lowered to what is in stock
    Adjusted { quantity: u32 },
    /// Nothing in stock: the line was dropped
    Removed,
}

/// Line items of a receipt being composed, before submission.
///
/// One line per product. Every edit validates first and leaves the draft
/// untouched on error.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDraft {
    kind: ReceiptKind,
    lines: Vec<ReceiptLineItem>,
}

impl ReceiptDraft {
    pub fn new(kind: ReceiptKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn kind(&self) -> ReceiptKind {
        self.kind
    }

    pub fn lines(&self) -> &[ReceiptLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, product_id: i32) -> bool {
        self.lines.iter().any(|l| l.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: i32) -> Result<&mut ReceiptLineItem, LineItemError> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id() == product_id)
            .ok_or(LineItemError::LineNotFound)
    }

    fn check_inventory(&self, product: &Product, quantity: u32) -> Result<(), LineItemError> {
        if self.kind == ReceiptKind::Export && i64::from(quantity) > product.inventory_quantity {
            return Err(LineItemError::ExceedsInventory {
                available: product.inventory_quantity,
            });
        }
        Ok(())
    }

    /// Appends a line. `unit_price` is only read for imports; exports use the
    /// product's export price, and an import without a price typed in starts
    /// from the product's import price.
    pub fn add(
        &mut self,
        product: Option<Product>,
        quantity: &str,
        unit_price: Option<&str>,
    ) -> Result<(), LineItemError> {
        let product = product.ok_or(LineItemError::ProductMissing)?;
        if self.contains(product.product_id) {
            return Err(LineItemError::Duplicate(self.kind));
        }
        let quantity = parse_quantity(quantity)?;
        let raw_price_given = self.kind == ReceiptKind::Import && unit_price.is_some();
        let unit_price = match (self.kind, unit_price) {
            (ReceiptKind::Import, Some(raw)) => parse_price(raw)?,
            (kind, _) => kind.default_price(&product),
        };
        self.check_inventory(&product, quantity)?;

        let line = ReceiptLineItem::new(product, quantity, unit_price)
            .ok_or_else(|| overflow_error(raw_price_given))?;
        self.lines.push(line);
        Ok(())
    }

    pub fn update_quantity(&mut self, product_id: i32, raw: &str) -> Result<(), LineItemError> {
        let quantity = parse_quantity(raw)?;
        let product = self
            .lines
            .iter()
            .find(|l| l.product_id() == product_id)
            .map(|l| l.product().clone())
            .ok_or(LineItemError::LineNotFound)?;
        self.check_inventory(&product, quantity)?;
        if !self.line_mut(product_id)?.set_quantity(quantity) {
            return Err(LineItemError::QuantityInvalid);
        }
        Ok(())
    }

    pub fn update_price(&mut self, product_id: i32, raw: &str) -> Result<(), LineItemError> {
        let price = parse_price(raw)?;
        if !self.line_mut(product_id)?.set_unit_price(price) {
            return Err(LineItemError::PriceInvalid);
        }
        Ok(())
    }

    /// Returns whether a line was removed
    pub fn remove(&mut self, product_id: i32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> ReceiptTotals {
        aggregate(&self.lines)
    }

    /// Line a reported shortfall refers to: by id, then by product name in
    /// the message, then the line asking for exactly the requested quantity,
    /// then the first line.
    pub fn shortfall_target(&self, shortfall: &InventoryShortfall) -> Option<i32> {
        if let Some(id) = shortfall.product_id.filter(|id| self.contains(*id)) {
            return Some(id);
        }
        if let Some(name) = &shortfall.product_name {
            if let Some(line) = self.lines.iter().find(|l| &l.product().product_name == name) {
                return Some(line.product_id());
            }
        }
        self.lines
            .iter()
            .find(|l| i64::from(l.quantity()) == shortfall.requested)
            .or_else(|| self.lines.first())
            .map(ReceiptLineItem::product_id)
    }

    /// "Adjust to available quantity": lowers the line to the stock the
    /// backend reported, or drops it when nothing is left.
    pub fn apply_shortfall(
        &mut self,
        product_id: i32,
        available: i64,
    ) -> Result<ShortfallAdjustment, LineItemError> {
        if !self.contains(product_id) {
            return Err(LineItemError::LineNotFound);
        }
        let quantity = u32::try_from(available).unwrap_or(0);
        if quantity == 0 {
            self.remove(product_id);
            return Ok(ShortfallAdjustment::Removed);
        }

        let line = self.line_mut(product_id)?;
        let mut product = line.product().clone();
        product.inventory_quantity = available;
        *line = ReceiptLineItem::new(product, quantity, line.unit_price())
            .ok_or(LineItemError::QuantityInvalid)?;
        Ok(ShortfallAdjustment::Adjusted { quantity })
    }

    fn check_submittable(
        &self,
        header: &ReceiptHeader,
        today: NaiveDate,
    ) -> Result<NaiveDate, Vec<ReceiptHeaderError>> {
        let mut errors = match header.validate(self.kind, self.total().total_amount, today) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        if self.lines.is_empty() {
            errors.push(ReceiptHeaderError::NoLines(self.kind));
        }
        match header.create_date {
            Some(date) if errors.is_empty() => Ok(date),
            _ => Err(errors),
        }
    }

    pub fn to_import_request(
        &self,
        header: &ReceiptHeader,
        today: NaiveDate,
    ) -> Result<CreateImportReceiptRequest, Vec<ReceiptHeaderError>> {
        let create_date = self.check_submittable(header, today)?;
        Ok(CreateImportReceiptRequest {
            create_date,
            import_details: self
                .lines
                .iter()
                .map(|l| ImportDetailRequest {
                    product_id: l.product_id(),
                    quantity_import: l.quantity(),
                })
                .collect(),
        })
    }

    pub fn to_export_request(
        &self,
        header: &ReceiptHeader,
        today: NaiveDate,
    ) -> Result<CreateExportReceiptRequest, Vec<ReceiptHeaderError>> {
        let create_date = self.check_submittable(header, today)?;
        let agent_id = header
            .agent_id
            .ok_or_else(|| vec![ReceiptHeaderError::AgentMissing])?;
        Ok(CreateExportReceiptRequest {
            create_date,
            agent_id,
            paid_amount: header.paid_amount_value(),
            export_details: self
                .lines
                .iter()
                .map(|l| ExportDetailRequest {
                    product_id: l.product_id(),
                    quantity_export: l.quantity(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str, inventory: i64) -> Product {
        Product {
            product_id: id,
            product_name: name.into(),
            unit: None,
            import_price: 10_000,
            export_price: 12_000,
            inventory_quantity: inventory,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_add_validation_order() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Import);
        assert_eq!(draft.add(None, "1", Some("1")), Err(LineItemError::ProductMissing));
        assert_eq!(
            draft.add(Some(product(1, "A", 0)), "", Some("1")),
            Err(LineItemError::QuantityMissing)
        );
        assert_eq!(
            draft.add(Some(product(1, "A", 0)), "0", Some("1")),
            Err(LineItemError::QuantityInvalid)
        );
        assert_eq!(
            draft.add(Some(product(1, "A", 0)), "2.5", Some("1")),
            Err(LineItemError::QuantityInvalid)
        );
        assert_eq!(
            draft.add(Some(product(1, "A", 0)), "2", Some("-5")),
            Err(LineItemError::PriceInvalid)
        );
        assert!(draft.is_empty());

        draft.add(Some(product(1, "A", 0)), "2", Some("15.000")).unwrap();
        assert_eq!(draft.lines()[0].unit_price(), 15_000);
        assert_eq!(draft.lines()[0].total_price(), 30_000);
    }

    #[test]
    fn test_oversized_line_total_is_rejected() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Import);
        assert_eq!(
            draft.add(Some(product(1, "A", 0)), "2", Some("5000000000000000000")),
            Err(LineItemError::PriceInvalid)
        );
        assert!(draft.is_empty());

        draft.add(Some(product(1, "A", 0)), "2", Some("4000000000000000000")).unwrap();
        let before = draft.lines()[0].clone();
        assert_eq!(draft.update_quantity(1, "3"), Err(LineItemError::QuantityInvalid));
        assert_eq!(
            draft.update_price(1, "9223372036854775807"),
            Err(LineItemError::PriceInvalid)
        );
        assert_eq!(draft.lines()[0], before);
    }

    #[test]
    fn test_duplicate_is_rejected_not_merged() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Import);
        draft.add(Some(product(1, "A", 0)), "2", None).unwrap();
        let err = draft.add(Some(product(1, "A", 0)), "5", None).unwrap_err();
        assert_eq!(err, LineItemError::Duplicate(ReceiptKind::Import));
        assert_eq!(err.to_string(), "Sản phẩm này đã được thêm vào phiếu nhập");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_export_uses_export_price_and_inventory() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Export);
        assert_eq!(
            draft.add(Some(product(1, "A", 3)), "4", None),
            Err(LineItemError::ExceedsInventory { available: 3 })
        );
        draft.add(Some(product(1, "A", 3)), "3", Some("1")).unwrap();
        assert_eq!(draft.lines()[0].unit_price(), 12_000);
        assert_eq!(
            draft.update_quantity(1, "9"),
            Err(LineItemError::ExceedsInventory { available: 3 })
        );
    }

    #[test]
    fn test_rejected_updates_leave_line_unchanged() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Import);
        draft.add(Some(product(1, "A", 0)), "2", Some("100")).unwrap();
        let before = draft.lines()[0].clone();

        for raw in ["abc", "0", "-3", ""] {
            assert!(draft.update_quantity(1, raw).is_err());
        }
        for raw in ["abc", "-1"] {
            assert!(draft.update_price(1, raw).is_err());
        }
        assert_eq!(draft.lines()[0], before);
        assert_eq!(draft.update_quantity(42, "1"), Err(LineItemError::LineNotFound));
    }

    #[test]
    fn test_updates_rederive_total() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Import);
        draft.add(Some(product(1, "A", 0)), "2", Some("100")).unwrap();
        draft.add(Some(product(2, "B", 0)), "1", Some("50")).unwrap();

        draft.update_quantity(1, "7").unwrap();
        draft.update_price(1, "0").unwrap();
        draft.update_price(2, "1.250").unwrap();
        for line in draft.lines() {
            assert_eq!(line.total_price(), i64::from(line.quantity()) * line.unit_price());
        }
        assert_eq!(draft.total().total_amount, 1_250);
        assert_eq!(draft.total().total_quantity, 8);

        assert!(draft.remove(1));
        assert!(!draft.remove(1));
        assert_eq!(draft.total().total_amount, 1_250);
    }

    #[test]
    fn test_apply_shortfall() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Export);
        draft.add(Some(product(1, "Bia", 10)), "10", None).unwrap();
        draft.add(Some(product(2, "Nước", 10)), "4", None).unwrap();

        let shortfall = InventoryShortfall {
            product_id: None,
            product_name: Some("Bia".into()),
            requested: 10,
            available: 6,
            shortage: 4,
        };
        let target = draft.shortfall_target(&shortfall).unwrap();
        assert_eq!(target, 1);
        assert_eq!(
            draft.apply_shortfall(target, shortfall.available),
            Ok(ShortfallAdjustment::Adjusted { quantity: 6 })
        );
        assert_eq!(draft.lines()[0].quantity(), 6);
        assert_eq!(draft.lines()[0].total_price(), 72_000);
        // stock lowered with it, so asking for more is caught locally
        assert!(draft.update_quantity(1, "7").is_err());

        assert_eq!(draft.apply_shortfall(2, 0), Ok(ShortfallAdjustment::Removed));
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_header_validation() {
        let header = ReceiptHeader {
            create_date: Some(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()),
            agent_id: None,
            paid_amount: "abc".into(),
        };
        let errors = header.validate(ReceiptKind::Export, 1_000, today()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ReceiptHeaderError::DateInFuture(ReceiptKind::Export),
                ReceiptHeaderError::AgentMissing,
                ReceiptHeaderError::PaidAmountInvalid
            ]
        );

        let header = ReceiptHeader {
            create_date: Some(today()),
            agent_id: Some(1),
            paid_amount: "2.000".into(),
        };
        assert_eq!(
            header.validate(ReceiptKind::Export, 1_000, today()),
            Err(vec![ReceiptHeaderError::PaidAmountExceedsTotal { total: 1_000 }])
        );
        assert!(header.validate(ReceiptKind::Export, 2_000, today()).is_ok());
        assert!(ReceiptHeader {
            create_date: Some(today()),
            ..Default::default()
        }
        .validate(ReceiptKind::Import, 0, today())
        .is_ok());
    }

    #[test]
    fn test_requests() {
        let mut draft = ReceiptDraft::new(ReceiptKind::Export);
        let header = ReceiptHeader {
            create_date: Some(today()),
            agent_id: Some(5),
            paid_amount: "0".into(),
        };
        assert_eq!(
            draft.to_export_request(&header, today()),
            Err(vec![ReceiptHeaderError::NoLines(ReceiptKind::Export)])
        );

        draft.add(Some(product(3, "C", 5)), "2", None).unwrap();
        let request = draft.to_export_request(&header, today()).unwrap();
        assert_eq!(request.agent_id, 5);
        assert_eq!(request.paid_amount, 0);
        assert_eq!(request.export_details[0].product_id, 3);
        assert_eq!(request.export_details[0].quantity_export, 2);

        let mut import = ReceiptDraft::new(ReceiptKind::Import);
        import.add(Some(product(4, "D", 0)), "9", None).unwrap();
        let request = import
            .to_import_request(
                &ReceiptHeader {
                    create_date: Some(today()),
                    ..Default::default()
                },
                today(),
            )
            .unwrap();
        assert_eq!(request.import_details[0].quantity_import, 9);
    }
}
