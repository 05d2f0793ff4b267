/// Renders a `SheetLayout` into an xlsx workbook and downloads it in the browser
use contracts::shared::sheet::{column_letter, SheetCell, SheetLayout};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Builds the workbook and triggers the download under `layout.file_name`
pub fn export_sheet(layout: &SheetLayout) -> Result<(), String> {
    let bytes = render_workbook(layout)?;
    let blob = create_xlsx_blob(&bytes)?;
    download_blob(&blob, &layout.file_name)?;
    log::info!("Exported {} ({} rows)", layout.file_name, layout.rows.len());
    Ok(())
}

/// Serialises the layout as a single-sheet xlsx file
pub fn render_workbook(layout: &SheetLayout) -> Result<Vec<u8>, String> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or("Workbook has no sheet")?;
    sheet.set_name(layout.sheet_name.clone());

    for (row_index, cells) in layout.rows.iter().enumerate() {
        let row = row_index as u32 + 1;
        for (col_index, cell) in cells.iter().enumerate() {
            let col = col_index as u32 + 1;
            match cell {
                SheetCell::Empty => {}
                SheetCell::Text(text) => {
                    sheet.get_cell_mut((col, row)).set_value(text.clone());
                }
                SheetCell::Integer(value) => {
                    sheet.get_cell_mut((col, row)).set_value_number(*value as f64);
                    sheet
                        .get_style_mut((col, row))
                        .get_number_format_mut()
                        .set_format_code("#,##0");
                }
            }
        }
    }

    for merge in &layout.merges {
        sheet.add_merge_cells(merge.a1());
    }

    for &row in &layout.emphasis_rows {
        let width = layout
            .rows
            .get(row.saturating_sub(1) as usize)
            .map(|cells| cells.len().max(1) as u32)
            .unwrap_or(1);
        for col in 1..=width {
            sheet
                .get_style_mut((col, row))
                .get_font_mut()
                .set_bold(true);
        }
    }

    for (index, width) in layout.column_widths.iter().enumerate() {
        let letter = column_letter(index as u32 + 1);
        sheet.get_column_dimension_mut(&letter).set_width(*width);
    }

    let mut out: Vec<u8> = Vec::new();
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| format!("Failed to serialize workbook: {}", e))?;
    Ok(out)
}

/// Создает Blob с содержимым xlsx
fn create_xlsx_blob(bytes: &[u8]) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(XLSX_MIME);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;

    anchor.click();

    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_workbook_produces_zip() {
        let mut layout = SheetLayout::new("Báo cáo công nợ", "BaoCaoCongNo_3_2024.xlsx", 3);
        layout.push_banner("BÁO CÁO TỔNG HỢP CÔNG NỢ");
        layout.push_row(vec![
            SheetCell::Integer(1),
            SheetCell::text("Đại lý A"),
            SheetCell::Integer(1_400_000),
        ]);
        layout.column_widths = vec![8.0, 32.0, 18.0];

        let bytes = render_workbook(&layout).unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }
}
