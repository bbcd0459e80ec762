use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{ENTRY_HEADERS, EntryRow};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const DATE_COLS: [usize; 3] = [1, 4, 5];
const DURATION_COL: usize = 6;

/// Export XLSX with banded rows, auto-sized columns and a total line.
pub(crate) fn export_xlsx(rows: &[EntryRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Time Entries").map_err(to_export_error)?;

    if rows.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in ENTRY_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = ENTRY_HEADERS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);
    let mut total_hours = 0.0;

    for (row_index, entry) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in entry.cells().iter().enumerate() {
            write_cell(worksheet, row, col, value, band_color)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(*value));
        }

        total_hours += entry.duration.parse::<f64>().unwrap_or(0.0);
    }

    let total_row = (rows.len() + 1) as u32;
    let bold = Format::new().set_bold().set_border(FormatBorder::Thin);
    let bold_num = Format::new()
        .set_bold()
        .set_num_format("0.00")
        .set_align(FormatAlign::Right)
        .set_border(FormatBorder::Thin);
    worksheet
        .write_with_format(total_row, (DURATION_COL - 1) as u16, "Total", &bold)
        .map_err(to_export_error)?;
    worksheet
        .write_with_format(total_row, DURATION_COL as u16, total_hours, &bold_num)
        .map_err(to_export_error)?;

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Dates and times become Excel serials, the duration a number, the rest text.
fn write_cell(worksheet: &mut Worksheet, row: u32, col: usize, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if DATE_COLS.contains(&col)
        && let Some((num_format, serial)) = parse_to_excel_date(s)
    {
        worksheet
            .write_with_format(row, col as u16, serial, &base.set_num_format(num_format))
            .map_err(to_export_error)?;
        return Ok(());
    }

    if col == DURATION_COL
        && let Ok(num) = s.parse::<f64>()
    {
        let fmt = base.set_num_format("0.00").set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, col as u16, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col as u16, s, &base)
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
