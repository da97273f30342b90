//! PDF encoding
//!
//! Landscape A4 pages: the table title on the first page, then a shaded
//! header row repeated on every page and one line per data row. Column
//! widths follow the fitted text widths, scaled to the printable width.

use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use tabula_core::{ColumnConfig, Row};

use crate::xlsx_export::column_widths;
use crate::{ExportError, ExportOptions};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 14.0;
const TITLE_SIZE: f32 = 16.0;
const FONT_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 6.0;
// Average Helvetica glyph width at FONT_SIZE, in mm
const CHAR_WIDTH: f32 = 1.45;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Write `rows` restricted to `columns` as a titled PDF table
pub fn write_pdf(
    rows: &[Row],
    columns: &[&ColumnConfig],
    path: &Path,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let bytes = encode_pdf(rows, columns, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode the document in memory
pub fn encode_pdf(
    rows: &[Row],
    columns: &[&ColumnConfig],
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(&options.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let widths = layout_widths(rows, columns, options.max_column_width);
    let mut layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text(&options.title, TITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= ROW_HEIGHT * 2.0;
    draw_header(&layer, columns, &widths, y, &fonts);
    y -= ROW_HEIGHT;

    for row in rows {
        if y < MARGIN {
            layer = new_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
            draw_header(&layer, columns, &widths, y, &fonts);
            y -= ROW_HEIGHT;
        }
        let cells = columns.iter().map(|column| row.get(&column.id).to_string());
        draw_line(&layer, cells, &widths, y, &fonts.regular);
        y -= ROW_HEIGHT;
    }

    Ok(doc.save_to_bytes()?)
}

/// Column widths in mm: fitted character widths scaled down to the
/// printable width when they don't fit
pub fn layout_widths(rows: &[Row], columns: &[&ColumnConfig], max_chars: f64) -> Vec<f32> {
    let natural: Vec<f32> = column_widths(rows, columns, max_chars)
        .into_iter()
        .map(|chars| chars as f32 * CHAR_WIDTH)
        .collect();
    let total: f32 = natural.iter().sum();
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    if total <= available {
        return natural;
    }
    natural.iter().map(|w| w * available / total).collect()
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
    doc.get_page(page).get_layer(layer)
}

fn draw_header(
    layer: &PdfLayerReference,
    columns: &[&ColumnConfig],
    widths: &[f32],
    y: f32,
    fonts: &Fonts,
) {
    let right = MARGIN + widths.iter().sum::<f32>();
    layer.set_fill_color(Color::Rgb(Rgb::new(0.85, 0.87, 0.9, None)));
    layer.add_rect(
        Rect::new(Mm(MARGIN), Mm(y - 1.8), Mm(right), Mm(y + ROW_HEIGHT - 1.8))
            .with_mode(PaintMode::Fill),
    );
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    let labels = columns.iter().map(|column| column.label.clone());
    draw_line(layer, labels, widths, y, &fonts.bold);
}

fn draw_line(
    layer: &PdfLayerReference,
    cells: impl Iterator<Item = String>,
    widths: &[f32],
    y: f32,
    font: &IndirectFontRef,
) {
    let mut x = MARGIN;
    for (text, width) in cells.zip(widths) {
        layer.use_text(fit(&text, *width), FONT_SIZE, Mm(x + 1.0), Mm(y), font);
        x += width;
    }
}

/// Truncate `text` to what fits in `width` mm
fn fit(text: &str, width: f32) -> String {
    let max = ((width - 2.0) / CHAR_WIDTH).floor().max(1.0) as usize;
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
