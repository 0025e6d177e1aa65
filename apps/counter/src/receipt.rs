//! # Receipt Rendering
//!
//! Renders an accepted bill to `Bill_<number>.pdf` in the configured
//! receipt directory.
//!
//! ## Failure Semantics
//! Rendering runs after the sale is accepted server-side. A failure here
//! is reported to the operator but never unwinds the sale; the caller
//! logs it and carries on.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::commands::sale::BillView;

/// Receipt rendering failure.
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("Could not write receipt file: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

// A4 portrait, margins and line spacing in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const LINE_HEIGHT: f32 = 6.0;

/// Renders the bill to `<dir>/Bill_<number>.pdf` and returns the path.
pub fn render_receipt(bill: &BillView, dir: &Path) -> Result<PathBuf, ReceiptError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Bill {}", bill.bill_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "receipt",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReceiptError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReceiptError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - 20.0;

    let mut line = |text: &str, size: f32, bold: bool, y: &mut f32| {
        let f = if bold { &font_bold } else { &font };
        layer.use_text(text, size, Mm(MARGIN_LEFT), Mm(*y), f);
        *y -= LINE_HEIGHT;
    };

    // Header
    line(&bill.store_name, 16.0, true, &mut y);
    line(&format!("Bill No: {}", bill.bill_number), 11.0, false, &mut y);
    line(&format!("Date: {}", bill.timestamp), 11.0, false, &mut y);
    line(
        &format!("Customer: {}", bill.customer_name),
        11.0,
        false,
        &mut y,
    );
    if !bill.phone_number.is_empty() {
        line(&format!("Phone: {}", bill.phone_number), 11.0, false, &mut y);
    }
    y -= LINE_HEIGHT;

    // Line items
    line(
        "Item                      Qty    Rate    Disc%    Total",
        11.0,
        true,
        &mut y,
    );
    for item in &bill.lines {
        line(
            &format!(
                "{:<24} {:>4} {:>8.2} {:>7.1} {:>9.2}",
                truncate(&item.name, 24),
                item.qty,
                item.price,
                item.discount_percent,
                item.line_total,
            ),
            10.0,
            false,
            &mut y,
        );
    }
    y -= LINE_HEIGHT;

    // Totals
    line(
        &format!("Subtotal:       {:>10.2}", bill.totals.subtotal),
        11.0,
        false,
        &mut y,
    );
    line(
        &format!("Discount:       {:>10.2}", bill.totals.discount_total),
        11.0,
        false,
        &mut y,
    );
    line(
        &format!("GST:            {:>10.2}", bill.totals.gst_total),
        11.0,
        false,
        &mut y,
    );
    line(
        &format!("Grand Total:    {:>10.2}", bill.totals.grand_total),
        13.0,
        true,
        &mut y,
    );
    y -= LINE_HEIGHT;

    line("Thank you, visit again!", 10.0, false, &mut y);

    let path = dir.join(format!("Bill_{}.pdf", bill.bill_number));
    let file = File::create(&path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ReceiptError::Pdf(e.to_string()))?;

    Ok(path)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}
