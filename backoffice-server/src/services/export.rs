//! Order Export Formatters
//!
//! Purely presentational: both exporters consume the joined order detail
//! rows and produce a downloadable byte stream. CSV is a plain tabular
//! spreadsheet; the PDF is a paginated text report written directly in the
//! PDF object syntax (uncompressed Helvetica text, A4 pages).

use crate::db::models::OrderDetail;
use crate::utils::time::millis_to_rfc3339;

/// Escape a CSV field (quote when it contains a delimiter, quote or newline)
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render all orders as a CSV spreadsheet
pub fn orders_to_csv(orders: &[OrderDetail]) -> String {
    let mut out = String::from("OrderID,Product,Category,Buyer,Vendor,Price,Status,Date\n");
    for order in orders {
        let row = [
            order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            order.product_title.clone().unwrap_or_default(),
            order.product_category.clone().unwrap_or_default(),
            order.buyer_name.clone().unwrap_or_default(),
            order.vendor_name.clone().unwrap_or_default(),
            format!("{}", order.price),
            serde_json::to_value(order.status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            millis_to_rfc3339(order.created_at),
        ];
        let line: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

// =============================================================================
// PDF report
// =============================================================================

/// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
/// Text lines per page at 14pt leading inside 50pt margins
const LINES_PER_PAGE: usize = 50;

/// Escape text for a PDF literal string
fn pdf_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Build the content stream for one page of text lines
fn page_content(lines: &[String]) -> String {
    let mut content = String::new();
    content.push_str("BT\n/F1 11 Tf\n14 TL\n50 792 Td\n");
    for line in lines {
        content.push_str(&format!("({}) Tj\nT*\n", pdf_escape(line)));
    }
    content.push_str("ET\n");
    content
}

/// Render all orders as a paginated PDF text report
pub fn orders_to_pdf(orders: &[OrderDetail]) -> Vec<u8> {
    // Flatten orders into report lines
    let mut lines: Vec<String> = vec!["Order Report".to_string(), String::new()];
    for (i, order) in orders.iter().enumerate() {
        lines.push(format!("Order #{}", i + 1));
        lines.push(format!(
            "Product: {}",
            order.product_title.as_deref().unwrap_or("-")
        ));
        lines.push(format!(
            "Buyer: {}",
            order.buyer_name.as_deref().unwrap_or("-")
        ));
        lines.push(format!(
            "Vendor: {}",
            order.vendor_name.as_deref().unwrap_or("-")
        ));
        lines.push(format!("Price: ${}", order.price));
        lines.push(format!(
            "Status: {}",
            serde_json::to_value(order.status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        ));
        lines.push(format!("Date: {}", millis_to_rfc3339(order.created_at)));
        lines.push(String::new());
    }

    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    let page_count = pages.len().max(1);

    // Object layout: 1 catalog, 2 page tree, 3 font, then
    // (page, content) pairs starting at object 4.
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for i in 0..page_count {
        let content = page_content(pages.get(i).copied().unwrap_or(&[]));
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            5 + i * 2
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    // Serialize with a correct xref table
    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets: Vec<usize> = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderStatus;

    fn sample_order(title: &str, buyer: &str) -> OrderDetail {
        OrderDetail {
            id: Some(surrealdb::RecordId::from_table_key("order", "o1")),
            product_title: Some(title.to_string()),
            product_category: Some("gadgets".to_string()),
            buyer_name: Some(buyer.to_string()),
            buyer_email: Some("b@example.com".to_string()),
            vendor_name: Some("Shop".to_string()),
            vendor_email: Some("v@example.com".to_string()),
            price: 100.0,
            fee: 5.0,
            total: 105.0,
            status: OrderStatus::Placed,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_order() {
        let orders = vec![sample_order("Widget", "Alice"), sample_order("Gizmo", "Bob")];
        let csv = orders_to_csv(&orders);
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("OrderID,Product,Category"));
        assert!(lines[1].contains("Widget"));
        assert!(lines[2].contains("Bob"));
    }

    #[test]
    fn csv_escapes_delimiters() {
        let mut order = sample_order("Widget, deluxe", "Alice \"The Ace\"");
        order.vendor_name = Some("Line\nBreak".to_string());
        let csv = orders_to_csv(&[order]);
        assert!(csv.contains("\"Widget, deluxe\""));
        assert!(csv.contains("\"Alice \"\"The Ace\"\"\""));
    }

    #[test]
    fn pdf_is_wellformed_text_report() {
        let orders = vec![sample_order("Widget", "Alice")];
        let pdf = orders_to_pdf(&orders);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("Order Report"));
        assert!(text.contains("Product: Widget"));
        assert!(text.contains("Buyer: Alice"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn pdf_paginates_long_reports() {
        let orders: Vec<OrderDetail> = (0..20)
            .map(|i| sample_order(&format!("Item {}", i), "Alice"))
            .collect();
        // 2 header lines + 20 * 8 lines = 162 lines -> 4 pages of 50
        let pdf = orders_to_pdf(&orders);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Count 4"));
    }

    #[test]
    fn pdf_escapes_parentheses() {
        let order = sample_order("Widget (limited)", "Alice");
        let pdf = orders_to_pdf(&[order]);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("Widget \\(limited\\)"));
    }
}
