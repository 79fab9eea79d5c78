//! Output formatting for the CLI.

use anyhow::Result;
use console::style;
use fishmarket_commerce::cart::LineItem;
use fishmarket_commerce::Money;
use serde::Serialize;

/// Column headings of the cart table.
const CART_COLUMNS: [&str; 5] = ["LINE", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"];

/// Column widths of the cart table.
const CART_WIDTHS: [usize; 5] = [28, 24, 6, 12, 12];

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message; in JSON mode as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a value as pretty JSON on stdout.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print cart lines as a table, one row per line item.
    pub fn cart_table(&self, items: &[LineItem]) {
        if self.json {
            return;
        }
        println!("  {}", style(pad_row(&CART_COLUMNS.map(String::from))).dim());
        for item in items {
            println!("  {}", pad_row(&cart_row(item)));
        }
    }

    /// Print the count, total and (when non-zero) savings lines.
    pub fn cart_summary(&self, count: i64, total: &Money, savings: &Money) {
        self.kv("items", &count.to_string());
        self.kv("total", &total.display());
        if !savings.is_zero() {
            self.kv("you save", &savings.display());
        }
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Cells of one cart table row; the product name is cut to its column.
fn cart_row(item: &LineItem) -> [String; 5] {
    [
        item.id.to_string(),
        truncate(&item.name, CART_WIDTHS[1]),
        item.quantity.to_string(),
        item.price.display(),
        item.line_total().display(),
    ]
}

fn pad_row(cells: &[String; 5]) -> String {
    cells
        .iter()
        .zip(CART_WIDTHS)
        .map(|(cell, width)| format!("{:width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Truncate `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishmarket_commerce::cart::ProductDescriptor;
    use fishmarket_commerce::{Currency, LineItemId};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("cod", 10), "cod");
        assert_eq!(truncate("smoked mackerel", 8), "smoked …");
    }

    #[test]
    fn test_cart_row() {
        let descriptor = ProductDescriptor::new(
            "mackerel",
            "Cold-smoked Atlantic mackerel fillets",
            Money::new(1250, Currency::USD),
        );
        let mut item = LineItem::new(descriptor, 3);
        item.id = LineItemId::new("li_abc");

        let row = cart_row(&item);
        assert_eq!(row[0], "li_abc");
        assert_eq!(row[1].chars().count(), CART_WIDTHS[1]);
        assert!(row[1].ends_with('…'));
        assert_eq!(row[2], "3");
        assert_eq!(row[3], "$12.50");
        assert_eq!(row[4], "$37.50");
    }
}
