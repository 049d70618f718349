//! Output formatting for the CLI.

use cart_core::cart::{CartSummary, LineItem};
use cart_core::Money;
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
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

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print cart lines as a table.
    pub fn cart_lines(&self, items: &[LineItem]) {
        const WIDTHS: [usize; 5] = [14, 24, 10, 9, 10];
        self.table_row(&["PRODUCT", "NAME", "PRICE", "QTY", "TOTAL"], &WIDTHS);
        for item in items {
            let qty = format!("{}/{}", item.quantity, item.stock_limit);
            let price = item.unit_price.display();
            let total = item.line_total().display();
            self.table_row(
                &[
                    item.product_id.as_str(),
                    item.display_name.as_str(),
                    price.as_str(),
                    qty.as_str(),
                    total.as_str(),
                ],
                &WIDTHS,
            );
        }
    }

    /// Print an order summary block.
    pub fn summary(&self, summary: &CartSummary) {
        self.kv("Subtotal", &summary.subtotal.display());
        if summary.has_savings() {
            self.kv("Total Savings", &format!("-{}", summary.savings.display()));
        }
        let shipping = if summary.free_shipping() {
            style("FREE").green().to_string()
        } else {
            summary.shipping.display()
        };
        self.kv("Shipping", &shipping);
        self.kv("Tax", &summary.tax.display());
        self.kv("Total", &style(summary.grand_total.display()).bold().to_string());
    }

    /// Print the one-line cart badge ("3 items · $42.00").
    pub fn badge(&self, item_count: i64, subtotal: Money) {
        let noun = if item_count == 1 { "item" } else { "items" };
        self.info(&format!("{} {} · {}", item_count, noun, subtotal.display()));
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
