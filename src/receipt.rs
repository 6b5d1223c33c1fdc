use chrono::NaiveDateTime;
use serde::Serialize;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tera::{Context, Tera, Value};
use thiserror::Error;

use crate::model::{CustomerInfo, DeliveryInfo, DeliveryMethod};
use crate::order::OrderDraft;

// ==========================================
// Constants & Embeds
// ==========================================

pub const TITLE: &str = "MiniMart Receipt";
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %I:%M %p";
pub const TEMPLATE_NAME: &str = "receipt.typ.tera";
const FALLBACK_FILE_LABEL: &str = "Customer";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/receipt.typ.tera");

// Anything that is not a letter, digit, '-' or '_' is unsafe in a file name
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_-]+").expect("file name pattern"));

// Page geometry in points, measured from the top-left corner of a US Letter page
const LINE_HEIGHT: u32 = 20;
const TOP: u32 = 120; // below the logo band
const TITLE_X: u32 = 150;
const LEFT: u32 = 50;
const QTY_X: u32 = 250;
const PRICE_X: u32 = 350;
const RULE_LENGTH: u32 = 450;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("Order has not been confirmed yet")]
    NotConfirmed,
}

// ==========================================
// Receipt Data
// ==========================================

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub item: &'static str,
    pub quantity: u8,
    pub unit_price: u32,
    pub line_total: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DeliveryBlock {
    pub address: String,
    pub charge: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub customer_name: String,
    pub phone: Option<String>,
    pub timestamp: String,
    pub lines: Vec<ReceiptLine>,
    pub delivery: Option<DeliveryBlock>,
    pub delivery_charge: u32,
    pub grand_total: u32,
}

impl Receipt {
    /// Derives the receipt of a confirmed draft. `at` is the render time, not the confirmation time.
    pub fn build(
        draft: &OrderDraft,
        customer: &CustomerInfo,
        delivery: &DeliveryInfo,
        at: NaiveDateTime,
    ) -> Result<Self, ReceiptError> {
        if !draft.is_confirmed() {
            return Err(ReceiptError::NotConfirmed);
        }

        let lines: Vec<ReceiptLine> = draft
            .ordered_lines()
            .map(|l| ReceiptLine {
                item: l.item.name,
                quantity: l.quantity.get(),
                unit_price: l.item.unit_price,
                line_total: l.item.unit_price * l.quantity.get() as u32,
            })
            .collect();

        let delivery_charge = delivery.method.charge();
        let grand_total = delivery_charge + lines.iter().map(|l| l.line_total).sum::<u32>();

        let home = delivery.method == DeliveryMethod::HomeDelivery;
        let phone = if home { delivery.phone().map(str::to_string) } else { None };
        let delivery = home.then(|| DeliveryBlock {
            address: delivery.address().unwrap_or_default().to_string(),
            charge: delivery_charge,
        });

        Ok(Self {
            customer_name: customer.name.clone(),
            phone,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            lines,
            delivery,
            delivery_charge,
            grand_total,
        })
    }

    /// `Invoice_<customer>` without extension, keeping the name's case.
    ///
    /// Runs of unsafe characters become `_`. The fallback label is used when nothing
    /// usable is left, e.g. for a name made of spaces or punctuation.
    pub fn file_stem(&self) -> String {
        let cleaned = UNSAFE_FILE_CHARS.replace_all(&self.customer_name, "_");
        let cleaned = cleaned.trim_matches('_');
        if cleaned.is_empty() {
            format!("Invoice_{}", FALLBACK_FILE_LABEL)
        } else {
            format!("Invoice_{}", cleaned)
        }
    }

    pub fn layout(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        let mut y = TOP;

        marks.push(Mark::text(TITLE_X, y, FontStyle::Bold, 16, TITLE));
        y += 2 * LINE_HEIGHT;

        marks.push(Mark::body(LEFT, y, format!("Customer Name: {}", self.customer_name)));
        y += LINE_HEIGHT;
        if let Some(phone) = &self.phone {
            marks.push(Mark::body(LEFT, y, format!("Phone: {}", phone)));
            y += LINE_HEIGHT;
        }
        marks.push(Mark::body(LEFT, y, format!("Date & Time: {}", self.timestamp)));
        y += 2 * LINE_HEIGHT;

        marks.push(Mark::body(LEFT, y, "Item"));
        marks.push(Mark::body(QTY_X, y, "Qty"));
        marks.push(Mark::body(PRICE_X, y, "Price"));
        y += LINE_HEIGHT;
        marks.push(Mark::Rule { x: LEFT, y, length: RULE_LENGTH });
        y += LINE_HEIGHT;

        for line in &self.lines {
            marks.push(Mark::body(LEFT, y, line.item));
            marks.push(Mark::body(QTY_X, y, line.quantity.to_string()));
            marks.push(Mark::body(PRICE_X, y, format!("Rs. {}", line.line_total)));
            y += LINE_HEIGHT;
        }

        if let Some(delivery) = &self.delivery {
            y += LINE_HEIGHT;
            marks.push(Mark::body(LEFT, y, format!("Delivery Address: {}", delivery.address)));
            y += LINE_HEIGHT;
            marks.push(Mark::body(LEFT, y, format!("Delivery Charges: Rs. {}", delivery.charge)));
            y += LINE_HEIGHT;
        }

        y += LINE_HEIGHT;
        marks.push(Mark::body(LEFT, y, format!("Total Amount: Rs. {}", self.grand_total)));
        y += 2 * LINE_HEIGHT;
        marks.push(Mark::body(LEFT, y, "Thanks for shopping with us!"));
        y += 2 * LINE_HEIGHT;

        marks.push(Mark::text(LEFT, y, FontStyle::Oblique, 10, "🍭 MiniMart - Fresh & Fast"));
        y += LINE_HEIGHT;
        marks.push(Mark::text(
            LEFT,
            y,
            FontStyle::Oblique,
            10,
            "Email: omprince31@gmail.com | Phone: +92-349-3738149",
        ));

        marks
    }

    /// Renders the document source. Same receipt in, same bytes out.
    pub fn render(&self, tera: &Tera) -> Result<String, tera::Error> {
        let context = Context::from_serialize(ReceiptContext {
            receipt: self,
            marks: self.layout(),
        })?;
        tera.render(TEMPLATE_NAME, &context)
    }
}

// ==========================================
// Layout Primitives
// ==========================================

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

/// One thing drawn at a fixed position on the page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mark {
    Text {
        x: u32,
        y: u32,
        style: FontStyle,
        size: u32,
        text: String,
    },
    Rule {
        x: u32,
        y: u32,
        length: u32,
    },
}

impl Mark {
    fn text(x: u32, y: u32, style: FontStyle, size: u32, text: impl Into<String>) -> Self {
        Mark::Text { x, y, style, size, text: text.into() }
    }

    fn body(x: u32, y: u32, text: impl Into<String>) -> Self {
        Mark::text(x, y, FontStyle::Regular, 12, text)
    }

    pub fn y(&self) -> u32 {
        match self {
            Mark::Text { y, .. } | Mark::Rule { y, .. } => *y,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Mark::Text { text, .. } => Some(text),
            Mark::Rule { .. } => None,
        }
    }
}

#[derive(Serialize)]
struct ReceiptContext<'a> {
    receipt: &'a Receipt,
    marks: Vec<Mark>,
}

// ==========================================
// Template Engine
// ==========================================

/// Tera with the built-in receipt template, or `override_file` in its place when it exists.
pub fn template_engine(override_file: Option<&Path>) -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.register_filter("typst_str", typst_str);
    match override_file.filter(|p| p.exists()) {
        Some(path) => tera.add_template_file(path, Some(TEMPLATE_NAME))?,
        None => tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?,
    }
    Ok(tera)
}

// Escapes a value for use inside a Typst string literal
fn typst_str(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    Ok(Value::String(out))
}
