use comfy_table::{Attribute, Cell, Color, Table};

use crate::catalog;
use crate::model::{DeliveryMethod, MAX_QUANTITY};
use crate::order::Session;
use crate::validate::ValidationError;

const RED: Color = Color::Rgb { r: 185, g: 28, b: 28 };
const GREEN: Color = Color::Rgb { r: 4, g: 120, b: 87 };

pub const ORDER_PLACED: &str = "Your order has been placed!";

pub const FOOTER: [&str; 5] = [
    "♡ Made with ❤️ by MiniMart Team | ☎️ Contact: minimart@example.com",
    "💬 WhatsApp: +92-342-3471098",
    "➤ Follow us on 📸 Instagram: https://www.instagram.com/minimart | ⓕ Facebook: https://www.facebook.com/minimart",
    "🌐 Visit our website: https://www.minimart.com",
    "✓ since © 2025 My Portfolio. All rights reserved.",
];

pub fn menu_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new("Category"), Cell::new("Item"), Cell::new("Price")]);

    for (category, items) in catalog::categories() {
        for (idx, item) in items.iter().enumerate() {
            // category only on its first row
            let label = if idx == 0 { category } else { "" };
            table.add_row(vec![
                Cell::new(label).add_attribute(Attribute::Bold),
                Cell::new(item.name),
                Cell::new(format!("Rs. {}", item.unit_price)),
            ]);
        }
    }
    table
}

pub fn print_menu() {
    println!("\n--- 🛍️ MiniMart Menu ---");
    println!("{}", menu_table());
}

/// Current draft with running totals, shown before the order is placed.
pub fn order_table(session: &Session) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Item"),
        Cell::new("Qty"),
        Cell::new("Rate"),
        Cell::new("Amount"),
    ]);

    for line in session.draft.ordered_lines() {
        let qty = line.quantity.get() as u32;
        table.add_row(vec![
            Cell::new(line.item.name),
            Cell::new(qty),
            Cell::new(format!("Rs. {}", line.item.unit_price)),
            Cell::new(format!("Rs. {}", line.item.unit_price * qty)),
        ]);
    }

    let charge = session.delivery.method.charge();
    if session.delivery.method == DeliveryMethod::HomeDelivery {
        table.add_row(vec![
            Cell::new("Delivery Charges"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(format!("Rs. {}", charge)),
        ]);
    }

    let total_qty = session.draft.total_quantity();
    let qty_cell = Cell::new(total_qty).add_attribute(Attribute::Bold);
    let qty_cell = if total_qty > MAX_QUANTITY as u32 || total_qty == 0 {
        qty_cell.fg(RED)
    } else {
        qty_cell.fg(GREEN)
    };

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        qty_cell,
        Cell::new(""),
        Cell::new(format!("Rs. {}", session.draft.subtotal() + charge)).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_order(session: &Session) {
    println!("\n--- 🧾 Order for {} ({}) ---", display_name(&session.customer.name), session.delivery.method);
    println!("{}", order_table(session));
}

pub fn print_footer() {
    println!("\n---");
    for line in FOOTER {
        println!("{}", line);
    }
}

pub fn print_validation(err: ValidationError) {
    if err.is_error() {
        println!("❌ {}", err);
    } else {
        println!("⚠️  {}", err);
    }
}

fn display_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() { "(no name)" } else { trimmed }
}
