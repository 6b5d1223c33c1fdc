use chrono::{Datelike, Local};
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};

use crate::catalog;
use crate::config::AppSettings;
use crate::error::{AppError, Result};
use crate::model::{DeliveryInfo, DeliveryMethod, Quantity, MAX_QUANTITY};
use crate::order::{OrderDraft, Session};
use crate::output::{self, open_and_reveal};
use crate::report;

// ==========================================
// Actions
// ==========================================

const PLACE_OPT: &str = "✅ Place Order";
const EDIT_ITEMS_OPT: &str = "📜 Edit Items";
const EDIT_CUSTOMER_OPT: &str = "🧑‍💼 Edit Customer Info";
const RESET_OPT: &str = "♻️ Reset";
const DOWNLOAD_OPT: &str = "📄 Download Receipt (PDF)";
const QUIT_OPT: &str = "🚪 Quit";

/// One customer at the counter: fill the form, then place, edit, reset or print until they leave.
pub fn run_session(settings: &AppSettings) -> Result<()> {
    let mut session = Session::new();

    println!("\n🛍️ MiniMart - 🍏 Fresh & Fast");
    edit_customer(&mut session)?;
    edit_items(&mut session.draft)?;

    loop {
        let mut options = vec![PLACE_OPT, EDIT_ITEMS_OPT, EDIT_CUSTOMER_OPT, RESET_OPT];
        if session.draft.is_confirmed() {
            options.push(DOWNLOAD_OPT);
        }
        options.push(QUIT_OPT);

        match Select::new("What would you like to do?", options).prompt()? {
            PLACE_OPT => place(&mut session),
            EDIT_ITEMS_OPT => edit_items(&mut session.draft)?,
            EDIT_CUSTOMER_OPT => edit_customer(&mut session)?,
            RESET_OPT => {
                session.reset();
                println!("♻️  Order cleared.");
            }
            DOWNLOAD_OPT => download_receipt(settings, &session)?,
            _ => break,
        }
    }
    report::print_footer();
    Ok(())
}

fn place(session: &mut Session) {
    report::print_order(session);
    match session.confirm() {
        Ok(()) => println!("✅ {}", report::ORDER_PLACED),
        Err(e) => report::print_validation(e),
    }
}

fn download_receipt(settings: &AppSettings, session: &Session) -> Result<()> {
    // fresh timestamp on every download
    let now = Local::now().naive_local();
    let receipt = session.receipt(now)?;

    println!("\n🔨 Compiling PDF...");
    match output::save_receipt(settings, &receipt, now.year(), true) {
        Ok(saved) => {
            if let Some(pdf) = saved.pdf {
                println!("✅ PDF Generated: {:?}", pdf);
                if settings.open_after_render {
                    open_and_reveal(&pdf);
                }
            }
            Ok(())
        }
        Err(e @ (AppError::CompilerMissing(..) | AppError::CompileFailed(_))) => {
            println!("❌ {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// ==========================================
// Form Fields
// ==========================================

fn edit_customer(session: &mut Session) -> Result<()> {
    println!("\n--- 🧑‍💼 Customer Info ---");
    session.customer.name = Text::new("Enter your name:")
        .with_default(&session.customer.name)
        .prompt()?;

    println!("\n--- 🚚 Delivery Options ---");
    let cursor = DeliveryMethod::ALL
        .iter()
        .position(|m| *m == session.delivery.method)
        .unwrap_or(0);
    let method = Select::new("Select Delivery Method:", DeliveryMethod::ALL.to_vec())
        .with_starting_cursor(cursor)
        .prompt()?;

    session.delivery = match method {
        DeliveryMethod::Pickup => DeliveryInfo::pickup(),
        DeliveryMethod::HomeDelivery => {
            let phone = Text::new("📞 Enter Cell Phone Number:")
                .with_default(session.delivery.phone.as_deref().unwrap_or_default())
                .prompt()?;
            let address = Text::new("🏠 Enter Delivery Address:")
                .with_default(session.delivery.address.as_deref().unwrap_or_default())
                .prompt()?;
            let info = DeliveryInfo::home(phone, address);
            if info.address().is_none() {
                println!("⚠️  Please provide your address for home delivery.");
            }
            info
        }
    };
    Ok(())
}

fn edit_items(draft: &mut OrderDraft) -> Result<()> {
    println!("\n--- 📜 Select Your Items (0-{} each) ---", MAX_QUANTITY);
    for (category, items) in catalog::categories() {
        println!("\n{}", category);
        for item in items {
            let current = draft.quantity(item.name)?;
            let label = format!("{} (Rs. {})", item.name, item.unit_price);
            let picked = CustomType::<u8>::new(&label)
                .with_default(current.get())
                .with_validator(quantity_in_range)
                .with_error_message("Please type a whole number")
                .prompt()?;
            draft.set_quantity(item.name, Quantity::try_from(picked)?)?;
        }
    }
    Ok(())
}

fn quantity_in_range(value: &u8) -> std::result::Result<Validation, CustomUserError> {
    Ok(match Quantity::try_from(*value) {
        Ok(_) => Validation::Valid,
        Err(e) => Validation::Invalid(e.to_string().into()),
    })
}
