use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::config::AppSettings;
use crate::error::{AppError, Result};
use crate::receipt::{template_engine, Receipt};

#[derive(Debug)]
pub struct SavedReceipt {
    pub source: PathBuf,
    pub pdf: Option<PathBuf>,
}

/// Writes `<receipts>/<year>/Invoice_<name>.typ` and, when `compile` is set, builds the PDF next to it.
/// Earlier receipts for the same customer are overwritten.
pub fn save_receipt(
    settings: &AppSettings,
    receipt: &Receipt,
    year: i32,
    compile: bool,
) -> Result<SavedReceipt> {
    let tera = template_engine(Some(&settings.template_override()))?;
    let rendered = receipt.render(&tera)?;

    let output_dir = settings.receipts_dir(year);
    fs::create_dir_all(&output_dir)?;

    let stem = receipt.file_stem();
    let typ_path = output_dir.join(format!("{}.typ", stem));
    fs::write(&typ_path, rendered)?;
    debug!(path = ?typ_path, "receipt source written");

    if !compile {
        return Ok(SavedReceipt { source: typ_path, pdf: None });
    }

    let pdf_path = output_dir.join(format!("{}.pdf", stem));
    compile_pdf(&settings.typst_bin, &typ_path, &pdf_path)?;
    Ok(SavedReceipt { source: typ_path, pdf: Some(pdf_path) })
}

fn compile_pdf(typst_bin: &str, typ_path: &Path, pdf_path: &Path) -> Result<()> {
    if Command::new(typst_bin).arg("--version").output().is_err() {
        return Err(AppError::CompilerMissing(typst_bin.to_string(), typ_path.to_path_buf()));
    }

    match Command::new(typst_bin).arg("compile").arg(typ_path).arg(pdf_path).status() {
        Ok(s) if s.success() => {
            info!(path = ?pdf_path, "receipt compiled");
            Ok(())
        }
        _ => Err(AppError::CompileFailed(typ_path.to_path_buf())),
    }
}

// Open file and reveal in Finder/Explorer
pub fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(format!("/select,{}", path.to_string_lossy())).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerInfo, DeliveryInfo, Quantity};
    use crate::order::Session;
    use chrono::NaiveDate;

    fn settings_in(tag: &str) -> AppSettings {
        let root = std::env::temp_dir().join(format!("minimart-{}-{}", tag, std::process::id()));
        AppSettings {
            output_root: root.to_string_lossy().to_string(),
            typst_bin: "minimart-no-such-compiler".into(),
            open_after_render: false,
        }
    }

    fn receipt() -> Receipt {
        let mut session = Session::new();
        session.customer = CustomerInfo::new("Alice");
        session.delivery = DeliveryInfo::pickup();
        session.draft.set_quantity("Pizza", Quantity::try_from(2u8).unwrap()).unwrap();
        session.confirm().unwrap();
        let at = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap().and_hms_opt(20, 0, 0).unwrap();
        session.receipt(at).unwrap()
    }

    #[test]
    fn source_only_skips_compiler() {
        let settings = settings_in("source");
        let saved = save_receipt(&settings, &receipt(), 2025, false).unwrap();
        assert!(saved.pdf.is_none());
        assert!(saved.source.ends_with("receipts/2025/Invoice_Alice.typ"));
        let text = fs::read_to_string(&saved.source).unwrap();
        assert!(text.contains("Total Amount: Rs. 700"));
        fs::remove_dir_all(settings.root()).ok();
    }

    #[test]
    fn missing_compiler_keeps_source() {
        let settings = settings_in("nocompiler");
        let err = save_receipt(&settings, &receipt(), 2025, true).unwrap_err();
        match err {
            AppError::CompilerMissing(bin, path) => {
                assert_eq!(bin, "minimart-no-such-compiler");
                assert!(path.exists());
            }
            other => panic!("unexpected error: {other}"),
        }
        fs::remove_dir_all(settings.root()).ok();
    }

    #[test]
    fn template_override_is_used() {
        let settings = settings_in("override");
        let override_file = settings.template_override();
        fs::create_dir_all(override_file.parent().unwrap()).unwrap();
        fs::write(&override_file, "custom {{ receipt.grand_total }}").unwrap();

        let saved = save_receipt(&settings, &receipt(), 2025, false).unwrap();
        assert_eq!(fs::read_to_string(&saved.source).unwrap(), "custom 700");
        fs::remove_dir_all(settings.root()).ok();
    }
}
