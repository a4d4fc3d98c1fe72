pub mod candidates;
pub mod open;
pub mod version;

use miette::{IntoDiagnostic, Result};
use tfmap_core::ModuleSetting;

/// Single-threaded runtime the actions run on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Print `value` as one pretty JSON object on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

/// Display name of the module at `index`.
pub(crate) fn module_name(modules: &[ModuleSetting], index: usize) -> String {
    modules
        .get(index)
        .map_or_else(|| format!("module #{index}"), |m| m.display_name(index))
}
