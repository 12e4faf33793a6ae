//! Bulk naming-scheme command

use anyhow::Result;

use termtag::NamingScheme;
use termtag::manager::WindowManager;

/// Rename every open window in listing order per `scheme`.
pub async fn apply_command(manager: &WindowManager, scheme: NamingScheme) -> Result<()> {
    let applied = manager.apply_naming_scheme(scheme).await?;

    for (id, label) in &applied {
        println!("  {:>8}  ->  {}", id, label);
    }
    println!("Renamed {} window(s).", applied.len());
    Ok(())
}
