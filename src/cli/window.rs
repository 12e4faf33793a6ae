//! Window commands: create, list, focus, rename, close, forget, reconcile

use anyhow::Result;

use termtag::WindowId;
use termtag::manager::{ManagerError, WindowManager};

/// Open a new terminal window at `folder` and map it to `name`.
pub async fn create_command(manager: &WindowManager, name: &str, folder: &str) -> Result<()> {
    let id = manager.create_window(name, folder).await?;
    println!("Created window {} -> {} ({})", id, name, folder);
    Ok(())
}

/// List currently open windows as the terminal application reports them.
pub async fn list_command(manager: &WindowManager) -> Result<()> {
    let windows = manager.list_windows().await?;

    if windows.is_empty() {
        println!("No terminals open.");
        return Ok(());
    }

    for window in windows {
        println!("  {:>8}  {}", window.id, window.title);
    }
    Ok(())
}

/// Show the stored window mappings, flagging dangling ones.
pub fn mappings_command(manager: &WindowManager) -> Result<()> {
    let mappings = manager.store().load_windows();

    if mappings.is_empty() {
        println!("No window mappings stored.");
        return Ok(());
    }

    for (id, mapping) in mappings {
        let marker = if mapping.dangling { " [dangling]" } else { "" };
        println!("  {:>8}  {}  {}{}", id, mapping.name, mapping.folder_path, marker);
    }
    Ok(())
}

pub async fn focus_command(manager: &WindowManager, id: &str) -> Result<()> {
    let id = WindowId::new(id)?;
    match manager.focus(&id).await {
        Ok(()) => println!("Focused window {}", id),
        Err(ManagerError::WindowNotFound(id)) => {
            eprintln!("No open window with id {} (mapping flagged dangling)", id);
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

pub async fn rename_command(manager: &WindowManager, id: &str, name: &str) -> Result<()> {
    let id = WindowId::new(id)?;
    match manager.rename(&id, name).await {
        Ok(()) => println!("Renamed window {} to {}", id, name),
        Err(ManagerError::WindowNotFound(id)) => {
            eprintln!("No open window with id {} (mapping flagged dangling)", id);
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

pub async fn close_command(manager: &WindowManager, id: &str) -> Result<()> {
    let id = WindowId::new(id)?;
    match manager.close(&id).await {
        Ok(()) => println!("Closed window {} (mapping kept; use forget to drop it)", id),
        Err(ManagerError::WindowNotFound(id)) => {
            eprintln!("No open window with id {} (mapping flagged dangling)", id);
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

pub fn forget_command(manager: &WindowManager, id: &str) -> Result<()> {
    let id = WindowId::new(id)?;
    if manager.forget(&id)? {
        println!("Forgot mapping for window {}", id);
    } else {
        println!("No mapping stored for window {}", id);
    }
    Ok(())
}

/// Prune mappings whose window no longer exists.
pub async fn reconcile_command(manager: &WindowManager) -> Result<()> {
    let pruned = manager.reconcile().await?;

    if pruned.is_empty() {
        println!("All mappings refer to open windows.");
    } else {
        for id in &pruned {
            println!("Pruned mapping for window {}", id);
        }
        println!("Pruned {} mapping(s).", pruned.len());
    }
    Ok(())
}
