//! Companion automation tool commands

use std::path::Path;

use anyhow::Result;

use termtag::companion::CompanionTool;

pub async fn status_command(tool: &CompanionTool) -> Result<()> {
    if tool.is_running().await {
        println!("Companion ({}) is running.", tool.binary().display());
    } else {
        println!("Companion ({}) is not running.", tool.binary().display());
    }
    Ok(())
}

pub fn screenshot_command(tool: &CompanionTool) -> Result<()> {
    tool.screenshot_to_terminal()?;
    println!("Requested screenshot capture.");
    Ok(())
}

pub fn send_file_command(tool: &CompanionTool, path: &Path) -> Result<()> {
    tool.send_file(path)?;
    println!("Requested file transfer: {}", path.display());
    Ok(())
}

pub fn capture_output_command(tool: &CompanionTool) -> Result<()> {
    tool.capture_output()?;
    println!("Requested terminal output capture.");
    Ok(())
}

pub fn toggle_focus_command(tool: &CompanionTool) -> Result<()> {
    tool.toggle_focus_indicators()?;
    println!("Toggled focus indicators.");
    Ok(())
}
