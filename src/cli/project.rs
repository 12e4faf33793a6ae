//! Recent-project list command

use anyhow::Result;

use termtag::manager::WindowManager;

/// Show the recent project list, most recently used first.
pub fn projects_command(manager: &WindowManager) -> Result<()> {
    let projects = manager.store().load_projects();

    if projects.is_empty() {
        println!("No recent projects.");
        return Ok(());
    }

    for project in projects {
        println!(
            "  {}  {}  (last used {})",
            project.name,
            project.path,
            project.last_used.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
