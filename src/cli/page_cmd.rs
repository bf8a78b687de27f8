//! Page CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::PageId;
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum PageCommands {
    /// List all pages
    List,

    /// Create a new page
    New {
        /// Page name; the ID is derived from it
        name: String,
    },

    /// Delete a page
    Delete {
        /// Page ID
        id: String,
    },
}

pub fn run(cmd: PageCommands, workspace: &Workspace, output: &Output) -> Result<()> {
    match cmd {
        PageCommands::List => list_pages(workspace, output),
        PageCommands::New { name } => new_page(workspace, output, &name),
        PageCommands::Delete { id } => delete_page(workspace, output, &id),
    }
}

fn list_pages(workspace: &Workspace, output: &Output) -> Result<()> {
    let store = workspace.page_store()?;
    let pages: Vec<_> = store
        .page_ids()
        .into_iter()
        .map(|id| {
            let lines = store
                .content_of(&id)
                .map(|content| content.split('\n').count())
                .unwrap_or(0);
            (id, lines)
        })
        .collect();

    if output.is_json() {
        let items: Vec<_> = pages
            .iter()
            .map(|(id, lines)| {
                serde_json::json!({
                    "id": id,
                    "title": id.title(),
                    "lines": lines,
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<24} {:<24} LINES", "ID", "TITLE");
        println!("{}", "-".repeat(56));
        for (id, lines) in pages {
            println!("{:<24} {:<24} {}", id.as_str(), id.title(), lines);
        }
    }

    Ok(())
}

fn new_page(workspace: &Workspace, output: &Output, name: &str) -> Result<()> {
    let mut store = workspace.page_store()?;
    let id = store.create(name)?;
    output.verbose_ctx("page", &format!("Created page {} from '{}'", id, name));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "title": id.title(),
            "content": store.document().to_text(),
        }));
    } else {
        output.success(&format!("Created page: {}", id));
    }

    Ok(())
}

fn delete_page(workspace: &Workspace, output: &Output, id: &str) -> Result<()> {
    let mut store = workspace.page_store()?;
    let id = PageId::normalize(id)?;

    if !store.delete(&id)? {
        bail!("Page not found: {}", id);
    }

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "deleted": true }));
    } else {
        output.success(&format!("Deleted page: {}", id));
    }

    Ok(())
}
