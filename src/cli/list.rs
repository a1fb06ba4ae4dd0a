//! List CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{ListId, ToDoList};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a new list
    Add {
        /// List title
        title: String,
    },

    /// Show all lists
    Ls,

    /// Show a list and its tasks
    Show {
        /// List ID (e.g. tl-1)
        id: String,
    },

    /// Show the most recently added list
    Last,

    /// Change a list's title
    Rename {
        /// List ID
        id: String,

        /// New title
        title: String,
    },

    /// Delete a list and all of its tasks
    #[command(alias = "rm")]
    Delete {
        /// List ID
        id: String,
    },
}

pub fn run(cmd: ListCommands, output: &Output) -> Result<()> {
    match cmd {
        ListCommands::Add { title } => add_list(output, &title),
        ListCommands::Ls => list_lists(output),
        ListCommands::Show { id } => show_list(output, &id),
        ListCommands::Last => last_list(output),
        ListCommands::Rename { id, title } => rename_list(output, &id, &title),
        ListCommands::Delete { id } => delete_list(output, &id),
    }
}

/// Prints a list header and its tasks as text
fn print_list(list: &ToDoList) {
    let (done, total) = list.progress();
    println!("{}  {} ({}/{})", list.id, list.title, done, total);
    for task in &list.tasks {
        let mark = if task.has_done { "x" } else { " " };
        println!("  [{}] {:<8} {}", mark, task.id.to_string(), task.text);
    }
}

fn add_list(output: &Output, title: &str) -> Result<()> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        "list",
        &format!("Using id scheme: {}", project.config().project.id_scheme.as_str()),
    );

    let list = project.store().update(|c| Ok(c.add(title)?.clone()))?;

    if output.is_json() {
        output.data(&list);
    } else {
        output.success(&format!("Created list: {} - {}", list.id, list.title));
    }

    Ok(())
}

fn list_lists(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let collection = project.store().read()?;
    output.verbose_ctx("list", &format!("Read {} list(s)", collection.len()));

    if output.is_json() {
        output.data(&collection);
    } else if collection.is_empty() {
        println!("No lists yet. Create one with 'todo list add <title>'.");
    } else {
        println!("{:<8} {:<8} TITLE", "ID", "DONE");
        println!("{}", "-".repeat(50));
        for list in collection.lists() {
            let (done, total) = list.progress();
            println!("{:<8} {:<8} {}", list.id.to_string(), format!("{}/{}", done, total), list.title);
        }
    }

    Ok(())
}

fn show_list(output: &Output, id: &str) -> Result<()> {
    let list_id: ListId = id.trim().parse()?;
    let project = Project::open_current()?;
    let collection = project.store().read()?;

    let list = collection
        .get(&list_id)
        .ok_or_else(|| anyhow::anyhow!("To-do list not found: {}", list_id))?;

    if output.is_json() {
        output.data(list);
    } else {
        print_list(list);
    }

    Ok(())
}

fn last_list(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let collection = project.store().read()?;
    let last = collection.last_to_do_list();

    if output.is_json() {
        output.data(&last);
    } else {
        match last {
            Some(list) => print_list(list),
            None => println!("No lists yet."),
        }
    }

    Ok(())
}

fn rename_list(output: &Output, id: &str, title: &str) -> Result<()> {
    let list_id: ListId = id.trim().parse()?;
    let project = Project::open_current()?;

    let list = project
        .store()
        .update(|c| Ok(c.change_to_do_list_title(&list_id, title)?.clone()))?;

    if output.is_json() {
        output.data(&list);
    } else {
        output.success(&format!("Renamed list {} to {}", list.id, list.title));
    }

    Ok(())
}

fn delete_list(output: &Output, id: &str) -> Result<()> {
    let list_id: ListId = id.trim().parse()?;
    let project = Project::open_current()?;

    let list = project.store().update(|c| Ok(c.delete(&list_id)?))?;
    output.verbose_ctx("list", &format!("Removed {} task(s) with the list", list.tasks.len()));

    if output.is_json() {
        output.data(&list);
    } else {
        output.success(&format!("Deleted list: {} - {}", list.id, list.title));
    }

    Ok(())
}
