//! Task CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{ListId, Task, TaskId};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a list
    ///
    /// Examples:
    ///   todo task add tl-1 "Maths"
    Add {
        /// List ID
        list: String,

        /// Task text
        text: String,
    },

    /// Show the last task of a list
    Last {
        /// List ID
        list: String,
    },

    /// Flip a task between done and not done
    Toggle {
        /// List ID
        list: String,

        /// Task ID (e.g. task-2)
        task: String,
    },

    /// Change a task's text
    Edit {
        /// List ID
        list: String,

        /// Task ID
        task: String,

        /// New text
        text: String,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// List ID
        list: String,

        /// Task ID
        task: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add { list, text } => add_task(output, &list, &text),
        TaskCommands::Last { list } => last_task(output, &list),
        TaskCommands::Toggle { list, task } => toggle_task(output, &list, &task),
        TaskCommands::Edit { list, task, text } => edit_task(output, &list, &task, &text),
        TaskCommands::Delete { list, task } => delete_task(output, &list, &task),
    }
}

fn parse_ids(list: &str, task: &str) -> Result<(ListId, TaskId)> {
    Ok((list.trim().parse()?, task.trim().parse()?))
}

fn report(output: &Output, task: &Task, message: String) {
    if output.is_json() {
        output.data(task);
    } else {
        output.success(&message);
    }
}

fn add_task(output: &Output, list: &str, text: &str) -> Result<()> {
    let list_id: ListId = list.trim().parse()?;
    let project = Project::open_current()?;

    let task = project
        .store()
        .update(|c| Ok(c.add_task(&list_id, text)?.clone()))?;

    report(output, &task, format!("Created task: {} - {}", task.id, task.text));
    Ok(())
}

fn last_task(output: &Output, list: &str) -> Result<()> {
    let list_id: ListId = list.trim().parse()?;
    let project = Project::open_current()?;
    let collection = project.store().read()?;

    let last = collection.get_last_task(&list_id)?;

    if output.is_json() {
        output.data(&last);
    } else {
        match last {
            Some(task) => {
                let mark = if task.has_done { "x" } else { " " };
                println!("[{}] {} {}", mark, task.id, task.text);
            }
            None => println!("No tasks in {}.", list_id),
        }
    }

    Ok(())
}

fn toggle_task(output: &Output, list: &str, task: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list, task)?;
    let project = Project::open_current()?;

    let task = project
        .store()
        .update(|c| Ok(c.toggle_task_status(&list_id, &task_id)?.clone()))?;
    output.verbose_ctx("task", &format!("{} done: {}", task.id, task.has_done));

    let state = if task.has_done { "done" } else { "not done" };
    report(output, &task, format!("Marked {} as {}", task.id, state));
    Ok(())
}

fn edit_task(output: &Output, list: &str, task: &str, text: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list, task)?;
    let project = Project::open_current()?;

    let task = project
        .store()
        .update(|c| Ok(c.change_task_text(&list_id, &task_id, text)?.clone()))?;

    report(output, &task, format!("Updated task: {} - {}", task.id, task.text));
    Ok(())
}

fn delete_task(output: &Output, list: &str, task: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list, task)?;
    let project = Project::open_current()?;

    let task = project
        .store()
        .update(|c| Ok(c.delete_task(&list_id, &task_id)?))?;

    report(output, &task, format!("Deleted task: {} - {}", task.id, task.text));
    Ok(())
}
