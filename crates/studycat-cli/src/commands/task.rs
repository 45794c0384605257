//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studycat_core::{NewTask, Operation, Subject};

use super::{open_store, print_json, report, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task name
        name: String,
        /// Subject (math, english, science, history, geography, other or any custom name)
        #[arg(long, default_value = "other")]
        subject: Subject,
        /// Due date as YYYY-MM-DD (default: today)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Priority 1-5 (default: 3)
        #[arg(long, default_value = "3")]
        priority: u8,
    },
    /// Mark a task completed and earn catcoins
    Complete {
        /// Task ID
        id: String,
    },
    /// Mark a task not completed and return its catcoins
    Uncomplete {
        /// Task ID
        id: String,
    },
    /// List tasks
    List {
        /// Only show tasks that are not completed
        #[arg(long)]
        pending: bool,
        /// Filter by subject
        #[arg(long)]
        subject: Option<Subject>,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let (mut store, _) = open_store()?;

    match action {
        TaskAction::Add {
            name,
            subject,
            due,
            priority,
        } => {
            let due_date = due.unwrap_or_else(|| store.clock().today());
            let applied = store.apply(Operation::AddTask(NewTask {
                name,
                subject,
                due_date,
                priority,
            }));
            report(&applied)?;
        }
        TaskAction::Complete { id } => {
            report(&store.apply(Operation::CompleteTask { id }))?;
        }
        TaskAction::Uncomplete { id } => {
            report(&store.apply(Operation::UncompleteTask { id }))?;
        }
        TaskAction::List { pending, subject } => {
            let state = store.state();
            let tasks: Vec<_> = state
                .tasks
                .iter()
                .filter(|t| !pending || !t.completed)
                .filter(|t| subject.as_ref().map_or(true, |s| &t.subject == s))
                .collect();
            print_json(&tasks)?;
        }
    }

    Ok(())
}
