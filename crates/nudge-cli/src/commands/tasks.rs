//! Direct task store operations.

use super::open_store;
use crate::TasksAction;
use anyhow::Result;
use nudge_core::task::TaskRepository;
use std::path::Path;

pub async fn run(owner: i64, db: Option<&Path>, action: TasksAction) -> Result<()> {
    let store = open_store(db)?;

    match action {
        TasksAction::List => {
            let tasks = store.list_with_id(owner).await?;
            if tasks.is_empty() {
                println!("no tasks for owner {owner}");
                return Ok(());
            }
            for task in tasks {
                println!("{:>4}  {} - {}", task.id, task.time_phrase, task.description);
            }
        }
        TasksAction::Count => {
            println!("{}", store.count(owner).await?);
        }
        TasksAction::Clear => {
            println!("deleted {} task(s)", store.clear(owner).await?);
        }
        TasksAction::Delete { id } => {
            if store.delete_one(owner, id).await? {
                println!("deleted task {id}");
            } else {
                println!("no task {id} for owner {owner}");
            }
        }
        TasksAction::Stats => {
            let stats = store.stats().await?;
            println!(
                "{} task(s) across {} owner(s)",
                stats.total_tasks, stats.unique_owners
            );
        }
    }

    Ok(())
}
