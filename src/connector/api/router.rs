use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ListController, RemoveController};

pub struct Router<'a> {
    list_controller: ListController<'a>,
    remove_controller: RemoveController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            list_controller: ListController::new(container),
            remove_controller: RemoveController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::List { format, sort } => self.list_controller.list(format, sort.into()).await,
            Commands::Remove { uuid } => self.remove_controller.remove(uuid).await,
            Commands::Watch { .. } => unreachable!("watch is handled separately in main"),
        }
    }
}
