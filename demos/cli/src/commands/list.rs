use std::sync::Arc;

use weft::Buildable;

use crate::commands::Command;
use crate::domain::ValueRepo;

#[derive(Buildable)]
pub struct ListCommand {
    repo: Arc<dyn ValueRepo>,
}

#[async_trait::async_trait]
impl Command for ListCommand {
    async fn run(&self) -> std::io::Result<()> {
        eprintln!("Value: {}", self.repo.get()?);
        Ok(())
    }
}
