mod add;
mod list;

pub use add::*;
pub use list::*;

#[async_trait::async_trait]
pub trait Command: Send + Sync {
    async fn run(&self) -> std::io::Result<()>;
}
