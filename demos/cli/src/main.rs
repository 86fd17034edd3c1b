mod cli;
mod commands;
mod domain;
mod infra;

use std::sync::Arc;

use clap::Parser as _;
use commands::{AddCommand, Command, ListCommand};
use weft::{Injector, Partial};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = cli::Cli::parse();

    // Dependencies available to every command. A real app with per-command
    // scoping needs (a DB transaction, a request-scoped auth subject) would
    // seal one Component per need; this demo only has the one.
    let component = Partial::new()
        .bind_instance(infra::ValueRepoPath("./state.txt".into()))
        .add::<infra::ValueRepoImpl>()
        .bind::<dyn domain::ValueRepo, infra::ValueRepoImpl>()
        .add_factory::<AddCommand>(AddCommand::signature(), AddCommand::construct)
        .add::<ListCommand>()
        .seal()
        .expect("command wiring should always seal");

    let injector = Injector::new(component);

    // Command builders are forced to pass explicit arguments for the parts
    // the CLI itself supplies, so a missing argument is caught here instead
    // of surfacing as a runtime DI error.
    let command: Arc<dyn Command> = match args.command {
        cli::Command::Add(add) => injector.get_factory::<AddCommand>().unwrap().build1(add.value).unwrap(),
        cli::Command::List(_list) => injector.get::<ListCommand>().unwrap(),
    };

    command.run().await
}
