use std::sync::Arc;

use weft::{InjectionError, Injector, ParamInfo, Signature, TypeInfo};

use crate::commands::Command;
use crate::domain::ValueRepo;

pub struct AddCommand {
    repo: Arc<dyn ValueRepo>,
    value: i32,
}

impl AddCommand {
    /// Registers `AddCommand` as an assisted factory: `repo` is resolved from
    /// the container, `value` is supplied by the caller at build time (the
    /// CLI's `--value` argument), so a missing argument is a compile-time
    /// mismatch in `main.rs` rather than a runtime DI error.
    pub fn signature() -> Signature {
        Signature::new(
            TypeInfo::of::<AddCommand>(),
            vec![
                ParamInfo::injected(TypeInfo::of::<dyn ValueRepo>()),
                ParamInfo::assisted(TypeInfo::of::<i32>()),
            ],
        )
    }

    pub fn construct(injector: &Injector, mut args: Vec<Box<dyn std::any::Any>>) -> Result<Self, InjectionError> {
        let value = *args.remove(0).downcast::<i32>().unwrap();
        Ok(Self {
            repo: injector.get::<dyn ValueRepo>()?,
            value,
        })
    }
}

#[async_trait::async_trait]
impl Command for AddCommand {
    async fn run(&self) -> std::io::Result<()> {
        let old = self.repo.get()?;
        let new = old + self.value;
        self.repo.set(new)?;

        eprintln!("{} add {} equals {}", old, self.value, new);
        Ok(())
    }
}
