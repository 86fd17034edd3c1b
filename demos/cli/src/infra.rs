use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use weft::Buildable;

use crate::domain::ValueRepo;

pub struct ValueRepoPath(pub PathBuf);

#[derive(Buildable)]
pub struct ValueRepoImpl {
    path: Arc<ValueRepoPath>,
}

impl ValueRepo for ValueRepoImpl {
    fn get(&self) -> std::io::Result<i32> {
        let mut contents = String::new();
        match std::fs::File::open(&self.path.0) {
            Ok(mut file) => {
                file.read_to_string(&mut contents)?;
                Ok(contents.trim().parse().unwrap_or(0))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn set(&self, value: i32) -> std::io::Result<()> {
        let mut file = std::fs::File::create(&self.path.0)?;
        write!(file, "{value}")
    }
}
