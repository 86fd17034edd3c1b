use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// One step of a resolution path: `dependant` was being constructed and
/// needed `dependency`.
#[derive(Clone, Debug)]
struct Frame {
    dependant: TypeInfo,
    dependency: TypeInfo,
}

/// The chain of types under construction at the moment a dependency could
/// not be resolved, from the outermost `Injector::get` call down to the
/// type that was actually missing. Built from the injector's live
/// construction stack, not threaded by hand through every call site, so it
/// costs nothing on the success path and only allocates when an error is
/// actually being assembled.
#[derive(Clone, Debug)]
pub struct InjectionStack {
    frames: Vec<Frame>,
}

impl InjectionStack {
    pub(crate) fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// `building` is the sequence of types currently under construction,
    /// outermost first; `missing` is the dependency that could not be
    /// found. Produces one frame per edge in that chain, ending in the
    /// edge that points at `missing`.
    pub(crate) fn from_path(building: &[TypeInfo], missing: TypeInfo) -> Self {
        let mut frames: Vec<Frame> = building
            .windows(2)
            .map(|pair| Frame {
                dependant: pair[0],
                dependency: pair[1],
            })
            .collect();
        if let Some(&last) = building.last() {
            frames.push(Frame { dependant: last, dependency: missing });
        }
        Self { frames }
    }
}

impl std::fmt::Display for InjectionStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (line, frame) in self.frames.iter().rev().enumerate() {
            writeln!(f, "  {line}: {} requires {}", frame.dependant, frame.dependency)?;
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_outermost_last() {
        let a = TypeInfo::of::<i32>();
        let b = TypeInfo::of::<u32>();
        let c = TypeInfo::of::<u64>();

        let stack = InjectionStack::from_path(&[a, b], c);
        let rendered = stack.to_string();
        assert!(rendered.contains("requires"));
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn empty_path_renders_nothing() {
        assert_eq!(InjectionStack::empty().to_string(), "");
    }
}
