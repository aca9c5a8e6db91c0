//! Managed files that backup and restore operate on

/// A file basm manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Rc,
    Sudoers,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::Rc => "rc",
            Target::Sudoers => "sudoers",
        }
    }

    /// Targets selected by the `--no-rc` / `--no-sudoers` switches
    pub fn selected(rc: bool, sudoers: bool) -> Vec<Target> {
        let mut targets = Vec::with_capacity(2);
        if rc {
            targets.push(Target::Rc);
        }
        if sudoers {
            targets.push(Target::Sudoers);
        }
        targets
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected() {
        assert_eq!(Target::selected(true, true), vec![Target::Rc, Target::Sudoers]);
        assert_eq!(Target::selected(false, true), vec![Target::Sudoers]);
        assert!(Target::selected(false, false).is_empty());
    }
}
