//! Deterministic bulk-rename schemes.
//!
//! A scheme maps a window's position in listing order to a label. Label
//! computation is pure so schemes can be tested without a terminal.

/// Function-scheme vocabulary, applied in listing order.
const FUNCTION_NAMES: [&str; 10] = [
    "Main",
    "Development",
    "Testing",
    "Documentation",
    "Build",
    "Debug",
    "Production",
    "Staging",
    "Research",
    "Support",
];

const WORKSPACE_LETTERS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// A deterministic, order-dependent rename rule for all open windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// `Project-1`, `Project-2`, ...
    Project,
    /// Fixed function vocabulary, then `Terminal-N` past its length.
    Function,
    /// `Workspace-A` .. `Workspace-J`, then `Workspace-N` past ten.
    Workspace,
}

impl NamingScheme {
    /// Label for the window at `index` (0-based listing order).
    pub fn label(&self, index: usize) -> String {
        match self {
            Self::Project => format!("Project-{}", index + 1),
            Self::Function => FUNCTION_NAMES
                .get(index)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| format!("Terminal-{}", index + 1)),
            Self::Workspace => match WORKSPACE_LETTERS.get(index) {
                Some(letter) => format!("Workspace-{letter}"),
                None => format!("Workspace-{}", index + 1),
            },
        }
    }

    /// The full label sequence for `count` windows in listing order.
    pub fn labels(&self, count: usize) -> Vec<String> {
        (0..count).map(|index| self.label(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn project_scheme_is_sequential() {
        assert_eq!(
            NamingScheme::Project.labels(3),
            vec!["Project-1", "Project-2", "Project-3"]
        );
    }

    #[test]
    fn function_scheme_uses_vocabulary_then_falls_back() {
        let labels = NamingScheme::Function.labels(12);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Main");
        assert_eq!(labels[1], "Development");
        assert_eq!(labels[9], "Support");
        assert_eq!(labels[10], "Terminal-11");
        assert_eq!(labels[11], "Terminal-12");
    }

    #[test]
    fn workspace_scheme_letters_then_numbers() {
        let labels = NamingScheme::Workspace.labels(12);
        assert_eq!(labels[0], "Workspace-A");
        assert_eq!(labels[9], "Workspace-J");
        assert_eq!(labels[10], "Workspace-11");
        assert_eq!(labels[11], "Workspace-12");
    }

    #[test]
    fn labels_produces_exactly_n_entries() {
        for scheme in [
            NamingScheme::Project,
            NamingScheme::Function,
            NamingScheme::Workspace,
        ] {
            for n in [0usize, 1, 5, 10, 11, 25] {
                assert_eq!(scheme.labels(n).len(), n);
            }
        }
    }

    #[test]
    fn schemes_never_cross_produce_labels() {
        let n = 15;
        let project: HashSet<_> = NamingScheme::Project.labels(n).into_iter().collect();
        let function: HashSet<_> = NamingScheme::Function.labels(n).into_iter().collect();
        let workspace: HashSet<_> = NamingScheme::Workspace.labels(n).into_iter().collect();

        assert!(project.is_disjoint(&function));
        assert!(project.is_disjoint(&workspace));
        assert!(function.is_disjoint(&workspace));
    }
}
