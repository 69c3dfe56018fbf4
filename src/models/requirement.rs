use crate::models::entry::Entry;

/// Suffix a generated sketch source file carries
pub const SKETCH_SUFFIX: &str = ".ino.cpp";

/// A named structural check with a fixed failure message.
///
/// `name` is the expected path relative to the root; an entry only
/// satisfies the requirement when its relative path equals `name` and
/// `predicate` holds.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub name: &'static str,
    pub predicate: fn(&Entry) -> bool,
    pub failure_message: &'static str,
}

impl Requirement {
    pub const fn new(
        name: &'static str,
        predicate: fn(&Entry) -> bool,
        failure_message: &'static str,
    ) -> Self {
        Self {
            name,
            predicate,
            failure_message,
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry.relative_path == self.name && (self.predicate)(entry)
    }
}

fn readable_file(entry: &Entry) -> bool {
    entry.is_file() && entry.readable
}

fn readable_dir(entry: &Entry) -> bool {
    entry.is_dir() && entry.readable
}

fn sketch_dir(entry: &Entry) -> bool {
    readable_dir(entry) && entry.has_child_with_suffix(SKETCH_SUFFIX)
}

/// Required layout of an exported sketch project, in reporting order
pub static PROJECT_LAYOUT: [Requirement; 3] = [
    Requirement::new(
        "CMakeLists.txt",
        readable_file,
        "Couldn't find 'CMakeLists.txt' file.",
    ),
    Requirement::new(
        "sketch",
        sketch_dir,
        "Couldn't find any sketch files in the 'sketch' folder.",
    ),
    Requirement::new("core", readable_dir, "Couldn't find the 'core' folder."),
];

/// Ordered requirements paired with their satisfaction flags.
///
/// The requirement list is never mutated; only the flags change, and a
/// flag never goes back to false once set.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    requirements: &'static [Requirement],
    satisfied: Vec<bool>,
}

impl ConstraintSet {
    pub fn new(requirements: &'static [Requirement]) -> Self {
        Self {
            requirements,
            satisfied: vec![false; requirements.len()],
        }
    }

    /// A fresh set for the exported sketch project layout
    pub fn project_layout() -> Self {
        Self::new(&PROJECT_LAYOUT)
    }

    /// Test `entry` against every unsatisfied requirement, marking matches.
    ///
    /// Returns the requirements newly satisfied by this entry.
    pub fn observe(&mut self, entry: &Entry) -> Vec<&'static Requirement> {
        let requirements = self.requirements;
        let mut newly = Vec::new();
        for (requirement, satisfied) in requirements.iter().zip(self.satisfied.iter_mut()) {
            if !*satisfied && requirement.matches(entry) {
                *satisfied = true;
                newly.push(requirement);
            }
        }
        newly
    }

    pub fn all_satisfied(&self) -> bool {
        self.satisfied.iter().all(|s| *s)
    }

    pub fn is_satisfied(&self, name: &str) -> bool {
        self.requirements
            .iter()
            .zip(&self.satisfied)
            .any(|(r, s)| r.name == name && *s)
    }

    /// The first-declared requirement that is still unsatisfied
    pub fn first_unsatisfied(&self) -> Option<&'static Requirement> {
        let requirements = self.requirements;
        requirements
            .iter()
            .zip(&self.satisfied)
            .find(|(_, satisfied)| !**satisfied)
            .map(|(requirement, _)| requirement)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
