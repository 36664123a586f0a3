/// Which convertibility an assignment requires between its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentRule {
    /// `right -> left` or `left -> right`.
    #[default]
    Symmetric,
    /// `right -> left` only.
    Directed,
}

/// Per-pass checker settings.
#[derive(Debug, Clone, Default)]
pub struct CheckerConfig {
    pub assignment_rule: AssignmentRule,
}

impl CheckerConfig {
    pub fn new() -> Self {
        CheckerConfig::default()
    }

    pub fn with_assignment_rule(mut self, assignment_rule: AssignmentRule) -> Self {
        self.assignment_rule = assignment_rule;
        self
    }
}
