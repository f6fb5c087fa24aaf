//! Form solve state.

/// Whether a form is being edited or shows a freshly solved result.
///
/// `Solved` carries the fields the solver derived; the UI renders those
/// read-only. Any edit drops the form back to `Editing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveState<F> {
    Editing,
    Solved(Vec<F>),
}

impl<F> Default for SolveState<F> {
    fn default() -> Self {
        SolveState::Editing
    }
}

impl<F: Copy + PartialEq> SolveState<F> {
    /// Solved state with the given derived fields.
    pub fn solved(fields: impl IntoIterator<Item = F>) -> Self {
        SolveState::Solved(fields.into_iter().collect())
    }

    /// Check if `field` was derived by the last solve.
    pub fn is_derived(&self, field: F) -> bool {
        match self {
            SolveState::Editing => false,
            SolveState::Solved(fields) => fields.contains(&field),
        }
    }

    /// Check if the form currently shows a solved result.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveState::Solved(_))
    }

    /// Fields derived by the last solve (empty while editing).
    pub fn derived(&self) -> &[F] {
        match self {
            SolveState::Editing => &[],
            SolveState::Solved(fields) => fields,
        }
    }

    /// Record a user edit.
    pub fn edit(&mut self) {
        *self = SolveState::Editing;
    }
}
