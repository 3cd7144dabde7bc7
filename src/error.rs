use std::borrow::Cow;

/// Opaque failure bubbled out of one of the layout collaborators (the
/// inline layouter, the intrinsic measurer, or the atomic sizer).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unrecognized display value, an unsupported atomic inline kind,
    /// or an intentionally stubbed path.
    #[error("not implemented: {0}")]
    NotImplemented(Cow<'static, str>),

    /// A collaborator failed; the in-progress pass is abandoned without
    /// retry and no partial result is exposed.
    #[error("collaborator failed: {0}")]
    Collaborator(CollaboratorError),

    /// A structural invariant of the box tree did not hold. Diagnostic
    /// only; this indicates a bug in the builder or a hand-made tree.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl Error {
    pub fn not_implemented(what: impl Into<Cow<'static, str>>) -> Self {
        Error::NotImplemented(what.into())
    }

    pub fn collaborator(err: CollaboratorError) -> Self {
        Error::Collaborator(err)
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation(message.into())
    }
}
