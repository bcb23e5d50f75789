use derive_more::{Display, Error};

/// Errors from player input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The targeted cell is an initial hint cell and cannot be changed.
    #[display("cannot modify an initial cell")]
    CannotModifyInitialCell,
    /// Notes can only be toggled on empty cells.
    #[display("cannot add a note to a filled cell")]
    CannotAddNoteToFilledCell,
}
