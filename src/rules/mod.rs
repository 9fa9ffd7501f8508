//! Game rules: the phase state machine, the board, and the table that owns
//! every legality predicate and board mutation.

pub mod board;
pub mod phase;
pub mod table;

pub use board::Board;
pub use phase::Phase;
pub use table::Table;
