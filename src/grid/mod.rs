pub mod model;
pub mod selection;

pub use model::{Column, ColumnDraft, ColumnKind, DropdownOption, Row, Tab};
pub use selection::{CellMode, CellRef};
