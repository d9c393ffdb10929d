//! Card domain: directory lookup, field selection, layout composition and face state.

pub mod compose;
pub mod directory;
pub mod employee;
pub mod fields;
pub mod flip;
pub mod layout;
pub mod scale;
pub mod session;
pub mod title;

pub use compose::{FrontFace, RenderableRow, compose_front, compose_rows};
pub use directory::{
    Directory, DirectoryError, LookupError, SUGGESTION_LIMIT, extract_id, normalize_id,
};
pub use employee::{EmployeeRecord, Language};
pub use fields::{FieldVisibility, OptionalField, Overrides, format_mobile};
pub use flip::{FLIP_DRAG_THRESHOLD, FlipController, Orientation};
pub use layout::{CompanyProfile, FontClass, Icon, RowKind};
pub use scale::{LayoutError, fit_scale};
pub use session::CardSession;
pub use title::{TextLine, TextMeasure, compose_title_line};
