/// Per-category selection and composite-request publishing.
pub mod state;
