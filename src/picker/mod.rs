/// Category tabs and variant galleries.
pub mod view;
