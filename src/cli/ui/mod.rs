pub mod detail_view;
pub mod formatting;
pub mod navigation;
pub mod prompts;
pub mod test_mode;
