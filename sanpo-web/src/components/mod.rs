pub mod log_list;
pub mod notice;
pub mod walk_form;
