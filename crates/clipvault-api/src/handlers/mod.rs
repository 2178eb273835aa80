pub mod clip_delete;
pub mod clip_get;
pub mod clip_list;
pub mod clip_upload;
pub mod clip_view;
pub mod index;
