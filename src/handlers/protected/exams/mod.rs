pub mod download;
pub mod list;
pub mod save;

pub use download::download as exam_download;
pub use list::list as exam_list;
pub use save::save as exam_save;
