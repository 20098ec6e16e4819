pub mod item;
pub mod tag;

pub use item::{Item, NewItem};
pub use tag::{NewTag, Tag, TagColor, ROOT_PARENT_ID};
