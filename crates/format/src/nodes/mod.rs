//! The node kinds of a formatting tree.

mod format;
mod list;
mod text;

pub use format::Format;
pub use list::ListNode;
pub use text::TextNode;
