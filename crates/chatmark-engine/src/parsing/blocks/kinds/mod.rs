pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list;
pub mod paragraph;
pub mod subtext;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use heading::Heading;
pub use list::{ItemStart, List, ListMarker};
pub use paragraph::Paragraph;
pub use subtext::Subtext;
pub use thematic_break::ThematicBreak;
