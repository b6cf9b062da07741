//! Inline rules.
//!
//! Each rule owns the syntax constants of the construct it recognizes, in
//! the same way block kinds do. Rules share one signature,
//! [`InlineRule`](super::InlineRule): they either accept the input at
//! `state.pos` and advance past it, or return false and leave the cursor
//! where it was.

pub mod autolink;
pub mod backticks;
pub mod emphasis;
pub mod entity;
pub mod escape;
pub mod fragments;
pub mod link;
pub mod linkify;
pub mod mention;
pub mod newline;
pub mod strikethrough;
pub mod text;
pub mod unicode_emoji;
