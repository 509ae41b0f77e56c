//! Presentation adapters over the structured page model.
//!
//! Renderers only walk already-computed tables, cards and memos; they never
//! aggregate or merge anything themselves.

pub mod html;
