//! Output formatting for answer envelopes

pub mod console;
