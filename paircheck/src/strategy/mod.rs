//! Check source strategies.
//!
//! Only the filesystem strategy exists (`fs` module), surfaced through the
//! concrete `check_fs()` public API. A `CheckSource` trait can arrive when a
//! second concrete strategy (stdin, VCS index) demands it — until then the
//! design stays concrete to avoid speculative abstraction.

pub mod fs;
