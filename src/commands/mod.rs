//! Inbound command boundary: parsing and the reply-building router.

mod router;

pub use router::{Command, CommandRouter};
