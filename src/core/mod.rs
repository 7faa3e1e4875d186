mod target;

pub use target::{is_domain, is_email, Target, TargetKind};
