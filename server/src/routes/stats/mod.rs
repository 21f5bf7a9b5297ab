mod get_stats;

pub use self::get_stats::*;
