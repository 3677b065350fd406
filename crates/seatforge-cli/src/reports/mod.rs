mod tables;

pub use self::tables::{
    attempts as print_attempts, pair_stats as print_pair_stats, partners as print_partners,
    summary as print_summary,
};
