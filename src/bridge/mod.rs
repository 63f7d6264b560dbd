//! Enhancement bridge: turns inert table markup into a sortable table and
//! performs every DOM mutation a sort activation causes.

pub mod announce;
pub mod enhance;
pub mod table;
pub mod toggle;

pub use announce::{sort_announcement, sorted_label};
pub use enhance::{activated_header, enhance, install_triggers, Enhancement};
pub use toggle::{
    apply_sort, plan_sort, read_indicator, toggle_sort, write_indicator, SortMode, SortOutcome,
    SortPlan,
};
