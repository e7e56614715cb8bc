/*!

Clause usage statistics in their exact external text form.

*/

mod clause_stats;

pub use clause_stats::{parse_clause_stats_list, ClauseStats};
