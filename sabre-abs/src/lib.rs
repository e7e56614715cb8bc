/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is the `IString` type, an interned string type. A number of external crates
could provide this functionality. This crate redirects to whatever chosen implementation we want.
To use the [`string_cache` crate](https://crates.io/crates/string_cache), we just define `IString`
as an alias for `string_cache::DefaultAtom`. If we later switch to another interning crate, only
this alias changes.

For infrastructure with very different backing implementations we define a thin abstraction layer
over the implementation. The `log` module is the main example: its public interface is only
`set_global_logging_threshold()`/`get_global_logging_threshold()` and the re-exported `tracing`
macros, while the backing subscriber setup is private to the module.

*/

mod nat_set;
mod partial_ordering;
mod string_util;

pub mod log;

pub use partial_ordering::*;

// region Hashing data structures
pub use std::collections::{HashMap, HashSet};

// For vectors that are expected to have few or zero elements.
pub use smallvec::{smallvec, SmallVec};
// endregion

// Logging
pub use tracing;

// Interned string. `DefaultAtom` is a global cache that can be used across threads.
pub use string_cache::DefaultAtom as IString;

// A set of (small) natural numbers
pub use nat_set::NatSet;

// Join sequences with a separator
pub use string_util::{join_iter, join_string};
