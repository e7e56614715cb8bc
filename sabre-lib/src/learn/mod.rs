/*!

Annotation vectors attached to proof examples.

*/

mod annotations;

pub use annotations::{parse_annotation_list, Annotation};
