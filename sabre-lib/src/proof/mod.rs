/*!

Proof objects: typed PCL step records, the identifier-keyed protocol with parse/print and
proof-subset marking, and structural protocol analysis.

*/

mod analysis;
mod pcl;

pub use analysis::{protocol_analyse, ProtocolStats};
pub use pcl::{Justification, PclProtocol, PclStep, StepProperties, StepProperty};
