/*!

Token scanning and the small structured text formats the core reads and writes bit-exact:
file-variable lists and axiom-filter specifications. The clause-statistics, annotation, and PCL
formats build on the same scanner from their own modules.

*/

pub mod axfilter;
pub mod filevars;
pub mod scanner;
