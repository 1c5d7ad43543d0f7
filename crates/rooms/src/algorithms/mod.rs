pub mod contour;
pub mod filter;
pub mod morphology;
pub mod preprocess;
pub mod simplify;
pub mod threshold;

pub use contour::*;
pub use filter::*;
pub use morphology::*;
pub use preprocess::*;
pub use simplify::*;
pub use threshold::*;
