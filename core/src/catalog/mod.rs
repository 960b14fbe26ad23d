pub mod approach;
pub mod feed;
pub mod object;
pub mod orbit;

pub use approach::{ApproachRecord, MissDistance, RelativeVelocity};
pub use feed::NeoSummary;
pub use object::{ObjectDetail, ObjectEnvelope};
pub use orbit::OrbitRecord;
