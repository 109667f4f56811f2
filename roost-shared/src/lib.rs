pub mod moment;
pub mod pii;

pub use moment::Moment;
pub use pii::Masked;
