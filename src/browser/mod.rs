pub mod session;

pub use session::{Session, WaitState, best_effort};
