pub mod models;
pub mod session;
pub mod clock;
pub mod errors;

pub use models::*;
pub use session::*;
pub use clock::*;
pub use errors::*;
