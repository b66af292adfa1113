pub mod access;
pub mod dam;
pub mod error;
pub mod login;

pub use access::*;
pub use dam::*;
pub use error::*;
pub use login::*;
