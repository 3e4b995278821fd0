pub mod fingerprint;
pub mod jwt;
pub mod security;

pub use fingerprint::*;
pub use jwt::*;
pub use security::*;
