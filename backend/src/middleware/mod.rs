pub mod ajax_guard;
pub mod api_key;
pub mod client_ip;
pub mod logging;
pub mod origin;
pub mod request_id;
pub mod session;

pub use ajax_guard::*;
pub use api_key::*;
pub use client_ip::*;
pub use logging::*;
pub use origin::*;
pub use request_id::*;
pub use session::*;
