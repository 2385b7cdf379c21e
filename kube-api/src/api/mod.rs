pub use account::TOKEN_PATH;
pub use pod::Pod;
pub use service::{Endpoint, backends, endpoint};

mod account;
mod pod;
mod service;
