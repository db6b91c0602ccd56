mod message;
mod mode;
mod reply;
mod request;
mod response;

pub use message::*;
pub use mode::*;
pub use reply::*;
pub use request::*;
pub use response::*;
