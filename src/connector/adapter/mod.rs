mod chat_backend;
mod http_chat_backend;

pub use chat_backend::*;
pub use http_chat_backend::*;
