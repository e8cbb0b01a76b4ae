pub mod handlers;
pub mod router;
pub mod stream_protocol;
pub mod validators;
