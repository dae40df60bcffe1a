//! Sender authorization for link enforcement.
//!
//! A sender is exempt when the message was posted on behalf of a channel,
//! when the user is in the configured admin set, or when the platform
//! reports them as an administrator or creator of the chat.

mod checker;

pub use checker::SenderPolicy;
