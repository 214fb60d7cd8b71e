//! Chat forwarding to a hosted language-model provider.
//!
//! A question is sent to the provider in a single POST. Whatever comes back is
//! normalized into a [`ChatAnswer`]: either an extracted answer string or an
//! error message. Nothing in this module returns an HTTP error to the caller.
//!
//! # Components
//!
//! - `models`: Request/response bodies and the provider wire format.
//! - `transport`: The outbound HTTP seam (`reqwest`), swappable in tests.
//! - `extract`: Ordered response-shape matchers.
//! - `forwarder`: Feature gate, timeout and error classification.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod extract;
mod forwarder;
mod models;
pub mod transport;

pub use extract::{extract_answer, ResponseShape};
pub use forwarder::{ChatError, ChatForwarder};
pub use models::{ChatAnswer, ChatQuery, GenerationParameters, ProviderMessage, ProviderRequest};
pub use transport::{HttpTransport, ProviderReply, Transport, TransportError};
