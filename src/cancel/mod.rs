//! Cooperative cancellation.
//!
//! A [`CancelToken`] is a level-triggered flag shared by every task of a
//! queue. Tasks observe it voluntarily, either by polling
//! [`CancelToken::is_cancelled`] or by racing their suspension points against
//! [`CancelToken::cancelled`]; [`sleep`] does the latter for timed delays.
//! The flag itself is a `tokio_util` [`CancellationToken`](tokio_util::sync::CancellationToken).

pub mod sleep;
pub mod token;

pub use sleep::sleep;
pub use token::CancelToken;
