//! S-expression IPC for the referee.
//!
//! Requests are plists such as `(:type :judge :id 1 :left :rock :right :paper)`;
//! responses echo the id and carry `:status :ok` or `:status :error`.

pub mod dispatch;
pub mod server;
pub mod sexp;

pub use dispatch::{handle_message, Response, Status};
pub use server::{serve, ServeStats};
