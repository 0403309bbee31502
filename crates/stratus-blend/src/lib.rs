pub mod controller;
pub mod output;
pub mod session;

pub use controller::{BlendController, BlendPhase, TickReport};
pub use session::CloudSession;
