pub mod mock_sender;

pub use harness::*;
pub use mock_sender::*;
