mod channels;
mod controller;

pub use channels::ChangeSignal;
pub use controller::MemoSession;
