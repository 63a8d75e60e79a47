pub mod dispatcher;

pub use dispatcher::{Dispatcher, day_bounds, replies};
