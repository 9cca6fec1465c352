pub mod controller;
pub mod cursor;
pub mod orientation;

pub use controller::{TabController, Trigger};
pub use cursor::TabCursor;
pub use orientation::{NavAction, Orientation};
