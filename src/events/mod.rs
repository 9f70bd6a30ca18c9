pub mod errors;
pub mod observers;
pub mod pointer;
pub mod scroll;

pub use errors::wire_global_errors;
pub use observers::wire_observers;
pub use pointer::wire_pointer;
pub use scroll::wire_scroll;
