pub mod bathroom;
pub mod dog;
pub mod feeding;
pub mod macros;
pub mod time;

pub use bathroom::*;
pub use dog::*;
pub use feeding::*;
pub use time::*;
