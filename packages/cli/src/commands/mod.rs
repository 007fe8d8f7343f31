pub mod batch;
pub mod pair;

pub use batch::batch;
pub use pair::pair;
