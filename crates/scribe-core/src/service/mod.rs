//! Application services - business rules on top of the ports.

mod blog;

pub use blog::BlogService;
