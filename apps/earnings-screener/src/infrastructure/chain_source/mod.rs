//! Chain source adapters.

mod file;
mod in_memory;

pub use file::FileChainSource;
pub use in_memory::InMemoryChainSource;
