mod files;
mod parse;
mod throughput;

pub use files::*;
pub use parse::*;
pub use throughput::*;
