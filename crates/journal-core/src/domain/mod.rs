//! 매매일지 도메인 모델.

mod calculations;
mod loader;
mod trade;
mod validation;

pub use calculations::*;
pub use loader::*;
pub use trade::*;
pub use validation::*;
