//! 회귀/보간/통계 보조 함수.

pub mod pchip;
pub mod polyfit;
pub mod stats;

pub use pchip::Pchip;
pub use polyfit::{horner, polyfit, FitError, Polynomial};
pub use stats::{mean, population_std_dev};
