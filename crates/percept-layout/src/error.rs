#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("benchmark index {index} is out of range for {brands} brands")]
    BenchmarkOutOfRange { index: usize, brands: usize },

    #[error("performance matrix has a non-finite value at brand {brand}, attribute {attribute}")]
    NonFinitePerformance { brand: usize, attribute: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
