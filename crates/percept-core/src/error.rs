pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("brand name must not be empty (brand #{index})")]
    EmptyBrandName { index: usize },

    #[error("duplicate brand name: {name}")]
    DuplicateBrand { name: String },

    #[error("duplicate attribute id: {id}")]
    DuplicateAttribute { id: String },

    #[error("response #{response} rates unknown brand: {brand}")]
    UnknownBrand { response: usize, brand: String },

    #[error("response #{response} rates unknown attribute {attribute} for brand {brand}")]
    UnknownAttribute {
        response: usize,
        brand: String,
        attribute: String,
    },

    #[error("response #{response} has a non-finite rating for {brand}/{field}")]
    NonFiniteRating {
        response: usize,
        brand: String,
        field: String,
    },

    #[error("Invalid project JSON: {message}")]
    InvalidProjectJson { message: String },

    #[error("Invalid config JSON: {message}")]
    InvalidConfigJson { message: String },

    #[error("Invalid config YAML: {message}")]
    InvalidConfigYaml { message: String },
}
